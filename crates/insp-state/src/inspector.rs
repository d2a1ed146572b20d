//! # Inspector
//!
//! An inspector is a [`User`] that owns exactly one [`InspectionPhase`].
//!
//! The phase sits behind a mutex. Every lifecycle call takes the lock,
//! reads the clock, moves the current phase out, applies the transition,
//! and stores the returned phase before releasing. Callers sharing an
//! `Arc<Inspector>` across threads never observe two phases or a lost
//! transition, and a completed phase never ends before it started.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use insp_core::{Clock, Location, SystemClock, Timestamp, User};

use crate::phase::{InspectionPhase, InspectionReport, Outcome, PhaseKind, Transition};

/// A user who performs inspections.
#[derive(Debug)]
pub struct Inspector {
    profile: User,
    phase: Mutex<InspectionPhase>,
    clock: Arc<dyn Clock>,
}

/// Point-in-time view of an inspector, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectorSnapshot {
    pub profile: User,
    pub phase: InspectionPhase,
}

impl Inspector {
    /// Create an available inspector reading the wall clock.
    pub fn new(profile: User) -> Self {
        Self::with_clock(profile, Arc::new(SystemClock))
    }

    /// Create an available inspector reading time from `clock`.
    pub fn with_clock(profile: User, clock: Arc<dyn Clock>) -> Self {
        Self {
            profile,
            phase: Mutex::new(InspectionPhase::Available),
            clock,
        }
    }

    pub fn profile(&self) -> &User {
        &self.profile
    }

    pub fn name(&self) -> &str {
        self.profile.name()
    }

    /// A copy of the current phase.
    pub fn phase(&self) -> InspectionPhase {
        self.phase.lock().clone()
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.lock().kind()
    }

    /// Begin inspecting `location`.
    ///
    /// Rejected, with the phase unchanged, while another inspection is in
    /// progress.
    pub fn start_inspection(&self, location: Location) -> Outcome {
        self.apply("start_inspection", |phase, now| phase.start(location, now))
    }

    /// End the inspection in progress.
    ///
    /// Rejected, with the phase unchanged, when nothing is in progress.
    pub fn finish_inspection(&self) -> Outcome {
        self.apply("finish_inspection", |phase, now| phase.finish(now))
    }

    /// Force a completed inspector back to Available.
    ///
    /// Administrative override outside the normal start/finish table.
    /// Rejected, with the phase unchanged, unless the phase is Completed.
    pub fn reset_to_available(&self) -> Outcome {
        self.apply("reset_to_available", |phase, _| phase.reset())
    }

    pub fn can_start_inspection(&self) -> bool {
        self.phase.lock().can_start()
    }

    pub fn state_name(&self) -> &'static str {
        self.phase.lock().state_name()
    }

    /// `"Inspector {name} - Estado: {state}"`.
    pub fn state_info(&self) -> String {
        format!("Inspector {} - Estado: {}", self.name(), self.state_name())
    }

    /// Summary of the last inspection, if the inspector is in Completed.
    pub fn last_inspection_report(&self) -> Option<InspectionReport> {
        self.phase.lock().last_inspection_report()
    }

    pub fn snapshot(&self) -> InspectorSnapshot {
        InspectorSnapshot {
            profile: self.profile.clone(),
            phase: self.phase(),
        }
    }

    fn apply(
        &self,
        operation: &'static str,
        transition: impl FnOnce(InspectionPhase, Timestamp) -> Transition,
    ) -> Outcome {
        let mut guard = self.phase.lock();
        // Read under the lock so `now` is ordered with the phase it applies to.
        let now = self.clock.now();
        let from = guard.kind();
        let current = std::mem::take(&mut *guard);
        let Transition { next, kind } = transition(current, now);
        let to = next.kind();
        *guard = next;
        drop(guard);

        let outcome = Outcome::new(self.name(), kind);
        if outcome.is_applied() {
            tracing::info!(
                inspector = %self.name(),
                operation,
                %from,
                %to,
                "inspection phase changed"
            );
        } else {
            tracing::debug!(
                inspector = %self.name(),
                operation,
                phase = %from,
                "lifecycle request rejected"
            );
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use insp_core::ManualClock;

    use crate::phase::OutcomeKind;

    fn t0() -> Timestamp {
        Timestamp::parse("2026-01-15T12:00:00Z").unwrap()
    }

    fn make_inspector() -> (Inspector, ManualClock) {
        let clock = ManualClock::new(t0());
        let inspector = Inspector::with_clock(
            User::new("Laura", 31, "laura@ejemplo.com"),
            Arc::new(clock.clone()),
        );
        (inspector, clock)
    }

    fn loc(name: &str) -> Location {
        Location::new(name, "0,0")
    }

    #[test]
    fn test_new_inspector_is_available() {
        let (i, _) = make_inspector();
        assert_eq!(i.phase(), InspectionPhase::Available);
        assert!(i.can_start_inspection());
        assert_eq!(i.state_info(), "Inspector Laura - Estado: Disponible");
    }

    #[test]
    fn test_lifecycle_scenario() {
        let (i, clock) = make_inspector();

        let out = i.start_inspection(loc("L1"));
        assert!(out.is_applied());
        assert_eq!(i.phase().current_location(), Some(&loc("L1")));
        assert!(!i.can_start_inspection());
        assert_eq!(i.state_info(), "Inspector Laura - Estado: En Progreso");

        clock.advance_millis(5_000);
        let out = i.start_inspection(loc("L2"));
        assert_eq!(out.kind, OutcomeKind::AlreadyInspecting { current: "L1".into() });
        assert_eq!(i.phase().current_location(), Some(&loc("L1")));
        assert_eq!(i.phase().start_time(), Some(t0()));

        clock.advance_millis(25_400);
        let out = i.finish_inspection();
        assert_eq!(
            out.message(),
            "Inspector Laura ha finalizado la inspección en L1. Duración: 30 segundos"
        );
        assert_eq!(
            i.phase(),
            InspectionPhase::Completed {
                location: loc("L1"),
                start_time: t0(),
                end_time: t0().plus_millis(30_400),
            }
        );

        let out = i.start_inspection(loc("L2"));
        assert_eq!(out.kind, OutcomeKind::StartedNew { location: "L2".into() });
        assert_eq!(i.phase().current_location(), Some(&loc("L2")));
    }

    #[test]
    fn test_finish_while_available_is_informational() {
        let (i, _) = make_inspector();
        let out = i.finish_inspection();
        assert!(!out.is_applied());
        assert_eq!(
            out.to_string(),
            "Inspector Laura no tiene inspecciones activas para finalizar"
        );
        assert_eq!(i.phase(), InspectionPhase::Available);
    }

    #[test]
    fn test_finish_twice_keeps_completed() {
        let (i, clock) = make_inspector();
        i.start_inspection(loc("L1"));
        clock.advance_millis(2_000);
        i.finish_inspection();
        let before = i.phase();

        clock.advance_millis(2_000);
        let out = i.finish_inspection();
        assert_eq!(out.kind, OutcomeKind::AlreadyCompleted { last: "L1".into() });
        assert_eq!(i.phase(), before);
    }

    #[test]
    fn test_report_and_reset() {
        let (i, clock) = make_inspector();
        assert!(i.last_inspection_report().is_none());

        i.start_inspection(loc("L1"));
        clock.advance_millis(90_000);
        i.finish_inspection();

        let report = i.last_inspection_report().unwrap();
        assert_eq!(report.duration_secs, 90);
        assert_eq!(report.end_time, t0().plus_millis(90_000));

        let out = i.reset_to_available();
        assert_eq!(out.kind, OutcomeKind::Reset);
        assert_eq!(i.phase_kind(), PhaseKind::Available);
        assert!(i.last_inspection_report().is_none());
    }

    #[test]
    fn test_reset_while_in_progress_is_rejected() {
        let (i, _) = make_inspector();
        i.start_inspection(loc("L1"));
        let out = i.reset_to_available();
        assert!(!out.is_applied());
        assert_eq!(i.phase_kind(), PhaseKind::InProgress);
    }

    #[test]
    fn test_clock_moving_backwards_yields_zero_duration() {
        let (i, clock) = make_inspector();
        i.start_inspection(loc("L1"));
        clock.set(t0().plus_millis(-3_000));
        let out = i.finish_inspection();
        assert_eq!(
            out.kind,
            OutcomeKind::Finished {
                location: "L1".into(),
                duration_secs: 0
            }
        );
    }

    #[test]
    fn test_concurrent_starts_admit_exactly_one() {
        let (i, _) = make_inspector();
        let i = Arc::new(i);

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let i = Arc::clone(&i);
                std::thread::spawn(move || i.start_inspection(loc(&format!("L{n}"))).is_applied())
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|applied| *applied)
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(i.phase_kind(), PhaseKind::InProgress);
    }

    /// A clock that, once armed, parks the next reader right after it has
    /// read the time, until the test releases it.
    #[derive(Debug)]
    struct GatedClock {
        inner: ManualClock,
        gate: Mutex<Option<(mpsc::Sender<()>, mpsc::Receiver<()>)>>,
    }

    impl GatedClock {
        fn arm(&self) -> (mpsc::Receiver<()>, mpsc::Sender<()>) {
            let (entered_tx, entered_rx) = mpsc::channel();
            let (release_tx, release_rx) = mpsc::channel();
            *self.gate.lock() = Some((entered_tx, release_rx));
            (entered_rx, release_tx)
        }
    }

    impl Clock for GatedClock {
        fn now(&self) -> Timestamp {
            let now = self.inner.now();
            let gate = self.gate.lock().take();
            if let Some((entered, release)) = gate {
                entered.send(()).unwrap();
                release.recv().unwrap();
            }
            now
        }
    }

    #[test]
    fn test_clock_is_read_inside_the_critical_section() {
        let base = ManualClock::new(t0());
        let clock = Arc::new(GatedClock {
            inner: base.clone(),
            gate: Mutex::new(None),
        });
        let i = Arc::new(Inspector::with_clock(
            User::new("Laura", 31, "laura@ejemplo.com"),
            clock.clone(),
        ));
        i.start_inspection(loc("L1"));

        base.advance_millis(1_000);
        let (entered, release) = clock.arm();
        let finisher = {
            let i = Arc::clone(&i);
            std::thread::spawn(move || i.finish_inspection())
        };
        entered.recv().unwrap();

        // The finisher holds `now = t0 + 1s` and must also hold the phase.
        assert!(i.phase.try_lock().is_none());

        base.advance_millis(1_000);
        let racer = {
            let i = Arc::clone(&i);
            std::thread::spawn(move || (i.finish_inspection(), i.start_inspection(loc("L2"))))
        };
        release.send(()).unwrap();

        let finished = finisher.join().unwrap();
        let (second_finish, restart) = racer.join().unwrap();

        assert_eq!(
            finished.kind,
            OutcomeKind::Finished {
                location: "L1".into(),
                duration_secs: 1
            }
        );
        assert_eq!(second_finish.kind, OutcomeKind::AlreadyCompleted { last: "L1".into() });
        assert_eq!(restart.kind, OutcomeKind::StartedNew { location: "L2".into() });
        assert_eq!(
            i.phase(),
            InspectionPhase::InProgress {
                location: loc("L2"),
                start_time: t0().plus_millis(2_000),
            }
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let (i, _) = make_inspector();
        i.start_inspection(loc("L1"));
        let json = serde_json::to_value(i.snapshot()).unwrap();
        assert_eq!(json["profile"]["name"], "Laura");
        assert_eq!(json["phase"]["phase"], "IN_PROGRESS");
    }
}
