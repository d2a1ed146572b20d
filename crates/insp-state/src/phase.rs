//! # Inspection Phase State Machine
//!
//! Models what an inspector may do given the phase it is currently in.
//!
//! ## States
//!
//! ```text
//!                 start(loc)                    finish()
//!  Available ───────────────▶ InProgress ───────────────▶ Completed
//!      ▲                        ▲                            │  │
//!      │                        └──────── start(loc) ────────┘  │
//!      └──────────────────── reset (override) ──────────────────┘
//! ```
//!
//! ## Transition Table
//!
//! | Phase        | `start(loc)`                  | `finish()`                      |
//! |--------------|-------------------------------|---------------------------------|
//! | Available    | → InProgress(loc, now)        | unchanged, nothing to finish    |
//! | InProgress   | unchanged, already inspecting | → Completed(cur, start, now)    |
//! | Completed    | → InProgress(loc, now)        | unchanged, already completed    |
//!
//! ## Design Decision
//!
//! Every transition is total. A request the current phase cannot honor
//! leaves the phase untouched and is reported through [`OutcomeKind`],
//! never through `Err`. Callers can script lifecycle calls in any order
//! and branch on [`Outcome::is_applied`] or [`InspectionPhase::can_start`].
//!
//! Transitions consume the current phase and return the next one, so a
//! replaced phase is dropped rather than edited in place.

use serde::{Deserialize, Serialize};

use insp_core::{Location, Timestamp};

// ─── Phase ───────────────────────────────────────────────────────────

/// The discriminant of an [`InspectionPhase`], without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PhaseKind {
    /// Free to start an inspection.
    Available,
    /// Currently inspecting a location.
    InProgress,
    /// Finished an inspection and free to start another.
    Completed,
}

impl PhaseKind {
    /// The display name of the phase, as shown in state summaries.
    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Available => "Disponible",
            Self::InProgress => "En Progreso",
            Self::Completed => "Completado",
        }
    }
}

impl std::fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.state_name())
    }
}

/// The current node of an inspector's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionPhase {
    /// Initial phase of every inspector. Carries no data.
    #[default]
    Available,
    /// An inspection is under way.
    InProgress {
        /// The location being inspected.
        location: Location,
        /// When the inspection began.
        start_time: Timestamp,
    },
    /// The last inspection has ended.
    Completed {
        /// The location that was inspected.
        location: Location,
        /// When the inspection began.
        start_time: Timestamp,
        /// When the inspection ended.
        end_time: Timestamp,
    },
}

/// The result of applying an operation to a phase: the phase to hold next
/// and what happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Phase after the operation. Equal to the input when rejected.
    pub next: InspectionPhase,
    /// What the operation did.
    pub kind: OutcomeKind,
}

impl InspectionPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Self::Available => PhaseKind::Available,
            Self::InProgress { .. } => PhaseKind::InProgress,
            Self::Completed { .. } => PhaseKind::Completed,
        }
    }

    pub fn state_name(&self) -> &'static str {
        self.kind().state_name()
    }

    /// Whether `start` would be accepted. False only while in progress.
    pub fn can_start(&self) -> bool {
        match self {
            Self::Available | Self::Completed { .. } => true,
            Self::InProgress { .. } => false,
        }
    }

    /// The location under inspection, while in progress.
    pub fn current_location(&self) -> Option<&Location> {
        match self {
            Self::InProgress { location, .. } => Some(location),
            _ => None,
        }
    }

    /// The start instant of the current or last inspection.
    pub fn start_time(&self) -> Option<Timestamp> {
        match self {
            Self::Available => None,
            Self::InProgress { start_time, .. } | Self::Completed { start_time, .. } => {
                Some(*start_time)
            }
        }
    }

    /// Summary of the last inspection. Only available once completed.
    pub fn last_inspection_report(&self) -> Option<InspectionReport> {
        match self {
            Self::Completed {
                location,
                start_time,
                end_time,
            } => Some(InspectionReport {
                location: location.clone(),
                start_time: *start_time,
                end_time: *end_time,
                duration_secs: duration_secs(*start_time, *end_time),
            }),
            _ => None,
        }
    }

    /// Begin inspecting `location` at `now`.
    pub fn start(self, location: Location, now: Timestamp) -> Transition {
        match self {
            Self::Available => Transition {
                kind: OutcomeKind::Started {
                    location: location.name.clone(),
                },
                next: Self::InProgress {
                    location,
                    start_time: now,
                },
            },
            Self::InProgress {
                location: current,
                start_time,
            } => Transition {
                kind: OutcomeKind::AlreadyInspecting {
                    current: current.name.clone(),
                },
                next: Self::InProgress {
                    location: current,
                    start_time,
                },
            },
            Self::Completed { .. } => Transition {
                kind: OutcomeKind::StartedNew {
                    location: location.name.clone(),
                },
                next: Self::InProgress {
                    location,
                    start_time: now,
                },
            },
        }
    }

    /// End the inspection in progress at `now`.
    pub fn finish(self, now: Timestamp) -> Transition {
        match self {
            Self::Available => Transition {
                next: self,
                kind: OutcomeKind::NothingToFinish,
            },
            Self::InProgress {
                location,
                start_time,
            } => Transition {
                kind: OutcomeKind::Finished {
                    location: location.name.clone(),
                    duration_secs: duration_secs(start_time, now),
                },
                next: Self::Completed {
                    location,
                    start_time,
                    end_time: now,
                },
            },
            Self::Completed {
                location,
                start_time,
                end_time,
            } => Transition {
                kind: OutcomeKind::AlreadyCompleted {
                    last: location.name.clone(),
                },
                next: Self::Completed {
                    location,
                    start_time,
                    end_time,
                },
            },
        }
    }

    /// Administrative override: return a completed phase to Available.
    ///
    /// Not reachable through `start`/`finish`. Any other phase is left as is.
    pub fn reset(self) -> Transition {
        match self {
            Self::Completed { .. } => Transition {
                next: Self::Available,
                kind: OutcomeKind::Reset,
            },
            other => {
                let state = other.kind();
                Transition {
                    next: other,
                    kind: OutcomeKind::NotResettable { state },
                }
            }
        }
    }
}

impl std::fmt::Display for InspectionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.state_name())
    }
}

/// Whole seconds between two instants, rounded to nearest (halves up).
///
/// A clock that went backwards yields zero rather than a negative duration.
pub fn duration_secs(start: Timestamp, end: Timestamp) -> u64 {
    let millis = end.millis_since(start).max(0) as u64;
    (millis + 500) / 1000
}

// ─── Reports and outcomes ────────────────────────────────────────────

/// Summary of a completed inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionReport {
    pub location: Location,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// `end_time - start_time`, in seconds, rounded.
    pub duration_secs: u64,
}

/// What a lifecycle operation did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Available → InProgress.
    Started { location: String },
    /// Completed → InProgress.
    StartedNew { location: String },
    /// Start rejected: already inspecting `current`.
    AlreadyInspecting { current: String },
    /// InProgress → Completed.
    Finished { location: String, duration_secs: u64 },
    /// Finish rejected: nothing in progress.
    NothingToFinish,
    /// Finish rejected: `last` was already completed.
    AlreadyCompleted { last: String },
    /// Completed → Available.
    Reset,
    /// Reset rejected: only a completed phase can be reset.
    NotResettable { state: PhaseKind },
}

impl OutcomeKind {
    /// Whether the phase changed.
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            Self::Started { .. } | Self::StartedNew { .. } | Self::Finished { .. } | Self::Reset
        )
    }
}

/// The outcome of a lifecycle call on a named inspector.
///
/// `Display` renders the human-readable outcome message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Name of the inspector the operation was applied to.
    pub inspector: String,
    #[serde(flatten)]
    pub kind: OutcomeKind,
}

impl Outcome {
    pub fn new(inspector: impl Into<String>, kind: OutcomeKind) -> Self {
        Self {
            inspector: inspector.into(),
            kind,
        }
    }

    /// Whether the phase changed.
    pub fn is_applied(&self) -> bool {
        self.kind.is_applied()
    }

    /// The outcome message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = &self.inspector;
        match &self.kind {
            OutcomeKind::Started { location } => {
                write!(f, "Inspector {name} ha iniciado inspección en {location}")
            }
            OutcomeKind::StartedNew { location } => {
                write!(f, "Inspector {name} ha iniciado nueva inspección en {location}")
            }
            OutcomeKind::AlreadyInspecting { current } => write!(
                f,
                "Inspector {name} ya está realizando una inspección en {current}. No puede iniciar otra."
            ),
            OutcomeKind::Finished {
                location,
                duration_secs,
            } => write!(
                f,
                "Inspector {name} ha finalizado la inspección en {location}. Duración: {duration_secs} segundos"
            ),
            OutcomeKind::NothingToFinish => write!(
                f,
                "Inspector {name} no tiene inspecciones activas para finalizar"
            ),
            OutcomeKind::AlreadyCompleted { last } => write!(
                f,
                "Inspector {name} ya completó la inspección en {last}. Use start_inspection para comenzar una nueva."
            ),
            OutcomeKind::Reset => write!(
                f,
                "Inspector {name} está ahora disponible para nuevas inspecciones"
            ),
            OutcomeKind::NotResettable { state } => write!(
                f,
                "Inspector {name} no tiene una inspección completada que reiniciar (estado: {state})"
            ),
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
