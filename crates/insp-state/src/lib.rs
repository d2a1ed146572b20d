//! # insp-state: Inspection Lifecycle State Machine
//!
//! The inspection lifecycle is a three-phase state machine encoded as a sum
//! type. Each operation is an exhaustive `match` that consumes the current
//! phase and yields the next one together with an outcome.
//!
//! ## Modules
//!
//! - **Phase** (`phase.rs`): `Available → InProgress → Completed`, the
//!   transition table, durations, reports, and outcome messages.
//!
//! - **Inspector** (`inspector.rs`): a user owning exactly one phase at a
//!   time, with the read-decide-replace cycle of every lifecycle call held
//!   under one lock.
//!
//! ## Design
//!
//! Rejected requests are not errors. Starting while busy, finishing while
//! idle, or finishing twice leave the phase untouched and say so through
//! [`OutcomeKind`]; callers never need to wrap lifecycle calls in error
//! handling.

pub mod inspector;
pub mod phase;

pub use inspector::{Inspector, InspectorSnapshot};
pub use phase::{
    duration_secs, InspectionPhase, InspectionReport, Outcome, OutcomeKind, PhaseKind, Transition,
};
