//! # Error Types
//!
//! The error surface of the inspection stack is deliberately small. Lifecycle
//! rejections (starting while busy, finishing while idle) are *not* errors:
//! they are reported through the outcome returned by the state machine.
//! What remains is construction from untyped input.

use thiserror::Error;

/// Top-level error type for the inspection stack.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InspError {
    /// A user kind tag outside `{admin, inspector}` was requested.
    #[error("unsupported user kind: {0}")]
    UnsupportedUserKind(String),

    /// A timestamp could not be parsed or constructed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A location status tag outside `{active, inactive}` was requested.
    #[error("unsupported location status: {0}")]
    UnsupportedLocationStatus(String),
}
