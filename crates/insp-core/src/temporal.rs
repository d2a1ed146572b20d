//! # Temporal Types: UTC Timestamps and the Clock Seam
//!
//! Defines `Timestamp`, a UTC-only instant truncated to millisecond
//! precision, and the `Clock` trait through which the inspection state
//! machine reads "now".
//!
//! ## Precision
//!
//! Inspection durations are reported as `round(elapsed_ms / 1000)` seconds,
//! so timestamps keep milliseconds. Anything finer is discarded at
//! construction, which keeps equality and serialization deterministic.
//!
//! ## Clocks
//!
//! - [`SystemClock`] reads the wall clock.
//! - [`ManualClock`] is set and advanced explicitly; tests use it to pin
//!   inspection start and end instants.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::InspError;

/// A UTC-only timestamp, truncated to millisecond precision.
///
/// # Construction
///
/// - [`Timestamp::now()`]: current UTC time, truncated.
/// - [`Timestamp::from_utc()`]: from a `DateTime<Utc>`, truncating.
/// - [`Timestamp::parse()`]: from an RFC 3339 string, rejecting non-UTC offsets.
/// - [`Timestamp::from_epoch_millis()`]: from Unix epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "DateTime<Utc>")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating below milliseconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_millis(dt))
    }

    /// Parse a timestamp from an RFC 3339 string.
    ///
    /// Only the `Z` suffix is accepted; explicit offsets, including `+00:00`,
    /// are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`InspError::InvalidTimestamp`] if the string is not valid
    /// RFC 3339 or does not end in `Z`.
    pub fn parse(s: &str) -> Result<Self, InspError> {
        if !s.ends_with('Z') {
            return Err(InspError::InvalidTimestamp(format!(
                "timestamp must use Z suffix (UTC only), got: {s:?}"
            )));
        }

        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            InspError::InvalidTimestamp(format!("invalid RFC 3339 timestamp {s:?}: {e}"))
        })?;

        Ok(Self::from_utc(dt.with_timezone(&Utc)))
    }

    /// Create a timestamp from Unix epoch milliseconds.
    pub fn from_epoch_millis(millis: i64) -> Result<Self, InspError> {
        let dt = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
            InspError::InvalidTimestamp(format!("invalid Unix timestamp: {millis}ms"))
        })?;
        Ok(Self(dt))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Unix epoch timestamp in milliseconds.
    pub fn epoch_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Milliseconds elapsed from `earlier` to `self`. Negative if `earlier` is later.
    pub fn millis_since(&self, earlier: Timestamp) -> i64 {
        (self.0 - earlier.0).num_milliseconds()
    }

    /// This instant shifted forward by `millis` (backward if negative).
    ///
    /// Saturates at `self` if the result would leave chrono's range.
    pub fn plus_millis(&self, millis: i64) -> Self {
        self.0
            .checked_add_signed(Duration::milliseconds(millis))
            .map(Self)
            .unwrap_or(*self)
    }

    /// Render as RFC 3339 with millisecond precision and Z suffix
    /// (e.g., `2026-01-15T12:00:00.250Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_utc(dt)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_millis(dt: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or(dt)
}

// ─── Clocks ──────────────────────────────────────────────────────────

/// Source of the current instant for lifecycle transitions.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// The current instant.
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and give
/// another to the component under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    current: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Arc::new(Mutex::new(start)),
        }
    }

    /// Move the clock to `instant`. Moving backwards is allowed.
    pub fn set(&self, instant: Timestamp) {
        *self.current.lock() = instant;
    }

    /// Advance the clock by `millis` milliseconds.
    pub fn advance_millis(&self, millis: i64) {
        let mut current = self.current.lock();
        *current = current.plus_millis(millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.lock()
    }
}
