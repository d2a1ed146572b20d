//! # Locations
//!
//! A `Location` is a named site with free-form coordinates and an
//! operational status. Its status is the only mutable field; everything
//! else is fixed at construction.

use serde::{Deserialize, Serialize};

use crate::error::InspError;

/// Operational status of a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationStatus {
    /// The location is in service.
    #[default]
    Active,
    /// The location is out of service.
    Inactive,
}

impl LocationStatus {
    /// Return the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
        }
    }
}

impl std::fmt::Display for LocationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LocationStatus {
    type Err = InspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(InspError::UnsupportedLocationStatus(s.to_string())),
        }
    }
}

/// A site that can be inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Human-readable name. Bulk status updates match on it exactly.
    pub name: String,
    /// Free-form coordinates or description.
    pub coordinates: String,
    /// Current operational status.
    pub status: LocationStatus,
}

impl Location {
    /// Create an active location.
    pub fn new(name: impl Into<String>, coordinates: impl Into<String>) -> Self {
        Self::with_status(name, coordinates, LocationStatus::Active)
    }

    /// Create a location with an explicit status.
    pub fn with_status(
        name: impl Into<String>,
        coordinates: impl Into<String>,
        status: LocationStatus,
    ) -> Self {
        Self {
            name: name.into(),
            coordinates: coordinates.into(),
            status,
        }
    }

    /// Whether the location is in service.
    pub fn is_active(&self) -> bool {
        self.status == LocationStatus::Active
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
