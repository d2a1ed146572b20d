//! # Users
//!
//! The `User` profile shared by every role in the system, and the
//! `UserKind` discriminant the factory dispatches on.

use serde::{Deserialize, Serialize};

use crate::error::InspError;

/// Identity fields common to admins and inspectors. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    name: String,
    age: u32,
    email: String,
}

impl User {
    /// Create a user profile.
    pub fn new(name: impl Into<String>, age: u32, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            email: email.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Display for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// The user subtypes the factory can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserKind {
    /// Manages locations.
    Admin,
    /// Performs inspections.
    Inspector,
}

impl UserKind {
    /// The tag used in configuration and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Inspector => "inspector",
        }
    }
}

impl std::fmt::Display for UserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserKind {
    type Err = InspError;

    /// Parse a kind tag, case-insensitively.
    ///
    /// # Errors
    ///
    /// [`InspError::UnsupportedUserKind`] for anything but `admin` or `inspector`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "inspector" => Ok(Self::Inspector),
            _ => Err(InspError::UnsupportedUserKind(s.to_string())),
        }
    }
}
