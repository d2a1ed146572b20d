//! # User Factory
//!
//! Builds the right user subtype from a [`UserKind`]. Construction only:
//! the factory never touches the registry.
//!
//! `UserKind` is a closed enum, so typed calls cannot fail. The
//! `UnsupportedUserKind` error surfaces when the kind arrives as text,
//! through [`UserFactory::create_user_from_tag`].

use std::sync::Arc;

use insp_core::{Clock, InspError, SystemClock, User, UserKind};
use insp_registry::Admin;
use insp_state::Inspector;

/// A freshly built user of either subtype.
#[derive(Debug)]
pub enum CreatedUser {
    Admin(Admin),
    Inspector(Inspector),
}

impl CreatedUser {
    pub fn kind(&self) -> UserKind {
        match self {
            Self::Admin(_) => UserKind::Admin,
            Self::Inspector(_) => UserKind::Inspector,
        }
    }

    pub fn profile(&self) -> &User {
        match self {
            Self::Admin(a) => a.profile(),
            Self::Inspector(i) => i.profile(),
        }
    }

    pub fn into_admin(self) -> Option<Admin> {
        match self {
            Self::Admin(a) => Some(a),
            Self::Inspector(_) => None,
        }
    }

    pub fn into_inspector(self) -> Option<Inspector> {
        match self {
            Self::Inspector(i) => Some(i),
            Self::Admin(_) => None,
        }
    }
}

/// Constructs admins and inspectors.
///
/// Inspectors it builds read time from the factory's clock.
#[derive(Debug, Clone)]
pub struct UserFactory {
    clock: Arc<dyn Clock>,
}

impl Default for UserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserFactory {
    /// A factory whose inspectors use the wall clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Build a user of the given kind.
    ///
    /// Dispatches to [`UserFactory::create_admin`] or
    /// [`UserFactory::create_inspector`], so both entry points build
    /// identical users.
    pub fn create_user(
        &self,
        kind: UserKind,
        name: impl Into<String>,
        age: u32,
        email: impl Into<String>,
    ) -> CreatedUser {
        match kind {
            UserKind::Admin => CreatedUser::Admin(self.create_admin(name, age, email)),
            UserKind::Inspector => CreatedUser::Inspector(self.create_inspector(name, age, email)),
        }
    }

    /// Build a user from a textual kind tag.
    ///
    /// # Errors
    ///
    /// [`InspError::UnsupportedUserKind`] if `tag` names no known kind.
    pub fn create_user_from_tag(
        &self,
        tag: &str,
        name: impl Into<String>,
        age: u32,
        email: impl Into<String>,
    ) -> Result<CreatedUser, InspError> {
        let kind: UserKind = tag.parse()?;
        Ok(self.create_user(kind, name, age, email))
    }

    /// Build an admin. The kind is fixed, so the result needs no unwrapping.
    pub fn create_admin(&self, name: impl Into<String>, age: u32, email: impl Into<String>) -> Admin {
        Admin::new(User::new(name, age, email))
    }

    /// Build an inspector reading time from the factory's clock.
    pub fn create_inspector(
        &self,
        name: impl Into<String>,
        age: u32,
        email: impl Into<String>,
    ) -> Inspector {
        Inspector::with_clock(User::new(name, age, email), Arc::clone(&self.clock))
    }
}
