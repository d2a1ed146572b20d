//! # Admin
//!
//! An admin is a [`User`] who manages locations. Location listings are
//! global: there is one logical registry, so every admin sees every
//! registered location.

use serde::{Deserialize, Serialize};

use insp_core::{Location, User};

use crate::registry::Registry;

/// A user who registers and lists locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    profile: User,
}

impl Admin {
    pub fn new(profile: User) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &User {
        &self.profile
    }

    pub fn name(&self) -> &str {
        self.profile.name()
    }

    /// Register `location` in the shared registry.
    pub fn create_location(&self, registry: &Registry, location: Location) {
        tracing::debug!(admin = %self.name(), location = %location.name, "admin creating location");
        registry.register_location(location);
    }

    /// Every registered location, in insertion order.
    pub fn list_locations(&self, registry: &Registry) -> Vec<Location> {
        registry.list_locations()
    }
}
