//! # Admin Facade
//!
//! Multi-step operations over the registry and the factory, run on behalf
//! of one admin:
//!
//! - `setup_location_with_inspector`: create and register a location and
//!   an inspector in one call.
//! - `system_report`: location and user counts.
//! - `bulk_update_location_status`: set the status of every location
//!   whose name is listed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use insp_core::{Location, LocationStatus};
use insp_registry::{Admin, Category, Registry};
use insp_state::Inspector;

use crate::factory::UserFactory;

/// The entities created by [`AdminFacade::setup_location_with_inspector`].
#[derive(Debug, Clone)]
pub struct LocationAssignment {
    pub location: Location,
    pub inspector: Arc<Inspector>,
}

/// Counts derived from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SystemReport {
    pub total_locations: usize,
    pub active_locations: usize,
    pub inactive_locations: usize,
    pub total_inspectors: usize,
    pub total_admins: usize,
}

/// Simplified entry point for managing locations and inspectors.
#[derive(Debug, Clone)]
pub struct AdminFacade {
    registry: Registry,
    factory: UserFactory,
    admin: Arc<Admin>,
}

impl AdminFacade {
    /// Build the facade's admin through a default factory and register it.
    pub fn new(registry: Registry, name: impl Into<String>, age: u32, email: impl Into<String>) -> Self {
        Self::with_factory(registry, UserFactory::new(), name, age, email)
    }

    /// As [`AdminFacade::new`], with inspectors built by `factory`.
    pub fn with_factory(
        registry: Registry,
        factory: UserFactory,
        name: impl Into<String>,
        age: u32,
        email: impl Into<String>,
    ) -> Self {
        let admin = registry.register_admin(factory.create_admin(name, age, email));
        tracing::info!(admin = %admin.name(), "admin facade ready");
        Self {
            registry,
            factory,
            admin,
        }
    }

    pub fn admin(&self) -> &Arc<Admin> {
        &self.admin
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn factory(&self) -> &UserFactory {
        &self.factory
    }

    /// Create an active location and an inspector, and register both.
    ///
    /// The location goes in through the admin; the inspector is registered
    /// directly. Both land in the same registry.
    pub fn setup_location_with_inspector(
        &self,
        location_name: impl Into<String>,
        coordinates: impl Into<String>,
        inspector_name: impl Into<String>,
        inspector_age: u32,
        inspector_email: impl Into<String>,
    ) -> LocationAssignment {
        let location = Location::with_status(location_name, coordinates, LocationStatus::Active);
        self.admin.create_location(&self.registry, location.clone());

        let inspector = self
            .factory
            .create_inspector(inspector_name, inspector_age, inspector_email);
        let inspector = self.registry.register_inspector(inspector);

        tracing::info!(
            location = %location.name,
            inspector = %inspector.name(),
            "location set up with inspector"
        );
        LocationAssignment {
            location,
            inspector,
        }
    }

    /// Location, inspector, and admin counts. Reads only.
    pub fn system_report(&self) -> SystemReport {
        let total_locations = self.registry.len(Category::Locations);
        let active_locations = self.registry.count_locations(Location::is_active);
        let inactive_locations = self
            .registry
            .count_locations(|l| l.status == LocationStatus::Inactive);

        SystemReport {
            total_locations,
            active_locations,
            inactive_locations,
            total_inspectors: self.registry.len(Category::Inspectors),
            total_admins: self.registry.len(Category::Admins),
        }
    }

    /// Set `new_status` on every location whose name is in `names`.
    ///
    /// Names match exactly. A name may match several locations (all are
    /// updated) or none. Returns the matched locations, in registry order,
    /// with their new status.
    pub fn bulk_update_location_status<S: AsRef<str>>(
        &self,
        names: &[S],
        new_status: LocationStatus,
    ) -> Vec<Location> {
        let updated = self.registry.update_locations(|location| {
            if names.iter().any(|n| n.as_ref() == location.name) {
                location.status = new_status;
                true
            } else {
                false
            }
        });
        tracing::info!(
            requested = names.len(),
            updated = updated.len(),
            status = %new_status,
            "bulk location status update"
        );
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_facade() -> AdminFacade {
        AdminFacade::new(Registry::new(), "Carlos", 25, "carlos@ejemplo.com")
    }

    #[test]
    fn test_new_registers_admin() {
        let f = make_facade();
        assert_eq!(f.registry().len(Category::Admins), 1);
        assert_eq!(f.admin().name(), "Carlos");
        assert_eq!(f.system_report().total_admins, 1);
    }

    #[test]
    fn test_setup_location_with_inspector() {
        let f = make_facade();
        let a = f.setup_location_with_inspector(
            "Parque Central",
            "19.4326,-99.1332",
            "Laura",
            31,
            "laura@ejemplo.com",
        );

        assert_eq!(a.location.status, LocationStatus::Active);
        assert!(a.inspector.can_start_inspection());
        assert_eq!(f.registry().list_locations(), vec![a.location.clone()]);
        assert_eq!(f.registry().len(Category::Inspectors), 1);
        assert!(Arc::ptr_eq(
            &f.registry().find_inspector("Laura").unwrap(),
            &a.inspector
        ));
    }

    #[test]
    fn test_system_report_counts() {
        let f = make_facade();
        f.setup_location_with_inspector("Parque Central", "0,0", "Laura", 31, "l@e.com");
        f.setup_location_with_inspector("Plaza Mayor", "0,0", "Diego", 28, "d@e.com");
        f.bulk_update_location_status(&["Plaza Mayor"], LocationStatus::Inactive);

        assert_eq!(
            f.system_report(),
            SystemReport {
                total_locations: 2,
                active_locations: 1,
                inactive_locations: 1,
                total_inspectors: 2,
                total_admins: 1,
            }
        );
    }

    #[test]
    fn test_bulk_update_matches_exact_names() {
        let f = make_facade();
        f.admin()
            .create_location(f.registry(), Location::new("Parque Central", "0,0"));
        f.admin()
            .create_location(f.registry(), Location::new("Plaza Mayor", "0,0"));

        let updated = f.bulk_update_location_status(&["Plaza Mayor"], LocationStatus::Inactive);
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].name, "Plaza Mayor");
        assert_eq!(updated[0].status, LocationStatus::Inactive);
        assert_eq!(
            f.registry().find_location("Parque Central").unwrap().status,
            LocationStatus::Active
        );

        let none = f.bulk_update_location_status(&["plaza mayor"], LocationStatus::Active);
        assert!(none.is_empty());
    }

    #[test]
    fn test_bulk_update_hits_every_duplicate() {
        let f = make_facade();
        for _ in 0..3 {
            f.admin()
                .create_location(f.registry(), Location::new("Mercado", "0,0"));
        }
        let names = vec!["Mercado".to_string(), "Inexistente".to_string()];
        let updated = f.bulk_update_location_status(names.as_slice(), LocationStatus::Inactive);
        assert_eq!(updated.len(), 3);
        assert_eq!(f.system_report().inactive_locations, 3);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(SystemReport::default()).unwrap();
        assert_eq!(json["total_locations"], 0);
        assert_eq!(json["total_admins"], 0);
    }
}
