//! # Registry
//!
//! The single logical store of everything created in a process: locations,
//! users, admins, and inspectors, each kept as an append-only sequence in
//! insertion order.
//!
//! ## Architecture
//!
//! `Registry` is a context object, not a global. It is constructed once and
//! handed by reference (or by cheap clone, which shares the same storage)
//! to every component that needs it.
//!
//! All operations are synchronous. Each sequence sits behind a
//! `parking_lot::RwLock`, so an append is one write-locked critical section
//! and readers see either the sequence before or after it.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use insp_core::{Location, User};
use insp_state::Inspector;

use crate::admin::Admin;

// -- Append-only sequence -----------------------------------------------------

/// Thread-safe, cloneable, append-only sequence.
///
/// There is no removal path. Entries may be edited in place through
/// [`Sequence::update_each`], but never reordered or dropped.
#[derive(Debug)]
pub struct Sequence<T> {
    data: Arc<RwLock<Vec<T>>>,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T: Clone> Sequence<T> {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Append a value. Returns its zero-based insertion index.
    pub fn push(&self, value: T) -> usize {
        let mut guard = self.data.write();
        guard.push(value);
        guard.len() - 1
    }

    /// Snapshot of all entries in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.data.read().clone()
    }

    /// Run `f` over every entry under the write lock.
    ///
    /// `f` returns whether it changed the entry; the changed entries are
    /// returned, in insertion order, as they stand after the update.
    pub fn update_each(&self, mut f: impl FnMut(&mut T) -> bool) -> Vec<T> {
        let mut guard = self.data.write();
        guard
            .iter_mut()
            .filter_map(|entry| f(entry).then(|| entry.clone()))
            .collect()
    }

    /// First entry matching `pred`.
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.data.read().iter().find(|e| pred(e)).cloned()
    }

    /// Number of entries matching `pred`, without cloning.
    pub fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.data.read().iter().filter(|e| pred(e)).count()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Registry -----------------------------------------------------------------

/// The kinds of entry the registry keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Locations,
    Users,
    Admins,
    Inspectors,
}

/// Shared store of created entities, queried by category.
///
/// Cloning yields another handle on the same storage.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    locations: Sequence<Location>,
    users: Sequence<User>,
    admins: Sequence<Arc<Admin>>,
    inspectors: Sequence<Arc<Inspector>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a location. Always succeeds; no uniqueness check.
    pub fn register_location(&self, location: Location) {
        tracing::debug!(location = %location.name, status = %location.status, "location registered");
        self.locations.push(location);
    }

    /// Append a user profile.
    pub fn register_user(&self, user: User) {
        tracing::debug!(user = %user.name(), "user registered");
        self.users.push(user);
    }

    /// Append an admin. Its profile is also appended to the users.
    pub fn register_admin(&self, admin: impl Into<Arc<Admin>>) -> Arc<Admin> {
        let admin = admin.into();
        self.register_user(admin.profile().clone());
        self.admins.push(Arc::clone(&admin));
        tracing::debug!(admin = %admin.name(), "admin registered");
        admin
    }

    /// Append an inspector. Its profile is also appended to the users.
    ///
    /// The registry keeps a shared handle, so lifecycle calls made through
    /// the returned `Arc` are visible through [`Registry::list_inspectors`].
    pub fn register_inspector(&self, inspector: impl Into<Arc<Inspector>>) -> Arc<Inspector> {
        let inspector = inspector.into();
        self.register_user(inspector.profile().clone());
        self.inspectors.push(Arc::clone(&inspector));
        tracing::debug!(inspector = %inspector.name(), "inspector registered");
        inspector
    }

    pub fn list_locations(&self) -> Vec<Location> {
        self.locations.list()
    }

    pub fn list_users(&self) -> Vec<User> {
        self.users.list()
    }

    pub fn list_admins(&self) -> Vec<Arc<Admin>> {
        self.admins.list()
    }

    pub fn list_inspectors(&self) -> Vec<Arc<Inspector>> {
        self.inspectors.list()
    }

    /// Edit registered locations in place.
    ///
    /// `f` returns whether it changed the location; the changed locations
    /// are returned as they stand afterwards.
    pub fn update_locations(&self, f: impl FnMut(&mut Location) -> bool) -> Vec<Location> {
        self.locations.update_each(f)
    }

    /// Count registered locations matching `pred`.
    pub fn count_locations(&self, pred: impl Fn(&Location) -> bool) -> usize {
        self.locations.count(pred)
    }

    /// First registered inspector with the given name.
    pub fn find_inspector(&self, name: &str) -> Option<Arc<Inspector>> {
        self.inspectors.find(|i| i.name() == name)
    }

    /// First registered location with the given name.
    pub fn find_location(&self, name: &str) -> Option<Location> {
        self.locations.find(|l| l.name == name)
    }

    /// Number of entries in `category`.
    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Locations => self.locations.len(),
            Category::Users => self.users.len(),
            Category::Admins => self.admins.len(),
            Category::Inspectors => self.inspectors.len(),
        }
    }

    /// Whether nothing at all has been registered.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.users.is_empty()
            && self.admins.is_empty()
            && self.inspectors.is_empty()
    }
}
