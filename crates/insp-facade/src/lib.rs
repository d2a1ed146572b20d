//! # insp-facade: Creation Factory and Coordination Facade
//!
//! - **Factory** (`factory.rs`): builds an `Admin` or an `Inspector` from a
//!   `UserKind`, or from a textual tag that may be unsupported.
//! - **Facade** (`facade.rs`): composes the registry and the factory into
//!   setup, reporting, and bulk-update operations for one admin.
//!
//! ## Crate Policy
//!
//! - The factory never registers what it builds.
//! - The facade registers explicitly, and only in the registry it was
//!   given.

pub mod facade;
pub mod factory;

pub use facade::{AdminFacade, LocationAssignment, SystemReport};
pub use factory::{CreatedUser, UserFactory};
