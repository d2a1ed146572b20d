//! # insp-registry: Registry Context and the Admin Role
//!
//! Holds the process's single logical store of created entities and the
//! `Admin` role that manages locations through it.
//!
//! ## Registry
//!
//! Four append-only sequences (locations, users, admins, inspectors) kept
//! in insertion order, with no deduplication and no deletion. The registry
//! is constructed explicitly and passed to whatever needs it; there is no
//! global instance.
//!
//! ## Registration
//!
//! Building an entity never registers it. Registration is a separate,
//! explicit call, which keeps construction side-effect free.

pub mod admin;
pub mod registry;

pub use admin::Admin;
pub use registry::{Category, Registry, Sequence};
