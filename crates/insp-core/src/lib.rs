//! # insp-core: Foundational Types for the Inspection Stack
//!
//! Plain records and primitives shared by every other crate in the
//! workspace. It depends on nothing internal.
//!
//! ## Contents
//!
//! - **Users** (`user.rs`): the immutable `User` profile and the `UserKind`
//!   discriminant used by the creation factory.
//! - **Locations** (`domain.rs`): `Location` and its mutable
//!   `LocationStatus`.
//! - **Time** (`temporal.rs`): millisecond-precision UTC `Timestamp` and the
//!   `Clock` seam used by the inspection state machine.
//! - **Errors** (`error.rs`): `InspError`.
//!
//! ## Crate Policy
//!
//! - Construction has no side effects. Nothing here knows about the registry.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod domain;
pub mod error;
pub mod temporal;
pub mod user;

// Re-export primary types for ergonomic imports.
pub use domain::{Location, LocationStatus};
pub use error::InspError;
pub use temporal::{Clock, ManualClock, SystemClock, Timestamp};
pub use user::{User, UserKind};
