//! # insp-cli: Inspection Stack Command-Line Interface
//!
//! A driver for exercising the stack end to end. It is a test harness, not
//! a service: everything runs in-process against a fresh registry.
//!
//! ## Subcommands
//!
//! - `demo`: the built-in walkthrough
//! - `run`: execute a YAML scenario and print the outcomes as JSON
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; behavior lives in the domain crates.
//! - Handlers return `anyhow::Result<u8>`; the exit code is the `u8`.

pub mod demo;
pub mod scenario;
