//! Shared test fixtures for PathForge crates.
//!
//! This crate provides deterministic planners and spaces for testing.
//! It does NOT depend on `pathforge-planner` so the planner can use it as a
//! dev-dependency without a dependency cycle.
//!
//! - [`scripted`] - a [`Quotient`](pathforge_core::Quotient) that follows a script
//! - [`spaces`] - space and problem fixtures
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! pathforge-test = { workspace = true }
//! ```

pub mod scripted;
pub mod spaces;

pub use scripted::{ExpansionLog, Script, ScriptedQuotient};
pub use spaces::{box_spaces, diagonal_problem, unit_box};
