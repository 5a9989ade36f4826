//! PathForge Core - Core types and traits for quotient-space planning
//!
//! This crate provides the fundamental abstractions for PathForge:
//! - States and paths in real-vector configuration spaces
//! - Space information (bounds, validity checking, motion checking)
//! - Problem definitions and their projection onto quotient spaces
//! - The [`Quotient`] capability implemented by single-level planners
//! - Named parameters settable from strings
//! - Export of the planners' search graphs

pub mod error;
pub mod param;
pub mod planner_data;
pub mod problem;
pub mod quotient;
pub mod space;
pub mod state;

pub use error::{PathForgeError, Result};
pub use param::{Param, ParamError, ParamKind, ParamSet, ParamValue};
pub use planner_data::{PlannerData, PlannerDataVertex};
pub use problem::{ProblemBinding, ProblemDefinition};
pub use quotient::Quotient;
pub use space::{AllValid, Bounds, SpaceInformation, StateValidityChecker};
pub use state::{Path, State};
