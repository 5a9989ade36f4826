//! PathForge Planner Engine
//!
//! This crate provides the hierarchical planner including:
//! - The level hierarchy and its priority scheduler
//! - The `MultiQuotient` solve loop
//! - Termination conditions
//! - Event system for monitoring
//! - Statistics
//! - `Qrrt`, a quotient-space RRT usable as a level planner

pub mod event;
pub mod hierarchy;
pub mod planner;
pub mod quotient;
pub mod scheduler;
pub mod scope;
pub mod statistics;
pub mod status;
pub mod termination;

pub use event::{
    CountingEventListener, LoggingEventListener, PlannerEventListener, PlannerEventSupport,
};
pub use hierarchy::{Hierarchy, Level};
pub use planner::{MultiQuotient, LEVEL_PARAM_PREFIX, STOP_LEVEL_PARAM};
pub use quotient::Qrrt;
pub use scheduler::{Scheduler, SchedulerEntry};
pub use scope::PlannerScope;
pub use statistics::{LevelStatistics, PlannerStatistics};
pub use status::{PlannerStatus, SolveState};
pub use termination::{
    termination_from_config, AndTermination, ExternalTermination, FnTermination, NoTermination,
    OrTermination, QuantumCountTermination, Termination, TimeTermination,
};
