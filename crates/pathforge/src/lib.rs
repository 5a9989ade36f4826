//! PathForge - hierarchical quotient-space motion planning.
//!
//! A problem is solved on a sequence of nested quotient spaces of
//! increasing dimension. Coarse solutions guide the search on the next,
//! finer space; a priority scheduler decides which level gets the next
//! expansion quantum.
//!
//! # Example
//!
//! ```
//! use pathforge::prelude::*;
//! use std::sync::Arc;
//!
//! let spaces: Vec<_> = [2, 4]
//!     .iter()
//!     .map(|&d| Arc::new(SpaceInformation::unit_box(d, 0.0, 1.0).unwrap()))
//!     .collect();
//! let config = PlannerConfig::new().with_random_seed(1);
//!
//! let mut planner = MultiQuotient::new(spaces, Qrrt::factory(&config)).unwrap();
//! planner
//!     .set_problem_definition(
//!         ProblemDefinition::new([0.1; 4], [0.9; 4]).with_goal_threshold(0.05),
//!     )
//!     .unwrap();
//!
//! let status = planner.solve(&TimeTermination::seconds(30));
//! assert!(status.has_solution());
//! ```

pub use pathforge_config::{ConfigError, PlannerConfig, QrrtConfig, TerminationConfig};
pub use pathforge_core::{
    Bounds, ParamError, ParamKind, ParamSet, ParamValue, Path, PathForgeError, PlannerData,
    PlannerDataVertex, ProblemBinding, ProblemDefinition, Quotient, Result, SpaceInformation,
    State, StateValidityChecker,
};
pub use pathforge_planner::{
    termination, termination_from_config, CountingEventListener, LoggingEventListener,
    MultiQuotient, PlannerEventListener, PlannerStatistics, PlannerStatus, Qrrt, SolveState,
    LEVEL_PARAM_PREFIX, STOP_LEVEL_PARAM,
};

#[cfg(feature = "console")]
pub mod console;

/// Commonly used items.
pub mod prelude {
    pub use pathforge_config::PlannerConfig;
    pub use pathforge_core::{Path, ProblemDefinition, Quotient, SpaceInformation, State};
    pub use pathforge_planner::termination::{
        ExternalTermination, FnTermination, NoTermination, QuantumCountTermination, Termination,
        TimeTermination,
    };
    pub use pathforge_planner::{MultiQuotient, PlannerStatus, Qrrt, SolveState};
}
