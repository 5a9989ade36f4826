//! The capability every single-level planner provides to the hierarchy.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

use tracing::warn;

use crate::error::Result;
use crate::planner_data::PlannerData;
use crate::problem::ProblemDefinition;
use crate::state::Path;

/// A planner working on one quotient space (one level of the hierarchy).
///
/// The hierarchical scheduler never looks inside a level's search: it asks
/// for an importance score, hands out one bounded expansion quantum at a
/// time, and forwards the accepted solution of the coarser level through
/// [`adopt_parent_solution`](Quotient::adopt_parent_solution).
///
/// How much work one quantum performs is the implementation's own policy.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pathforge_core::{Path, ProblemDefinition, Quotient, State};
///
/// /// Solves on the third quantum.
/// #[derive(Debug, Default)]
/// struct Countdown { quanta: usize, goal: Option<State> }
///
/// impl Quotient for Countdown {
///     fn clear(&mut self) { self.quanta = 0; }
///     fn set_problem_definition(&mut self, problem: Arc<ProblemDefinition>) {
///         self.goal = Some(problem.goal().clone());
///     }
///     fn expand_one_quantum(&mut self) -> bool { self.quanta += 1; self.quanta >= 3 }
///     fn importance(&self) -> f64 { 1.0 / (self.quanta as f64 + 1.0) }
///     fn feasible_node_count(&self) -> usize { self.quanta }
///     fn total_node_count(&self) -> usize { self.quanta }
///     fn adopt_parent_solution(&mut self, _path: &Path) {}
///     fn solution(&self) -> Option<Path> {
///         (self.quanta >= 3).then(|| Path::new(self.goal.iter().cloned().collect()))
///     }
///     fn quotient_type_name(&self) -> &'static str { "Countdown" }
/// }
///
/// let mut q = Countdown::default();
/// assert!(!q.expand_one_quantum());
/// assert!(!q.expand_one_quantum());
/// assert!(q.expand_one_quantum());
/// assert!(q.solution().is_some());
/// ```
pub trait Quotient: Send + Debug {
    /// Prepares the planner once its problem is bound.
    fn setup(&mut self) -> Result<()> {
        Ok(())
    }

    /// Drops all search state: tree, counters, adopted parent path and solution.
    /// Parameters and the bound problem survive.
    fn clear(&mut self);

    /// Binds (or rebinds) the problem this level plans for.
    fn set_problem_definition(&mut self, problem: Arc<ProblemDefinition>);

    /// Performs one bounded unit of work.
    ///
    /// Returns true when this quantum produced a feasible path for the level.
    fn expand_one_quantum(&mut self) -> bool;

    /// Expansion-worthiness; higher means the level should be expanded sooner.
    fn importance(&self) -> f64;

    /// Samples accepted into the search structure.
    fn feasible_node_count(&self) -> usize;

    /// Samples drawn, feasible or not.
    fn total_node_count(&self) -> usize;

    /// Receives the accepted path of the next coarser level, to bias or
    /// restrict sampling. Never called on level 0.
    fn adopt_parent_solution(&mut self, path: &Path);

    /// The level's solution path, once found.
    fn solution(&self) -> Option<Path>;

    /// True when the planner cannot make further progress (e.g. its sample
    /// budget is spent). An exhausted level is dropped from scheduling.
    fn is_exhausted(&self) -> bool {
        false
    }

    /// Appends this planner's search graph to `data`, indices relative to
    /// the vertices it adds. Planners without an exportable graph add nothing.
    fn planner_data(&self, _data: &mut PlannerData) {}

    /// Sets one of this planner's named parameters from its string form.
    ///
    /// Returns false, keeping the previous value, when the parameter is
    /// unknown or the value is rejected.
    fn set_param(&mut self, name: &str, value: &str) -> bool {
        warn!(
            parameter = name,
            value,
            "{} has no parameter '{}'",
            self.quotient_type_name(),
            name
        );
        false
    }

    /// Current value of a named parameter.
    fn get_param(&self, _name: &str) -> Option<String> {
        None
    }

    /// Every named parameter and its current value.
    fn get_params(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// Returns the name of this planner type.
    fn quotient_type_name(&self) -> &'static str;
}
