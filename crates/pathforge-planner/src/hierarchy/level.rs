//! One abstraction layer of the hierarchy.

use std::sync::Arc;
use std::time::Duration;

use pathforge_core::{
    Path, PathForgeError, ProblemDefinition, Quotient, Result, SpaceInformation,
};
use tracing::{trace, warn};

/// A quotient space with its problem, its owned planner and its progress.
///
/// The index and the dimension are fixed at construction.
#[derive(Debug)]
pub struct Level<Q> {
    index: usize,
    dimension: usize,
    space: Arc<SpaceInformation>,
    problem: Option<Arc<ProblemDefinition>>,
    planner: Q,
    solution: Option<Path>,
    exhausted: bool,
    quanta: u64,
    solved_after: Option<Duration>,
}

impl<Q: Quotient> Level<Q> {
    pub(crate) fn new(index: usize, space: Arc<SpaceInformation>, planner: Q) -> Self {
        Self {
            index,
            dimension: space.dimension(),
            space,
            problem: None,
            planner,
            solution: None,
            exhausted: false,
            quanta: 0,
            solved_after: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn space(&self) -> &Arc<SpaceInformation> {
        &self.space
    }

    pub fn problem(&self) -> Option<&Arc<ProblemDefinition>> {
        self.problem.as_ref()
    }

    pub fn planner(&self) -> &Q {
        &self.planner
    }

    pub fn planner_mut(&mut self) -> &mut Q {
        &mut self.planner
    }

    /// The accepted path of this level, once solved.
    pub fn solution(&self) -> Option<&Path> {
        self.solution.as_ref()
    }

    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// The planner reported it cannot make further progress.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Quanta spent on this level since the last clear.
    pub fn quanta(&self) -> u64 {
        self.quanta
    }

    /// Solving time (across `solve` calls) at which this level was solved.
    pub fn solved_after(&self) -> Option<Duration> {
        self.solved_after
    }

    pub fn importance(&self) -> f64 {
        self.planner.importance()
    }

    pub fn feasible_node_count(&self) -> usize {
        self.planner.feasible_node_count()
    }

    pub fn total_node_count(&self) -> usize {
        self.planner.total_node_count()
    }

    pub(crate) fn bind(&mut self, problem: Arc<ProblemDefinition>) {
        self.planner.set_problem_definition(Arc::clone(&problem));
        self.problem = Some(problem);
    }

    pub(crate) fn setup(&mut self) -> Result<()> {
        if self.problem.is_none() {
            return Err(PathForgeError::MissingProblemDefinition { level: self.index });
        }
        self.planner.setup()
    }

    /// Runs one quantum. Returns true when it produced this level's solution.
    pub(crate) fn expand(&mut self, elapsed: Duration) -> bool {
        self.quanta += 1;
        let solved = self.planner.expand_one_quantum();
        self.exhausted = self.planner.is_exhausted();
        trace!(
            event = "quantum",
            level = self.index,
            quanta = self.quanta,
            solved,
            exhausted = self.exhausted
        );
        if !solved {
            return false;
        }
        match self.planner.solution() {
            Some(path) => {
                self.solution = Some(path);
                self.solved_after = Some(elapsed);
                true
            }
            None => {
                warn!(
                    event = "solution_missing",
                    level = self.index,
                    planner = self.planner.quotient_type_name(),
                    "Planner reported a solution but returned no path"
                );
                false
            }
        }
    }

    pub(crate) fn adopt(&mut self, parent: &Path) {
        self.planner.adopt_parent_solution(parent);
    }

    pub(crate) fn clear(&mut self) {
        self.planner.clear();
        self.solution = None;
        self.exhausted = false;
        self.quanta = 0;
        self.solved_after = None;
    }
}
