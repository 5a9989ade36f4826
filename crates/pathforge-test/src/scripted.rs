//! A quotient planner driven by a fixed script.
//!
//! Every level of a test hierarchy gets a [`Script`] describing the
//! importance it reports after each quantum and the quantum on which it
//! solves. All levels share an [`ExpansionLog`] recording which level was
//! expanded in which order.

use std::sync::{Arc, Mutex};

use pathforge_core::{Path, ProblemDefinition, Quotient, Result, State};

/// Shared record of expanded level indices, in expansion order.
#[derive(Debug, Clone, Default)]
pub struct ExpansionLog {
    entries: Arc<Mutex<Vec<usize>>>,
}

impl ExpansionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, level: usize) {
        self.entries.lock().unwrap().push(level);
    }

    pub fn entries(&self) -> Vec<usize> {
        self.entries.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Highest level ever expanded.
    pub fn max_level(&self) -> Option<usize> {
        self.entries.lock().unwrap().iter().copied().max()
    }
}

/// Behavior of one scripted level.
#[derive(Debug, Clone)]
pub struct Script {
    /// Importance reported before the first quantum.
    pub initial_importance: f64,
    /// Importance after quantum `i` (1-based: entry 0 applies after the first
    /// quantum); the last entry repeats.
    pub importances: Vec<f64>,
    /// Quantum (1-based) on which the level solves; never when `None`.
    pub solve_on: Option<usize>,
    /// Quantum (1-based) after which the level reports exhaustion.
    pub exhaust_after: Option<usize>,
    /// Whether `setup` fails.
    pub fail_setup: bool,
}

impl Script {
    /// Solves on quantum `n`.
    pub fn solves_on(n: usize) -> Self {
        Self {
            initial_importance: 1.0,
            importances: Vec::new(),
            solve_on: Some(n),
            exhaust_after: None,
            fail_setup: false,
        }
    }

    /// Never solves.
    pub fn never_solves() -> Self {
        Self {
            solve_on: None,
            ..Self::solves_on(1)
        }
    }

    /// Never solves and is exhausted after `n` quanta.
    pub fn exhausts_after(n: usize) -> Self {
        Self {
            exhaust_after: Some(n),
            ..Self::never_solves()
        }
    }

    pub fn with_importance(mut self, initial: f64) -> Self {
        self.initial_importance = initial;
        self
    }

    pub fn with_importances(mut self, after_each_quantum: Vec<f64>) -> Self {
        self.importances = after_each_quantum;
        self
    }

    pub fn with_failing_setup(mut self) -> Self {
        self.fail_setup = true;
        self
    }
}

/// A [`Quotient`] following a [`Script`].
///
/// Feasible nodes count quanta; total nodes count two samples per quantum.
#[derive(Debug)]
pub struct ScriptedQuotient {
    level: usize,
    dimension: usize,
    script: Script,
    log: ExpansionLog,
    quanta: usize,
    problem: Option<Arc<ProblemDefinition>>,
    parent: Option<Path>,
    solution: Option<Path>,
    setup_calls: usize,
    clear_calls: usize,
}

impl ScriptedQuotient {
    pub fn new(level: usize, dimension: usize, script: Script, log: ExpansionLog) -> Self {
        Self {
            level,
            dimension,
            script,
            log,
            quanta: 0,
            problem: None,
            parent: None,
            solution: None,
            setup_calls: 0,
            clear_calls: 0,
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn quanta(&self) -> usize {
        self.quanta
    }

    pub fn parent_solution(&self) -> Option<&Path> {
        self.parent.as_ref()
    }

    pub fn problem(&self) -> Option<&Arc<ProblemDefinition>> {
        self.problem.as_ref()
    }

    pub fn setup_calls(&self) -> usize {
        self.setup_calls
    }

    pub fn clear_calls(&self) -> usize {
        self.clear_calls
    }

    fn solved_path(&self) -> Path {
        match &self.problem {
            Some(p) => Path::new(vec![p.start().clone(), p.goal().clone()]),
            None => Path::new(vec![
                State::zeros(self.dimension),
                State::new(vec![1.0; self.dimension]),
            ]),
        }
    }
}

impl Quotient for ScriptedQuotient {
    fn setup(&mut self) -> Result<()> {
        self.setup_calls += 1;
        if self.script.fail_setup {
            return Err(pathforge_core::PathForgeError::MissingProblemDefinition {
                level: self.level,
            });
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.clear_calls += 1;
        self.quanta = 0;
        self.parent = None;
        self.solution = None;
    }

    fn set_problem_definition(&mut self, problem: Arc<ProblemDefinition>) {
        self.problem = Some(problem);
    }

    fn expand_one_quantum(&mut self) -> bool {
        self.quanta += 1;
        self.log.record(self.level);
        if self.script.solve_on == Some(self.quanta) {
            self.solution = Some(self.solved_path());
            return true;
        }
        false
    }

    fn importance(&self) -> f64 {
        if self.quanta == 0 {
            return self.script.initial_importance;
        }
        let scheduled = &self.script.importances;
        scheduled
            .get(self.quanta - 1)
            .or_else(|| scheduled.last())
            .copied()
            .unwrap_or(self.script.initial_importance)
    }

    fn feasible_node_count(&self) -> usize {
        self.quanta
    }

    fn total_node_count(&self) -> usize {
        2 * self.quanta
    }

    fn adopt_parent_solution(&mut self, path: &Path) {
        self.parent = Some(path.clone());
    }

    fn solution(&self) -> Option<Path> {
        self.solution.clone()
    }

    fn is_exhausted(&self) -> bool {
        self.script
            .exhaust_after
            .is_some_and(|n| self.quanta >= n)
    }

    fn quotient_type_name(&self) -> &'static str {
        "Scripted"
    }
}
