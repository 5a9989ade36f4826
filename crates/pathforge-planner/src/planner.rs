//! The hierarchical quotient-space planner.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use pathforge_config::PlannerConfig;
use pathforge_core::{
    ParamError, ParamKind, ParamSet, ParamValue, Path, PathForgeError, PlannerData,
    ProblemBinding, Quotient, Result, SpaceInformation,
};
use tracing::{debug, dispatcher, error, info, info_span, trace, warn, Dispatch};

use crate::event::{PlannerEventListener, PlannerEventSupport};
use crate::hierarchy::{Hierarchy, Level};
use crate::scheduler::{Scheduler, SchedulerEntry};
use crate::scope::PlannerScope;
use crate::statistics::PlannerStatistics;
use crate::status::{PlannerStatus, SolveState};
use crate::termination::Termination;

/// Name of the stop-level parameter.
pub const STOP_LEVEL_PARAM: &str = "stopLevel";

/// Prefix addressing a level's own planner parameters: `level1.range` is the
/// `range` parameter of the planner on level 1.
pub const LEVEL_PARAM_PREFIX: &str = "level";

/// Solves a sequence of nested quotient spaces, coarsest first.
///
/// Each level owns a planner of type `Q`. At every scheduling step the
/// unsolved level with the highest importance receives one expansion
/// quantum. When the lowest unsolved level finds a path, that path is handed
/// to the next level and the next level becomes eligible. Solving ends when
/// the stop level (the finest level by default) is solved, when every
/// eligible level is exhausted, or when the termination fires.
///
/// # Examples
///
/// ```
/// use pathforge_core::{ProblemDefinition, SpaceInformation};
/// use pathforge_planner::termination::TimeTermination;
/// use pathforge_planner::{MultiQuotient, PlannerStatus, Qrrt};
/// use std::sync::Arc;
///
/// let spaces = [1, 2]
///     .iter()
///     .map(|&d| Arc::new(SpaceInformation::unit_box(d, 0.0, 1.0).unwrap()))
///     .collect();
/// let mut planner = MultiQuotient::new(spaces, |level, space| {
///     Qrrt::new(level, Arc::clone(space)).with_seed(level as u64)
/// })
/// .unwrap();
///
/// planner
///     .set_problem_definition(
///         ProblemDefinition::new([0.1, 0.1], [0.9, 0.9]).with_goal_threshold(0.05),
///     )
///     .unwrap();
/// let status = planner.solve(&TimeTermination::seconds(10));
///
/// assert_eq!(status, PlannerStatus::ExactSolution);
/// assert_eq!(planner.solution().unwrap().dimension(), 2);
/// ```
#[derive(Debug)]
pub struct MultiQuotient<Q> {
    name: String,
    hierarchy: Hierarchy<Q>,
    scheduler: Scheduler,
    state: SolveState,
    current_level: usize,
    stop_level: Option<usize>,
    is_setup: bool,
    elapsed: Duration,
    events: PlannerEventSupport,
    dispatch: Option<Dispatch>,
    params: Arc<ParamSet<MultiQuotient<Q>>>,
}

impl<Q: Quotient> MultiQuotient<Q> {
    /// Builds the hierarchy, one level per space, with the planner `factory`
    /// returns for each.
    ///
    /// # Errors
    ///
    /// [`PathForgeError::EmptyHierarchy`] without spaces, and
    /// [`PathForgeError::NonMonotonicDimensions`] when a space has a smaller
    /// dimension than its predecessor.
    pub fn new<F>(spaces: Vec<Arc<SpaceInformation>>, factory: F) -> Result<Self>
    where
        F: FnMut(usize, &Arc<SpaceInformation>) -> Q,
    {
        let hierarchy = Hierarchy::new(spaces, factory)?;
        Ok(Self {
            name: pathforge_config::DEFAULT_PLANNER_NAME.to_string(),
            scheduler: Scheduler::new(hierarchy.len()),
            hierarchy,
            state: SolveState::Unsolved,
            current_level: 0,
            stop_level: None,
            is_setup: false,
            elapsed: Duration::ZERO,
            events: PlannerEventSupport::new(),
            dispatch: None,
            params: Arc::new(Self::declare_params()),
        })
    }

    /// Sets the type tag used in log output.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Routes this planner's logs to `dispatch` instead of the default
    /// subscriber.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn with_event_listener(mut self, listener: Arc<dyn PlannerEventListener>) -> Self {
        self.events.add_listener(listener);
        self
    }

    fn declare_params() -> ParamSet<Self> {
        let mut params = ParamSet::<Self>::new();
        params.declare(
            STOP_LEVEL_PARAM,
            ParamKind::Int,
            |mq: &mut Self, value| {
                let level = value.as_usize()?;
                mq.set_stop_level(level).map_err(|e| ParamError::Rejected {
                    name: STOP_LEVEL_PARAM.to_string(),
                    reason: e.to_string(),
                })
            },
            |mq: &Self| ParamValue::Int(mq.stop_level() as i64)
        );
        params
    }

    // === Lifecycle ===

    /// Binds the problem, either one definition projected onto every level
    /// or one definition per level.
    ///
    /// Rebinding is allowed at any time: every level's planner receives its
    /// new problem and all recorded progress is discarded.
    ///
    /// # Errors
    ///
    /// Count, dimension and projection mismatches. Nothing is rebound on error.
    pub fn set_problem_definition(&mut self, binding: impl Into<ProblemBinding>) -> Result<()> {
        let binding = binding.into();
        self.logged(|mq| {
            mq.hierarchy.bind(&binding)?;
            mq.reset();
            mq.is_setup = false;
            info!(
                event = "problem_bound",
                levels = mq.hierarchy.len(),
                per_level = matches!(binding, ProblemBinding::PerLevel(_))
            );
            Ok(())
        })
    }

    /// Sets up every level's planner. Does nothing if already set up.
    ///
    /// `solve` calls this on first use, so calling it explicitly only serves
    /// to surface setup errors early.
    pub fn setup(&mut self) -> Result<()> {
        self.logged(Self::setup_levels)
    }

    fn setup_levels(&mut self) -> Result<()> {
        if self.is_setup {
            return Ok(());
        }
        self.hierarchy.setup()?;
        self.is_setup = true;
        debug!(
            event = "setup",
            levels = self.hierarchy.len(),
            dimensions = ?self.hierarchy.dimensions(),
            stop_level = self.stop_level()
        );
        Ok(())
    }

    /// Discards all recorded solutions and search state.
    ///
    /// The hierarchy, the bound problems and the stop level survive. Safe to
    /// call at any time, any number of times.
    pub fn clear(&mut self) {
        self.logged(Self::reset);
    }

    fn reset(&mut self) {
        self.hierarchy.clear();
        self.scheduler.clear();
        self.current_level = 0;
        self.state = SolveState::Unsolved;
        self.elapsed = Duration::ZERO;
        debug!(event = "clear", levels = self.hierarchy.len());
    }

    // === Solving ===

    /// Runs the scheduling loop until the stop level is solved, no level can
    /// make progress, or `termination` fires.
    ///
    /// Never fails: setup errors are logged and reported as
    /// [`PlannerStatus::Unknown`]. A later call resumes where this one ended
    /// unless the planner is cleared in between.
    pub fn solve<T>(&mut self, termination: &T) -> PlannerStatus
    where
        T: Termination + ?Sized,
    {
        self.logged(|mq| mq.run(termination))
    }

    fn run<T>(&mut self, termination: &T) -> PlannerStatus
    where
        T: Termination + ?Sized,
    {
        if let Err(e) = self.setup_levels() {
            error!(event = "setup_failed", error = %e, "Planner could not be set up");
            self.events.fire_solving_ended(PlannerStatus::Unknown);
            return PlannerStatus::Unknown;
        }

        let stop = self.stop_level();
        let mut scope = PlannerScope::new(self.hierarchy.len());
        scope.start_solving();

        info!(
            event = "solve_start",
            levels = self.hierarchy.len(),
            current_level = self.current_level,
            stop_level = stop
        );
        self.events.fire_solving_started(self.current_level);

        self.state = loop {
            if self.advance(stop) {
                break SolveState::Solved;
            }
            scope.set_progress(self.current_level, self.solved_level_count());
            if termination.is_terminated(&scope) {
                break SolveState::Cancelled;
            }
            let Some(entry) = self.scheduler.pop() else {
                break SolveState::Exhausted;
            };
            scope.increment_quantum_count();
            let elapsed = self.elapsed + scope.elapsed().unwrap_or_default();
            self.run_quantum(entry, elapsed);
        };

        let spent = scope.elapsed().unwrap_or_default();
        self.elapsed += spent;
        let status = self.status_for(stop);

        info!(
            event = "solve_end",
            status = %status,
            state = %self.state,
            current_level = self.current_level,
            quanta = scope.quantum_count(),
            duration_ms = spent.as_millis() as u64
        );
        self.events.fire_solving_ended(status);
        status
    }

    /// Hands solved levels off upward until the stop level or the first
    /// unsolved level. Returns true when the stop level is solved.
    fn advance(&mut self, stop: usize) -> bool {
        loop {
            let level = self.current_level;
            if level > stop {
                // Stop level lowered below progress: every level under
                // `current_level` is solved.
                return true;
            }
            let Some(path) = self.hierarchy.level(level).solution().cloned() else {
                self.enqueue_current();
                return false;
            };
            if level == stop {
                return true;
            }
            self.hierarchy.level_mut(level + 1).adopt(&path);
            self.current_level = level + 1;
            debug!(
                event = "handoff",
                from = level,
                to = level + 1,
                states = path.len()
            );
        }
    }

    /// Queues the current level unless it is queued, solved or exhausted.
    fn enqueue_current(&mut self) {
        let level = self.hierarchy.level(self.current_level);
        if level.is_solved() || level.is_exhausted() || self.scheduler.contains(level.index()) {
            return;
        }
        let importance = level.importance();
        self.scheduler.push(level.index(), importance);
        debug!(event = "enqueue", level = level.index(), importance);
    }

    fn run_quantum(&mut self, entry: SchedulerEntry, elapsed: Duration) {
        trace!(
            event = "schedule",
            level = entry.level,
            importance = entry.importance,
            queued = self.scheduler.len()
        );
        let level = self.hierarchy.level_mut(entry.level);
        if level.expand(elapsed) {
            info!(
                event = "level_solved",
                level = entry.level,
                dimension = level.dimension(),
                quanta = level.quanta(),
                feasible_nodes = level.feasible_node_count(),
                elapsed_ms = elapsed.as_millis() as u64
            );
            if let Some(path) = level.solution() {
                self.events.fire_level_solved(entry.level, path);
            }
        } else if level.is_exhausted() {
            warn!(
                event = "level_exhausted",
                level = entry.level,
                quanta = level.quanta(),
                total_nodes = level.total_node_count(),
                "Level can make no further progress"
            );
        } else {
            let importance = level.importance();
            self.scheduler.push(entry.level, importance);
            trace!(event = "rerank", level = entry.level, importance);
        }
    }

    fn status_for(&self, stop: usize) -> PlannerStatus {
        match self.state {
            SolveState::Solved if stop == self.hierarchy.last_index() => {
                PlannerStatus::ExactSolution
            }
            SolveState::Solved => PlannerStatus::ApproximateSolution,
            SolveState::Cancelled => PlannerStatus::Timeout,
            SolveState::Exhausted | SolveState::Unsolved => PlannerStatus::Unknown,
        }
    }

    fn solved_level_count(&self) -> usize {
        self.hierarchy.iter().filter(|l| l.is_solved()).count()
    }

    /// Runs `f` inside this planner's span, on the injected dispatcher if any.
    fn logged<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        match self.dispatch.clone() {
            Some(dispatch) => dispatcher::with_default(&dispatch, || self.in_span(f)),
            None => self.in_span(f),
        }
    }

    fn in_span<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let span = info_span!("multi_quotient", planner = %self.name);
        let _enter = span.enter();
        f(self)
    }

    // === Stop level ===

    /// Restricts solving to levels `0..=level`.
    ///
    /// # Errors
    ///
    /// [`PathForgeError::StopLevelOutOfRange`] unless `level < level_count()`.
    pub fn set_stop_level(&mut self, level: usize) -> Result<()> {
        if level >= self.hierarchy.len() {
            return Err(PathForgeError::StopLevelOutOfRange {
                level,
                levels: self.hierarchy.len(),
            });
        }
        self.stop_level = Some(level);
        Ok(())
    }

    /// The effective stop level: the configured one, or the finest level.
    pub fn stop_level(&self) -> usize {
        self.stop_level.unwrap_or(self.hierarchy.last_index())
    }

    // === Named parameters ===

    /// Sets a parameter from its string form.
    ///
    /// Names of the form `level<k>.<name>` are forwarded to the planner of
    /// level `k`. Returns false and logs a warning when the parameter is
    /// unknown or the value is rejected; the previous value is kept.
    pub fn set_param(&mut self, name: &str, value: &str) -> bool {
        if let Some((level, inner)) = split_level_param(name) {
            return self.logged(|mq| match mq.hierarchy.get_mut(level) {
                Some(l) => l.planner_mut().set_param(inner, value),
                None => {
                    warn!(parameter = name, value, "Unknown parameter '{}'", name);
                    false
                }
            });
        }
        let params = Arc::clone(&self.params);
        self.logged(|mq| params.set_param(mq, name, value))
    }

    pub fn get_param(&self, name: &str) -> Option<String> {
        match split_level_param(name) {
            Some((level, inner)) => self.hierarchy.get(level)?.planner().get_param(inner),
            None => self.params.get_param(self, name),
        }
    }

    /// Own parameters plus every level's planner parameters, the latter
    /// under their `level<k>.` prefix.
    pub fn get_params(&self) -> BTreeMap<String, String> {
        let mut params = self.params.get_params(self);
        for level in &self.hierarchy {
            params.extend(level.planner().get_params().into_iter().map(|(name, value)| {
                (format!("{}{}.{}", LEVEL_PARAM_PREFIX, level.index(), name), value)
            }));
        }
        params
    }

    pub fn param_names(&self) -> Vec<String> {
        self.get_params().into_keys().collect()
    }

    /// Applies the name, stop level and raw parameter overrides of `config`.
    ///
    /// Parameter overrides that fail are logged and skipped.
    ///
    /// # Errors
    ///
    /// [`PathForgeError::StopLevelOutOfRange`] for an out-of-range stop level.
    pub fn apply_config(&mut self, config: &PlannerConfig) -> Result<()> {
        if let Some(name) = &config.name {
            self.name = name.clone();
        }
        if let Some(level) = config.stop_level {
            self.set_stop_level(level)?;
        }
        let applied = config
            .params
            .iter()
            .fold(true, |ok, (name, value)| self.set_param(name, value) && ok);
        if !applied {
            self.logged(|_| {
                warn!(event = "config_params", "Some parameter overrides were not applied");
            });
        }
        Ok(())
    }

    // === Introspection ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> SolveState {
        self.state
    }

    /// The lowest unsolved level, or the stop level once it is solved.
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn is_setup(&self) -> bool {
        self.is_setup
    }

    pub fn level_count(&self) -> usize {
        self.hierarchy.len()
    }

    pub fn feasible_nodes(&self) -> Vec<usize> {
        self.hierarchy.iter().map(Level::feasible_node_count).collect()
    }

    pub fn nodes(&self) -> Vec<usize> {
        self.hierarchy.iter().map(Level::total_node_count).collect()
    }

    pub fn dimensions_per_level(&self) -> Vec<usize> {
        self.hierarchy.dimensions()
    }

    /// The final answer: the stop level's path, if it is solved.
    pub fn solution(&self) -> Option<&Path> {
        self.level_solution(self.stop_level())
    }

    /// The path of the finest solved level, whatever the outcome.
    pub fn best_solution(&self) -> Option<&Path> {
        self.hierarchy.iter().rev().find_map(Level::solution)
    }

    pub fn level_solution(&self, level: usize) -> Option<&Path> {
        self.hierarchy.get(level).and_then(Level::solution)
    }

    pub fn level_solutions(&self) -> Vec<Option<&Path>> {
        self.hierarchy.iter().map(Level::solution).collect()
    }

    /// The search graphs of every level, vertices tagged with their level.
    pub fn planner_data(&self) -> PlannerData {
        let mut data = PlannerData::new();
        for level in &self.hierarchy {
            let mut part = PlannerData::new();
            level.planner().planner_data(&mut part);
            data.append_level(level.index(), part);
        }
        data
    }

    pub fn statistics(&self) -> PlannerStatistics {
        PlannerStatistics::collect(&self.hierarchy, self.elapsed)
    }

    pub fn levels(&self) -> &Hierarchy<Q> {
        &self.hierarchy
    }

    /// Mutable access to a level, to configure its planner.
    pub fn level_mut(&mut self, level: usize) -> Option<&mut Level<Q>> {
        self.hierarchy.get_mut(level)
    }
}

/// Splits `level<k>.<name>` into `k` and `name`.
fn split_level_param(name: &str) -> Option<(usize, &str)> {
    let (level, inner) = name.strip_prefix(LEVEL_PARAM_PREFIX)?.split_once('.')?;
    Some((level.parse().ok()?, inner))
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
