//! Rapidly-exploring random tree on a quotient space.
//!
//! One quantum is one tree-extension iteration. Once the coarser level has
//! been solved, samples for the coordinates it covers are drawn along its
//! path, so the tree grows around the coarse solution.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use pathforge_config::PlannerConfig;
use pathforge_core::{
    ParamError, ParamKind, ParamSet, ParamValue, Path, PathForgeError, PlannerData,
    ProblemDefinition, Quotient, Result, SpaceInformation, State,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

/// Default extension range as a fraction of the space's maximum extent.
pub const DEFAULT_RANGE_FACTOR: f64 = 0.2;

const DEFAULT_GOAL_BIAS: f64 = 0.05;

#[derive(Debug, Clone)]
struct Vertex {
    state: State,
    parent: Option<usize>,
}

/// Quotient-space RRT.
///
/// Importance is `1 / (N + 1)` for a tree of `N` vertices, so sparse levels
/// are preferred by the scheduler.
pub struct Qrrt {
    level: usize,
    space: Arc<SpaceInformation>,
    problem: Option<Arc<ProblemDefinition>>,
    range: Option<f64>,
    goal_bias: f64,
    max_samples: Option<u64>,
    rng: StdRng,
    tree: Vec<Vertex>,
    samples: u64,
    parent_path: Option<Path>,
    solution: Option<Path>,
    params: Arc<ParamSet<Qrrt>>,
}

impl Qrrt {
    pub fn new(level: usize, space: Arc<SpaceInformation>) -> Self {
        Self {
            level,
            space,
            problem: None,
            range: None,
            goal_bias: DEFAULT_GOAL_BIAS,
            max_samples: None,
            rng: StdRng::from_os_rng(),
            tree: Vec::new(),
            samples: 0,
            parent_path: None,
            solution: None,
            params: Arc::new(Self::declare_params()),
        }
    }

    /// Builds the planner of `level` from the `qrrt` section and the seed of
    /// `config`.
    pub fn from_config(level: usize, space: Arc<SpaceInformation>, config: &PlannerConfig) -> Self {
        let mut qrrt = Self::new(level, space).with_goal_bias(config.qrrt.goal_bias);
        qrrt.range = config.qrrt.range;
        qrrt.max_samples = config.qrrt.max_samples;
        match config.level_seed(level) {
            Some(seed) => qrrt.with_seed(seed),
            None => qrrt,
        }
    }

    /// A hierarchy factory building every level from `config`.
    pub fn factory(config: &PlannerConfig) -> impl FnMut(usize, &Arc<SpaceInformation>) -> Qrrt {
        let config = config.clone();
        move |level: usize, space: &Arc<SpaceInformation>| Qrrt::from_config(level, Arc::clone(space), &config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Sets the extension range. Non-positive values are ignored.
    pub fn with_range(mut self, range: f64) -> Self {
        if range > 0.0 {
            self.range = Some(range);
        }
        self
    }

    /// Sets the goal bias, clamped to `[0, 1]`. NaN is ignored.
    pub fn with_goal_bias(mut self, goal_bias: f64) -> Self {
        if !goal_bias.is_nan() {
            self.goal_bias = goal_bias.clamp(0.0, 1.0);
        }
        self
    }

    pub fn with_max_samples(mut self, max_samples: u64) -> Self {
        self.max_samples = Some(max_samples);
        self
    }

    fn declare_params() -> ParamSet<Self> {
        let mut params = ParamSet::<Self>::new();
        params.declare(
            "range",
            ParamKind::Float,
            |q: &mut Self, value| {
                let range = value.as_float()?;
                if !(range > 0.0) {
                    return Err(ParamError::Rejected {
                        name: "range".to_string(),
                        reason: format!("must be positive, got {}", range),
                    });
                }
                q.range = Some(range);
                Ok(())
            },
            |q: &Self| ParamValue::Float(q.range()),
        );
        params.declare(
            "goal_bias",
            ParamKind::Float,
            |q: &mut Self, value| {
                let bias = value.as_float()?;
                if !(0.0..=1.0).contains(&bias) {
                    return Err(ParamError::Rejected {
                        name: "goal_bias".to_string(),
                        reason: format!("must lie in [0, 1], got {}", bias),
                    });
                }
                q.goal_bias = bias;
                Ok(())
            },
            |q: &Self| ParamValue::Float(q.goal_bias),
        );
        params
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Maximum length of one tree extension.
    pub fn range(&self) -> f64 {
        self.range
            .unwrap_or_else(|| DEFAULT_RANGE_FACTOR * self.space.maximum_extent())
    }

    pub fn goal_bias(&self) -> f64 {
        self.goal_bias
    }

    pub fn max_samples(&self) -> Option<u64> {
        self.max_samples
    }

    pub fn tree_size(&self) -> usize {
        self.tree.len()
    }

    /// The adopted path of the coarser level.
    pub fn parent_path(&self) -> Option<&Path> {
        self.parent_path.as_ref()
    }

    fn plant_root(&mut self, problem: &ProblemDefinition) -> bool {
        if !self.tree.is_empty() {
            return true;
        }
        if !self.space.is_valid(problem.start()) {
            return false;
        }
        self.tree.push(Vertex {
            state: problem.start().clone(),
            parent: None,
        });
        true
    }

    fn sample(&mut self, problem: &ProblemDefinition) -> State {
        if self.rng.random::<f64>() < self.goal_bias {
            return problem.goal().clone();
        }
        let Some(parent) = &self.parent_path else {
            return self.space.sample_uniform(&mut self.rng);
        };
        let dimension = self.space.dimension();
        let mut values: Vec<f64> = parent
            .interpolate(self.rng.random::<f64>())
            .map(|s| s.values().iter().copied().take(dimension).collect())
            .unwrap_or_default();
        for axis in values.len()..dimension {
            values.push(self.space.sample_axis(axis, &mut self.rng));
        }
        State::new(values)
    }

    fn nearest(&self, target: &State) -> usize {
        self.tree
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.state
                    .distance(target)
                    .total_cmp(&b.state.distance(target))
            })
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn trace_back(&self, mut vertex: usize) -> Path {
        let mut states = vec![self.tree[vertex].state.clone()];
        while let Some(parent) = self.tree[vertex].parent {
            states.push(self.tree[parent].state.clone());
            vertex = parent;
        }
        states.reverse();
        Path::new(states)
    }
}

impl fmt::Debug for Qrrt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Qrrt")
            .field("level", &self.level)
            .field("range", &self.range())
            .field("goal_bias", &self.goal_bias)
            .field("tree_size", &self.tree.len())
            .field("samples", &self.samples)
            .field("solved", &self.solution.is_some())
            .finish()
    }
}

impl Quotient for Qrrt {
    fn setup(&mut self) -> Result<()> {
        let problem = self
            .problem
            .clone()
            .ok_or(PathForgeError::MissingProblemDefinition { level: self.level })?;
        if !self.plant_root(&problem) {
            return Err(PathForgeError::InvalidStart { level: self.level });
        }
        debug!(
            event = "qrrt_setup",
            level = self.level,
            dimension = self.space.dimension(),
            range = self.range(),
            goal_bias = self.goal_bias
        );
        Ok(())
    }

    fn clear(&mut self) {
        self.tree.clear();
        self.samples = 0;
        self.parent_path = None;
        self.solution = None;
    }

    fn set_problem_definition(&mut self, problem: Arc<ProblemDefinition>) {
        self.problem = Some(problem);
        self.tree.clear();
        self.solution = None;
    }

    fn expand_one_quantum(&mut self) -> bool {
        if self.solution.is_some() {
            return true;
        }
        let Some(problem) = self.problem.clone() else {
            return false;
        };
        if self.is_exhausted() || !self.plant_root(&problem) {
            return false;
        }

        self.samples += 1;
        let target = self.sample(&problem);
        let nearest = self.nearest(&target);
        let from = &self.tree[nearest].state;

        let distance = from.distance(&target);
        let range = self.range();
        let new_state = if distance > range {
            from.interpolate(&target, range / distance)
        } else {
            target
        };
        if !self.space.check_motion(from, &new_state) {
            return false;
        }

        self.tree.push(Vertex {
            state: new_state,
            parent: Some(nearest),
        });
        let added = self.tree.len() - 1;
        let reached = &self.tree[added].state;
        if !problem.is_goal_satisfied(reached) {
            return false;
        }

        let mut path = self.trace_back(added);
        let goal = problem.goal();
        if path.last() != Some(goal) && self.space.check_motion(reached, goal) {
            path.push(goal.clone());
        }
        self.solution = Some(path);
        true
    }

    fn importance(&self) -> f64 {
        1.0 / (self.tree.len() as f64 + 1.0)
    }

    fn feasible_node_count(&self) -> usize {
        self.tree.len()
    }

    fn total_node_count(&self) -> usize {
        self.samples as usize
    }

    fn adopt_parent_solution(&mut self, path: &Path) {
        if path.dimension() > self.space.dimension() {
            warn!(
                event = "parent_dimension",
                level = self.level,
                parent = path.dimension(),
                own = self.space.dimension(),
                "Ignoring parent path of larger dimension"
            );
            return;
        }
        self.parent_path = Some(path.clone());
    }

    fn solution(&self) -> Option<Path> {
        self.solution.clone()
    }

    fn is_exhausted(&self) -> bool {
        self.max_samples.is_some_and(|max| self.samples >= max)
    }

    /// The tree: one edge per non-root vertex, the root as start and every
    /// vertex inside the goal region as goal.
    fn planner_data(&self, data: &mut PlannerData) {
        let offset = data.vertex_count();
        for vertex in &self.tree {
            data.add_vertex(vertex.state.clone());
        }
        for (index, vertex) in self.tree.iter().enumerate() {
            if let Some(parent) = vertex.parent {
                data.add_edge(offset + parent, offset + index);
            } else {
                data.mark_start(offset + index);
            }
            if self
                .problem
                .as_ref()
                .is_some_and(|p| p.is_goal_satisfied(&vertex.state))
            {
                data.mark_goal(offset + index);
            }
        }
    }

    fn set_param(&mut self, name: &str, value: &str) -> bool {
        let params = Arc::clone(&self.params);
        params.set_param(self, name, value)
    }

    fn get_param(&self, name: &str) -> Option<String> {
        self.params.get_param(self, name)
    }

    fn get_params(&self) -> BTreeMap<String, String> {
        self.params.get_params(self)
    }

    fn quotient_type_name(&self) -> &'static str {
        "QRRT"
    }
}

#[cfg(test)]
#[path = "qrrt_tests.rs"]
mod tests;
