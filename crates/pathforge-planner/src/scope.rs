//! Per-call planner scope.

use std::time::{Duration, Instant};

/// State of one `solve` call, handed to termination conditions.
///
/// Counters restart with every call; the hierarchy's progress does not.
#[derive(Debug, Clone, Default)]
pub struct PlannerScope {
    start_time: Option<Instant>,
    quantum_count: u64,
    current_level: usize,
    solved_levels: usize,
    level_count: usize,
}

impl PlannerScope {
    pub fn new(level_count: usize) -> Self {
        Self {
            level_count,
            ..Self::default()
        }
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.quantum_count = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn increment_quantum_count(&mut self) -> u64 {
        self.quantum_count += 1;
        self.quantum_count
    }

    /// Quanta handed out during this call.
    pub fn quantum_count(&self) -> u64 {
        self.quantum_count
    }

    /// Lowest level without a solution.
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn solved_levels(&self) -> usize {
        self.solved_levels
    }

    pub fn level_count(&self) -> usize {
        self.level_count
    }

    pub(crate) fn set_progress(&mut self, current_level: usize, solved_levels: usize) {
        self.current_level = current_level;
        self.solved_levels = solved_levels;
    }
}
