//! Planner statistics collection and reporting.
//!
//! Node counts are passed through from each level's planner, never
//! computed by the hierarchy itself.

use std::time::Duration;

use pathforge_core::Quotient;

use crate::hierarchy::{Hierarchy, Level};

/// Statistics for a single level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelStatistics {
    /// Index of this level (0 = coarsest).
    pub level: usize,
    /// Dimension of the level's space.
    pub dimension: usize,
    /// Samples accepted into the level's search structure.
    pub feasible_nodes: usize,
    /// Samples drawn on the level.
    pub total_nodes: usize,
    /// Quanta spent on the level since the last clear.
    pub quanta: u64,
    /// Solving time at which the level was solved.
    pub solved_after: Option<Duration>,
}

impl LevelStatistics {
    pub(crate) fn of<Q: Quotient>(level: &Level<Q>) -> Self {
        Self {
            level: level.index(),
            dimension: level.dimension(),
            feasible_nodes: level.feasible_node_count(),
            total_nodes: level.total_node_count(),
            quanta: level.quanta(),
            solved_after: level.solved_after(),
        }
    }

    pub fn is_solved(&self) -> bool {
        self.solved_after.is_some()
    }

    /// Fraction of drawn samples that were accepted.
    pub fn acceptance_rate(&self) -> f64 {
        if self.total_nodes == 0 {
            0.0
        } else {
            self.feasible_nodes as f64 / self.total_nodes as f64
        }
    }
}

/// Statistics of a whole hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerStatistics {
    /// Solving time accumulated over all `solve` calls since the last clear.
    pub total_duration: Duration,
    /// Per-level statistics, coarsest first.
    pub levels: Vec<LevelStatistics>,
}

impl PlannerStatistics {
    pub(crate) fn collect<Q: Quotient>(hierarchy: &Hierarchy<Q>, total_duration: Duration) -> Self {
        Self {
            total_duration,
            levels: hierarchy.iter().map(LevelStatistics::of).collect(),
        }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn total_feasible_nodes(&self) -> usize {
        self.levels.iter().map(|l| l.feasible_nodes).sum()
    }

    pub fn total_nodes(&self) -> usize {
        self.levels.iter().map(|l| l.total_nodes).sum()
    }

    pub fn total_quanta(&self) -> u64 {
        self.levels.iter().map(|l| l.quanta).sum()
    }

    pub fn solved_levels(&self) -> usize {
        self.levels.iter().filter(|l| l.is_solved()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(level: usize, feasible: usize, total: usize, solved: bool) -> LevelStatistics {
        LevelStatistics {
            level,
            dimension: 2 * (level + 1),
            feasible_nodes: feasible,
            total_nodes: total,
            quanta: feasible as u64,
            solved_after: solved.then(|| Duration::from_millis(level as u64)),
        }
    }

    #[test]
    fn test_totals() {
        let stats = PlannerStatistics {
            total_duration: Duration::from_millis(5),
            levels: vec![level(0, 3, 6, true), level(1, 2, 4, false)],
        };

        assert_eq!(stats.level_count(), 2);
        assert_eq!(stats.total_feasible_nodes(), 5);
        assert_eq!(stats.total_nodes(), 10);
        assert_eq!(stats.total_quanta(), 5);
        assert_eq!(stats.solved_levels(), 1);
    }

    #[test]
    fn test_acceptance_rate() {
        assert_eq!(level(0, 0, 0, false).acceptance_rate(), 0.0);
        assert_eq!(level(0, 1, 4, false).acceptance_rate(), 0.25);
    }
}
