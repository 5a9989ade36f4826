//! Planner states and reported outcomes.

use std::fmt;

/// Global progress of a hierarchy across `solve` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolveState {
    /// Nothing decided yet; the initial state and the state after `clear`.
    #[default]
    Unsolved,
    /// The stop level has a solution.
    Solved,
    /// The scheduler ran dry before the stop level was solved.
    Exhausted,
    /// The termination condition fired first.
    Cancelled,
}

impl SolveState {
    /// Solved, exhausted and cancelled end a `solve` call.
    pub fn is_terminal(self) -> bool {
        !matches!(self, SolveState::Unsolved)
    }
}

/// Outcome reported by `solve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerStatus {
    /// Solved on the finest level: a path in the full configuration space.
    ExactSolution,
    /// Solved on a stop level below the finest one: a path in a quotient space.
    ApproximateSolution,
    /// The termination condition fired before the stop level was solved.
    Timeout,
    /// No level can make progress, or the planner could not be set up.
    Unknown,
}

impl PlannerStatus {
    /// True for exact and approximate solutions.
    pub fn has_solution(self) -> bool {
        matches!(
            self,
            PlannerStatus::ExactSolution | PlannerStatus::ApproximateSolution
        )
    }
}

impl fmt::Display for PlannerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlannerStatus::ExactSolution => "Exact solution",
            PlannerStatus::ApproximateSolution => "Approximate solution",
            PlannerStatus::Timeout => "Timeout",
            PlannerStatus::Unknown => "Unknown status",
        })
    }
}

impl fmt::Display for SolveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
