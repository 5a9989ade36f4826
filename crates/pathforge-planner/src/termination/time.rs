//! Wall-clock budget for a solve call.

use std::time::Duration;

use super::Termination;
use crate::scope::PlannerScope;

/// Stops the scheduling loop once the solve call has run for `limit`.
///
/// The clock is the one started by [`PlannerScope::start_solving`], so the
/// budget covers a single `solve` call, not the planner's lifetime. A check
/// happens between quanta; a running quantum is never interrupted.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pathforge_planner::termination::TimeTermination;
///
/// let budget = TimeTermination::new(Duration::from_millis(1500));
/// assert_eq!(budget.limit(), TimeTermination::millis(1500).limit());
/// assert_eq!(TimeTermination::seconds(2).limit(), Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Termination for TimeTermination {
    fn is_terminated(&self, scope: &PlannerScope) -> bool {
        scope.elapsed().is_some_and(|e| e >= self.limit)
    }
}
