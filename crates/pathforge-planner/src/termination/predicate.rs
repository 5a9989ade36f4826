//! Termination from a plain predicate.

use std::fmt;

use super::Termination;
use crate::scope::PlannerScope;

/// Terminates when a no-argument predicate returns true.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use pathforge_planner::termination::FnTermination;
///
/// let deadline = Instant::now() + Duration::from_secs(5);
/// let term = FnTermination::new(move || Instant::now() >= deadline);
/// ```
pub struct FnTermination<F> {
    predicate: F,
}

impl<F> FnTermination<F>
where
    F: Fn() -> bool + Send,
{
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> fmt::Debug for FnTermination<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTermination").finish_non_exhaustive()
    }
}

impl<F> Termination for FnTermination<F>
where
    F: Fn() -> bool + Send,
{
    fn is_terminated(&self, _scope: &PlannerScope) -> bool {
        (self.predicate)()
    }
}
