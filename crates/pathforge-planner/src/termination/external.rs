//! Cancellation requested from outside the solve loop.

use std::sync::atomic::{AtomicBool, Ordering};

use super::Termination;
use crate::scope::PlannerScope;

/// Cancels planning as soon as a shared flag is raised.
///
/// The flag is polled once per scheduling step, so another thread (a UI, a
/// supervisor with its own deadline) can stop `solve` after the current
/// quantum. The planner reports [`PlannerStatus::Timeout`] and keeps every
/// level's partial solution.
///
/// [`PlannerStatus::Timeout`]: crate::PlannerStatus::Timeout
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use pathforge_planner::termination::{ExternalTermination, Termination};
/// use pathforge_planner::PlannerScope;
///
/// let cancel = AtomicBool::new(false);
/// let termination = ExternalTermination::new(&cancel);
/// let scope = PlannerScope::new(3);
///
/// assert!(!termination.is_terminated(&scope));
/// cancel.store(true, Ordering::SeqCst);
/// assert!(termination.is_terminated(&scope));
/// ```
#[derive(Debug)]
pub struct ExternalTermination<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExternalTermination<'a> {
    pub fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }
}

impl Termination for ExternalTermination<'_> {
    fn is_terminated(&self, _scope: &PlannerScope) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
