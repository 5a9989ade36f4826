//! Termination conditions for the scheduling loop.
//!
//! A termination is polled once per scheduling step, so cancellation latency
//! is bounded by one expansion quantum.

mod composite;
mod external;
mod predicate;
mod quantum_count;
mod time;

use std::fmt::Debug;

use pathforge_config::TerminationConfig;

use crate::scope::PlannerScope;

pub use composite::{AndTermination, OrTermination};
pub use external::ExternalTermination;
pub use predicate::FnTermination;
pub use quantum_count::QuantumCountTermination;
pub use time::TimeTermination;

/// Trait for determining when to stop solving.
pub trait Termination: Send + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&self, scope: &PlannerScope) -> bool;
}

/// Marker type indicating no termination.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn is_terminated(&self, _scope: &PlannerScope) -> bool {
        false
    }
}

/// An absent termination never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, scope: &PlannerScope) -> bool {
        match self {
            Some(t) => t.is_terminated(scope),
            None => false,
        }
    }
}

impl<T: Termination + ?Sized> Termination for Box<T> {
    fn is_terminated(&self, scope: &PlannerScope) -> bool {
        (**self).is_terminated(scope)
    }
}

/// Termination built from a [`TerminationConfig`]: time limit OR quantum budget.
pub type ConfiguredTermination =
    OrTermination<(Option<TimeTermination>, Option<QuantumCountTermination>)>;

/// Builds the termination described by `config`.
///
/// An unbounded configuration never terminates; the loop then ends only when
/// the stop level is solved or every level is exhausted.
pub fn termination_from_config(config: &TerminationConfig) -> ConfiguredTermination {
    OrTermination((
        config.time_limit().map(TimeTermination::new),
        config.quantum_count_limit.map(QuantumCountTermination::new),
    ))
}

#[cfg(test)]
mod tests;
