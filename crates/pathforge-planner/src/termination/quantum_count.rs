//! Quantum count termination.

use super::Termination;
use crate::scope::PlannerScope;

/// Terminates after a number of expansion quanta in one `solve` call.
///
/// # Example
///
/// ```
/// use pathforge_planner::termination::QuantumCountTermination;
///
/// // Terminate after 1000 quanta
/// let term = QuantumCountTermination::new(1000);
/// ```
#[derive(Debug, Clone)]
pub struct QuantumCountTermination {
    limit: u64,
}

impl QuantumCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for QuantumCountTermination {
    fn is_terminated(&self, scope: &PlannerScope) -> bool {
        scope.quantum_count() >= self.limit
    }
}
