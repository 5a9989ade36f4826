//! Budgets combined from several conditions.
//!
//! Implemented for tuples of up to five conditions, so a combined budget
//! stays a concrete type the solve loop can poll without boxing.

use super::Termination;
use crate::scope::PlannerScope;

/// Stops planning as soon as any of its conditions fires.
///
/// The usual way to give `solve` both a time budget and a quantum budget.
///
/// # Examples
///
/// ```
/// use pathforge_planner::termination::{OrTermination, QuantumCountTermination, TimeTermination};
///
/// // whichever comes first: 30 seconds or 1000 expansion quanta
/// let termination = OrTermination((
///     TimeTermination::seconds(30),
///     QuantumCountTermination::new(1000),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &PlannerScope) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);

/// Stops planning only once every one of its conditions fires.
///
/// Useful to guarantee a minimum amount of work, e.g. a quantum floor under
/// a wall-clock budget.
///
/// # Examples
///
/// ```
/// use pathforge_planner::termination::{AndTermination, QuantumCountTermination, TimeTermination};
///
/// // at least 100 quanta, and at least one second
/// let termination = AndTermination((
///     QuantumCountTermination::new(100),
///     TimeTermination::seconds(1),
/// ));
/// ```
#[derive(Debug)]
pub struct AndTermination<T>(pub T);

impl<T> AndTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_and_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for AndTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &PlannerScope) -> bool {
                $((self.0).$idx.is_terminated(scope))&&+
            }
        }
    };
}

impl_and_termination!(0: T0);
impl_and_termination!(0: T0, 1: T1);
impl_and_termination!(0: T0, 1: T1, 2: T2);
impl_and_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_and_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
