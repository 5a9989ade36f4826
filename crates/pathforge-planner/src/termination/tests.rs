//! Tests for termination conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use super::*;
use crate::scope::PlannerScope;

fn started_scope() -> PlannerScope {
    let mut scope = PlannerScope::new(3);
    scope.start_solving();
    scope
}

#[test]
fn test_quantum_count_termination() {
    let mut scope = started_scope();
    let term = QuantumCountTermination::new(3);

    assert!(!term.is_terminated(&scope));
    scope.increment_quantum_count();
    scope.increment_quantum_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_quantum_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_time_termination() {
    let scope = started_scope();
    assert!(!TimeTermination::seconds(60).is_terminated(&scope));

    thread::sleep(Duration::from_millis(5));
    assert!(TimeTermination::millis(1).is_terminated(&scope));
}

#[test]
fn test_time_termination_before_start() {
    let scope = PlannerScope::new(1);
    assert!(!TimeTermination::millis(0).is_terminated(&scope));
}

#[test]
fn test_external_termination() {
    let scope = started_scope();
    let flag = AtomicBool::new(false);
    let term = ExternalTermination::new(&flag);

    assert!(!term.is_terminated(&scope));
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_fn_termination() {
    let scope = started_scope();
    assert!(FnTermination::new(|| true).is_terminated(&scope));
    assert!(!FnTermination::new(|| false).is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let mut scope = started_scope();
    let term = OrTermination((
        QuantumCountTermination::new(2),
        TimeTermination::seconds(60),
    ));

    assert!(!term.is_terminated(&scope));
    scope.increment_quantum_count();
    scope.increment_quantum_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_and_termination() {
    let mut scope = started_scope();
    let term = AndTermination((
        QuantumCountTermination::new(1),
        FnTermination::new(|| false),
    ));

    scope.increment_quantum_count();
    assert!(!term.is_terminated(&scope));

    let term = AndTermination((QuantumCountTermination::new(1), NoTermination));
    assert!(!term.is_terminated(&scope));

    let term = AndTermination((QuantumCountTermination::new(1), FnTermination::new(|| true)));
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_option_and_box() {
    let mut scope = started_scope();
    scope.increment_quantum_count();

    let none: Option<QuantumCountTermination> = None;
    assert!(!none.is_terminated(&scope));
    assert!(Some(QuantumCountTermination::new(1)).is_terminated(&scope));

    let boxed: Box<dyn Termination> = Box::new(QuantumCountTermination::new(1));
    assert!(boxed.is_terminated(&scope));
}

#[test]
fn test_termination_from_config() {
    let mut scope = started_scope();

    let unbounded = termination_from_config(&TerminationConfig::default());
    scope.increment_quantum_count();
    assert!(!unbounded.is_terminated(&scope));

    let config = TerminationConfig {
        quantum_count_limit: Some(2),
        seconds_spent_limit: Some(60),
        ..TerminationConfig::default()
    };
    let term = termination_from_config(&config);
    assert!(!term.is_terminated(&scope));
    scope.increment_quantum_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_saturated_config_limit_never_fires() {
    let scope = started_scope();
    let config = TerminationConfig {
        seconds_spent_limit: Some(u64::MAX),
        milliseconds_spent_limit: Some(u64::MAX),
        quantum_count_limit: None,
    };
    let term = termination_from_config(&config);
    assert!(!term.is_terminated(&scope));
}
