//! Tests for the event system.

use super::*;
use pathforge_core::State;

fn path() -> Path {
    Path::new(vec![State::from([0.0, 0.0]), State::from([1.0, 0.0])])
}

#[test]
fn test_event_support_new() {
    let support = PlannerEventSupport::new();
    assert_eq!(support.listener_count(), 0);
    assert!(!support.has_listeners());
}

#[test]
fn test_event_support_fire_events() {
    let mut support = PlannerEventSupport::new();
    let listener = Arc::new(CountingEventListener::new());
    support.add_listener(listener.clone());
    support.add_listener(Arc::new(LoggingEventListener::with_prefix("[test] ")));

    support.fire_solving_started(0);
    support.fire_level_solved(0, &path());
    support.fire_level_solved(1, &path());
    support.fire_solving_ended(PlannerStatus::ExactSolution);

    assert_eq!(support.listener_count(), 2);
    assert_eq!(listener.solving_started_count(), 1);
    assert_eq!(listener.level_solved_count(), 2);
    assert_eq!(listener.solving_ended_count(), 1);
}

#[test]
fn test_event_support_clear_listeners() {
    let mut support = PlannerEventSupport::new();
    let listener = Arc::new(CountingEventListener::new());
    support.add_listener(listener.clone());
    support.clear_listeners();

    support.fire_level_solved(0, &path());
    assert!(!support.has_listeners());
    assert_eq!(listener.level_solved_count(), 0);
}

#[test]
fn test_counting_listener_reset() {
    let listener = CountingEventListener::new();
    listener.on_solving_started(0);
    listener.on_level_solved(0, &path());
    listener.reset();

    assert_eq!(listener.solving_started_count(), 0);
    assert_eq!(listener.level_solved_count(), 0);
}

#[test]
fn test_debug_shows_listener_count() {
    let mut support = PlannerEventSupport::new();
    support.add_listener(Arc::new(CountingEventListener::new()));
    assert_eq!(format!("{:?}", support), "PlannerEventSupport { listeners: 1 }");
}
