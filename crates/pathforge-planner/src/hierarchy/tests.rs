//! Tests for hierarchy construction and problem binding.

use std::time::Duration;

use pathforge_core::{Path, ProblemDefinition, State};
use pathforge_test::{box_spaces, diagonal_problem, ExpansionLog, Script, ScriptedQuotient};

use super::*;

fn scripted(dims: &[usize], script: Script) -> Result<Hierarchy<ScriptedQuotient>> {
    let log = ExpansionLog::new();
    Hierarchy::new(box_spaces(dims), |level, space| {
        ScriptedQuotient::new(level, space.dimension(), script.clone(), log.clone())
    })
}

#[test]
fn test_builds_one_level_per_space() {
    let hierarchy = scripted(&[2, 4, 6], Script::solves_on(1)).unwrap();

    assert_eq!(hierarchy.len(), 3);
    assert_eq!(hierarchy.last_index(), 2);
    assert_eq!(hierarchy.dimensions(), vec![2, 4, 6]);
    for (i, level) in hierarchy.iter().enumerate() {
        assert_eq!(level.index(), i);
        assert_eq!(level.planner().level(), i);
        assert!(!level.is_solved());
    }
}

#[test]
fn test_equal_dimensions_allowed() {
    let hierarchy = scripted(&[3, 3, 3], Script::solves_on(1)).unwrap();
    assert_eq!(hierarchy.len(), 3);
}

#[test]
fn test_rejects_empty() {
    let err = scripted(&[], Script::solves_on(1)).unwrap_err();
    assert!(matches!(err, PathForgeError::EmptyHierarchy));
}

#[test]
fn test_rejects_decreasing_dimensions() {
    let mut built = 0;
    let err = Hierarchy::new(box_spaces(&[2, 6, 4]), |level, space| {
        built += 1;
        ScriptedQuotient::new(level, space.dimension(), Script::solves_on(1), ExpansionLog::new())
    })
    .unwrap_err();

    assert!(matches!(
        err,
        PathForgeError::NonMonotonicDimensions {
            level: 2,
            previous: 6,
            current: 4
        }
    ));
    assert_eq!(built, 0);
}

#[test]
fn test_bind_projects_single_problem() {
    let mut hierarchy = scripted(&[2, 4, 6], Script::solves_on(1)).unwrap();
    hierarchy.bind(&diagonal_problem(6).into()).unwrap();

    for level in &hierarchy {
        let problem = level.problem().unwrap();
        assert_eq!(problem.dimension(), level.dimension());
        assert_eq!(level.planner().problem().unwrap().dimension(), level.dimension());
    }
}

#[test]
fn test_bind_mismatch_leaves_levels_untouched() {
    let mut hierarchy = scripted(&[1, 2], Script::solves_on(1)).unwrap();
    let binding = ProblemBinding::from(vec![ProblemDefinition::new([0.0], [1.0])]);

    let err = hierarchy.bind(&binding).unwrap_err();
    assert!(matches!(err, PathForgeError::ProblemCountMismatch { .. }));
    assert!(hierarchy.iter().all(|l| l.problem().is_none()));
}

#[test]
fn test_setup_requires_problem() {
    let mut hierarchy = scripted(&[2], Script::solves_on(1)).unwrap();
    let err = hierarchy.setup().unwrap_err();
    assert!(matches!(err, PathForgeError::MissingProblemDefinition { level: 0 }));

    hierarchy.bind(&diagonal_problem(2).into()).unwrap();
    hierarchy.setup().unwrap();
    assert_eq!(hierarchy.level(0).planner().setup_calls(), 1);
}

#[test]
fn test_expand_records_solution() {
    let mut hierarchy = scripted(&[2], Script::solves_on(2)).unwrap();
    let level = hierarchy.level_mut(0);

    assert!(!level.expand(Duration::from_millis(1)));
    assert!(level.expand(Duration::from_millis(2)));
    assert_eq!(level.quanta(), 2);
    assert_eq!(level.solved_after(), Some(Duration::from_millis(2)));
    assert_eq!(level.solution().unwrap().dimension(), 2);
}

#[test]
fn test_expand_marks_exhaustion() {
    let mut hierarchy = scripted(&[2], Script::exhausts_after(1)).unwrap();
    let level = hierarchy.level_mut(0);

    assert!(!level.expand(Duration::ZERO));
    assert!(level.is_exhausted());
}

#[test]
fn test_clear_resets_levels() {
    let mut hierarchy = scripted(&[2, 4], Script::solves_on(1)).unwrap();
    hierarchy.level_mut(0).expand(Duration::ZERO);
    hierarchy
        .level_mut(1)
        .adopt(&Path::new(vec![State::zeros(2), State::from([1.0, 1.0])]));

    hierarchy.clear();

    for level in &hierarchy {
        assert!(!level.is_solved());
        assert_eq!(level.quanta(), 0);
        assert_eq!(level.feasible_node_count(), 0);
        assert_eq!(level.total_node_count(), 0);
        assert_eq!(level.planner().clear_calls(), 1);
        assert!(level.planner().parent_solution().is_none());
    }
}
