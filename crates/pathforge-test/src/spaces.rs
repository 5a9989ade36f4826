//! Space and problem fixtures.

use std::sync::Arc;

use pathforge_core::{ProblemDefinition, SpaceInformation, State};

/// An obstacle-free `[0, 1]^dimension` box.
pub fn unit_box(dimension: usize) -> Arc<SpaceInformation> {
    Arc::new(
        SpaceInformation::unit_box(dimension, 0.0, 1.0)
            .expect("unit bounds are well formed"),
    )
}

/// One unit box per entry of `dimensions`.
pub fn box_spaces(dimensions: &[usize]) -> Vec<Arc<SpaceInformation>> {
    dimensions.iter().map(|&d| unit_box(d)).collect()
}

/// From the corner near the origin to the opposite corner of the unit box.
pub fn diagonal_problem(dimension: usize) -> ProblemDefinition {
    ProblemDefinition::new(
        State::new(vec![0.1; dimension]),
        State::new(vec![0.9; dimension]),
    )
    .with_goal_threshold(0.05)
}
