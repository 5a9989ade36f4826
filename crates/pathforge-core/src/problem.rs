//! Planning problems and their projection onto quotient spaces.

use std::sync::Arc;

use crate::error::{PathForgeError, Result};
use crate::state::State;

/// Default radius around the goal state counted as reaching it.
pub const DEFAULT_GOAL_THRESHOLD: f64 = 1e-3;

/// A single-query planning problem: reach `goal` (within `goal_threshold`)
/// from `start`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemDefinition {
    start: State,
    goal: State,
    goal_threshold: f64,
}

impl ProblemDefinition {
    pub fn new(start: impl Into<State>, goal: impl Into<State>) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            goal_threshold: DEFAULT_GOAL_THRESHOLD,
        }
    }

    pub fn with_goal_threshold(mut self, threshold: f64) -> Self {
        self.goal_threshold = threshold;
        self
    }

    pub fn start(&self) -> &State {
        &self.start
    }

    pub fn goal(&self) -> &State {
        &self.goal
    }

    pub fn goal_threshold(&self) -> f64 {
        self.goal_threshold
    }

    /// Dimension of the start state.
    pub fn dimension(&self) -> usize {
        self.start.dimension()
    }

    pub fn is_goal_satisfied(&self, state: &State) -> bool {
        state.distance(&self.goal) <= self.goal_threshold
    }

    /// Projects start and goal onto the first `dimension` coordinates,
    /// keeping the goal threshold.
    pub fn project(&self, dimension: usize) -> Result<ProblemDefinition> {
        let projection = PathForgeError::Projection {
            from: self.dimension(),
            to: dimension,
        };
        match (self.start.project(dimension), self.goal.project(dimension)) {
            (Some(start), Some(goal)) => Ok(ProblemDefinition {
                start,
                goal,
                goal_threshold: self.goal_threshold,
            }),
            _ => Err(projection),
        }
    }
}

/// How problem definitions are bound to the levels of a hierarchy.
#[derive(Debug, Clone)]
pub enum ProblemBinding {
    /// One definition for the full space, projected onto every level.
    Single(Arc<ProblemDefinition>),
    /// Exactly one definition per level, coarsest first.
    PerLevel(Vec<Arc<ProblemDefinition>>),
}

impl ProblemBinding {
    /// Resolves the binding into one definition per level.
    ///
    /// A single definition must be stated in the finest level's space; the
    /// coarser levels receive its projection.
    ///
    /// # Errors
    ///
    /// - [`PathForgeError::ProblemCountMismatch`] when a per-level binding
    ///   does not have one entry per dimension.
    /// - [`PathForgeError::ProblemDimensionMismatch`] when a definition's start
    ///   or goal does not match the dimension of the level it is bound to.
    /// - [`PathForgeError::Projection`] when the single definition is smaller
    ///   than some coarser level.
    pub fn resolve(&self, dimensions: &[usize]) -> Result<Vec<Arc<ProblemDefinition>>> {
        match self {
            ProblemBinding::Single(top) => {
                if let Some(&finest) = dimensions.last() {
                    check_dimension(top, dimensions.len() - 1, finest)?;
                }
                dimensions
                    .iter()
                    .map(|&dim| {
                        if dim == top.dimension() {
                            Ok(Arc::clone(top))
                        } else {
                            top.project(dim).map(Arc::new)
                        }
                    })
                    .collect()
            }
            ProblemBinding::PerLevel(defs) => {
                if defs.len() != dimensions.len() {
                    return Err(PathForgeError::ProblemCountMismatch {
                        expected: dimensions.len(),
                        actual: defs.len(),
                    });
                }
                for (level, (def, &dim)) in defs.iter().zip(dimensions).enumerate() {
                    check_dimension(def, level, dim)?;
                }
                Ok(defs.clone())
            }
        }
    }
}

fn check_dimension(def: &ProblemDefinition, level: usize, expected: usize) -> Result<()> {
    let actual = if def.dimension() != expected {
        def.dimension()
    } else {
        def.goal().dimension()
    };
    if actual != expected {
        return Err(PathForgeError::ProblemDimensionMismatch {
            level,
            expected,
            actual,
        });
    }
    Ok(())
}

impl From<ProblemDefinition> for ProblemBinding {
    fn from(def: ProblemDefinition) -> Self {
        ProblemBinding::Single(Arc::new(def))
    }
}

impl From<Arc<ProblemDefinition>> for ProblemBinding {
    fn from(def: Arc<ProblemDefinition>) -> Self {
        ProblemBinding::Single(def)
    }
}

impl From<Vec<ProblemDefinition>> for ProblemBinding {
    fn from(defs: Vec<ProblemDefinition>) -> Self {
        ProblemBinding::PerLevel(defs.into_iter().map(Arc::new).collect())
    }
}

impl From<Vec<Arc<ProblemDefinition>>> for ProblemBinding {
    fn from(defs: Vec<Arc<ProblemDefinition>>) -> Self {
        ProblemBinding::PerLevel(defs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six_dof() -> ProblemDefinition {
        ProblemDefinition::new([0.0, 1.0, 2.0, 3.0, 4.0, 5.0], [5.0, 4.0, 3.0, 2.0, 1.0, 0.0])
            .with_goal_threshold(0.1)
    }

    #[test]
    fn test_single_binding_projects_each_level() {
        let defs = ProblemBinding::from(six_dof()).resolve(&[2, 4, 6]).unwrap();

        assert_eq!(defs.len(), 3);
        assert_eq!(defs[0].start(), &State::from([0.0, 1.0]));
        assert_eq!(defs[0].goal(), &State::from([5.0, 4.0]));
        assert_eq!(defs[1].dimension(), 4);
        assert_eq!(defs[2].as_ref(), &six_dof());
        assert!(defs.iter().all(|d| d.goal_threshold() == 0.1));
    }

    #[test]
    fn test_single_binding_cannot_grow() {
        let err = ProblemBinding::from(six_dof()).resolve(&[2, 8]).unwrap_err();
        assert!(matches!(
            err,
            PathForgeError::ProblemDimensionMismatch {
                level: 1,
                expected: 8,
                actual: 6
            }
        ));

        // a coarser level larger than the definition
        let err = ProblemBinding::from(six_dof()).resolve(&[8, 6]).unwrap_err();
        assert!(matches!(err, PathForgeError::Projection { from: 6, to: 8 }));
    }

    #[test]
    fn test_single_binding_must_match_finest_level() {
        let eight_dof = ProblemDefinition::new([0.0; 8], [1.0; 8]);
        let err = ProblemBinding::from(eight_dof).resolve(&[2, 4, 6]).unwrap_err();
        assert!(matches!(
            err,
            PathForgeError::ProblemDimensionMismatch {
                level: 2,
                expected: 6,
                actual: 8
            }
        ));
    }

    #[test]
    fn test_goal_dimension_must_match_start() {
        let lopsided = ProblemDefinition::new([0.0, 0.0], [1.0, 1.0, 1.0]);
        let err = ProblemBinding::from(lopsided.clone()).resolve(&[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            PathForgeError::ProblemDimensionMismatch {
                level: 1,
                expected: 2,
                actual: 3
            }
        ));

        let binding = ProblemBinding::from(vec![ProblemDefinition::new([0.0], [1.0]), lopsided]);
        let err = binding.resolve(&[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            PathForgeError::ProblemDimensionMismatch { level: 1, actual: 3, .. }
        ));
    }

    #[test]
    fn test_per_level_count_mismatch() {
        let binding = ProblemBinding::from(vec![
            ProblemDefinition::new([0.0], [1.0]),
            ProblemDefinition::new([0.0, 0.0], [1.0, 1.0]),
        ]);
        let err = binding.resolve(&[1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            PathForgeError::ProblemCountMismatch {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_per_level_dimension_mismatch() {
        let binding = ProblemBinding::from(vec![
            ProblemDefinition::new([0.0], [1.0]),
            ProblemDefinition::new([0.0], [1.0]),
        ]);
        let err = binding.resolve(&[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            PathForgeError::ProblemDimensionMismatch { level: 1, .. }
        ));
    }

    #[test]
    fn test_goal_satisfied_within_threshold() {
        let def = ProblemDefinition::new([0.0], [1.0]).with_goal_threshold(0.05);
        assert!(def.is_goal_satisfied(&State::from([0.96])));
        assert!(!def.is_goal_satisfied(&State::from([0.9])));
    }
}
