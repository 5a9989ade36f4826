//! Space information: bounds, state validity and motion checking.

use std::fmt::{self, Debug};
use std::sync::Arc;

use rand::Rng;

use crate::error::{PathForgeError, Result};
use crate::state::State;

/// Decides whether a state is collision free.
///
/// Any `Fn(&State) -> bool + Send + Sync` is a checker.
pub trait StateValidityChecker: Send + Sync {
    fn is_valid(&self, state: &State) -> bool;
}

impl<F> StateValidityChecker for F
where
    F: Fn(&State) -> bool + Send + Sync,
{
    fn is_valid(&self, state: &State) -> bool {
        self(state)
    }
}

/// Checker accepting every state.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllValid;

impl StateValidityChecker for AllValid {
    fn is_valid(&self, _state: &State) -> bool {
        true
    }
}

/// Closed interval of one coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub low: f64,
    pub high: f64,
}

impl Bounds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn extent(&self) -> f64 {
        self.high - self.low
    }
}

/// Fraction of the space's extent used as motion-check resolution.
const DEFAULT_RESOLUTION: f64 = 0.01;

/// Description of one real-vector configuration space.
///
/// Shared by the level that owns it and its planner through an `Arc`.
pub struct SpaceInformation {
    bounds: Vec<Bounds>,
    checker: Arc<dyn StateValidityChecker>,
    resolution: f64,
}

impl Debug for SpaceInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceInformation")
            .field("bounds", &self.bounds)
            .field("resolution", &self.resolution)
            .finish()
    }
}

impl SpaceInformation {
    /// Creates an obstacle-free space with the given per-axis bounds.
    ///
    /// Every axis must be a finite interval with `low < high`.
    pub fn new(bounds: Vec<Bounds>) -> Result<Self> {
        for (axis, b) in bounds.iter().enumerate() {
            if !(b.low < b.high && b.extent().is_finite()) {
                return Err(PathForgeError::InvalidBounds {
                    axis,
                    low: b.low,
                    high: b.high,
                });
            }
        }
        Ok(Self {
            bounds,
            checker: Arc::new(AllValid),
            resolution: DEFAULT_RESOLUTION,
        })
    }

    /// Creates a `dimension`-dimensional box `[low, high]^dimension`.
    pub fn unit_box(dimension: usize, low: f64, high: f64) -> Result<Self> {
        Self::new(vec![Bounds::new(low, high); dimension])
    }

    pub fn with_validity_checker(mut self, checker: impl StateValidityChecker + 'static) -> Self {
        self.checker = Arc::new(checker);
        self
    }

    /// Sets the motion-check resolution as a fraction of the bounding-box diagonal.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn dimension(&self) -> usize {
        self.bounds.len()
    }

    pub fn bounds(&self) -> &[Bounds] {
        &self.bounds
    }

    /// Length of the bounding-box diagonal.
    pub fn maximum_extent(&self) -> f64 {
        self.bounds
            .iter()
            .map(|b| b.extent() * b.extent())
            .sum::<f64>()
            .sqrt()
    }

    pub fn satisfies_bounds(&self, state: &State) -> bool {
        state.dimension() == self.dimension()
            && state
                .values()
                .iter()
                .zip(&self.bounds)
                .all(|(v, b)| *v >= b.low && *v <= b.high)
    }

    pub fn enforce_bounds(&self, state: &mut State) {
        for (v, b) in state.values_mut().iter_mut().zip(&self.bounds) {
            *v = v.clamp(b.low, b.high);
        }
    }

    /// In bounds and accepted by the validity checker.
    pub fn is_valid(&self, state: &State) -> bool {
        self.satisfies_bounds(state) && self.checker.is_valid(state)
    }

    /// Checks the straight segment from `from` to `to`, discretized at the
    /// space's resolution. Both endpoints are checked.
    pub fn check_motion(&self, from: &State, to: &State) -> bool {
        let step = (self.resolution * self.maximum_extent()).max(f64::EPSILON);
        let segments = (from.distance(to) / step).ceil().max(1.0) as usize;
        (0..=segments).all(|i| self.is_valid(&from.interpolate(to, i as f64 / segments as f64)))
    }

    /// Draws a state uniformly inside the bounds.
    pub fn sample_uniform<R: Rng>(&self, rng: &mut R) -> State {
        State::new(
            self.bounds
                .iter()
                .map(|b| rng.random_range(b.low..=b.high))
                .collect(),
        )
    }

    /// Draws a value uniformly on one axis.
    pub fn sample_axis<R: Rng>(&self, axis: usize, rng: &mut R) -> f64 {
        let b = self.bounds[axis];
        rng.random_range(b.low..=b.high)
    }
}
