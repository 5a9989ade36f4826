//! States and paths in real-vector configuration spaces.

use std::fmt;
use std::ops::Index;

/// A configuration: one coordinate per degree of freedom.
///
/// Quotient spaces of `R^n` are coordinate prefixes, so projecting a state
/// onto a coarser level keeps its first `k` coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    values: Vec<f64>,
}

impl State {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// The origin of a `dimension`-dimensional space.
    pub fn zeros(dimension: usize) -> Self {
        Self::new(vec![0.0; dimension])
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Euclidean distance over the shared coordinate prefix.
    pub fn distance(&self, other: &State) -> f64 {
        self.values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// Point at fraction `t` of the segment from `self` to `to`.
    pub fn interpolate(&self, to: &State, t: f64) -> State {
        State::new(
            self.values
                .iter()
                .zip(&to.values)
                .map(|(a, b)| a + (b - a) * t)
                .collect(),
        )
    }

    /// Keeps the first `dimension` coordinates.
    ///
    /// Returns `None` when the state has fewer coordinates than requested.
    pub fn project(&self, dimension: usize) -> Option<State> {
        if dimension > self.values.len() {
            return None;
        }
        Some(State::new(self.values[..dimension].to_vec()))
    }
}

impl From<Vec<f64>> for State {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl<const N: usize> From<[f64; N]> for State {
    fn from(values: [f64; N]) -> Self {
        Self::new(values.to_vec())
    }
}

impl Index<usize> for State {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.3}", v)?;
        }
        write!(f, ")")
    }
}

/// A piecewise-linear geometric path.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    states: Vec<State>,
}

impl Path {
    pub fn new(states: Vec<State>) -> Self {
        Self { states }
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn first(&self) -> Option<&State> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    pub fn push(&mut self, state: State) {
        self.states.push(state);
    }

    /// Dimension of the path's states, 0 for an empty path.
    pub fn dimension(&self) -> usize {
        self.states.first().map_or(0, State::dimension)
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> f64 {
        self.states.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    /// State at fraction `t` of the path's arc length.
    ///
    /// `t` is clamped to `[0, 1]`. Returns `None` for an empty path.
    pub fn interpolate(&self, t: f64) -> Option<State> {
        let first = self.states.first()?;
        let total = self.length();
        if self.states.len() == 1 || total <= 0.0 {
            return Some(first.clone());
        }

        let mut remaining = t.clamp(0.0, 1.0) * total;
        for w in self.states.windows(2) {
            let segment = w[0].distance(&w[1]);
            if remaining <= segment && segment > 0.0 {
                return Some(w[0].interpolate(&w[1], remaining / segment));
            }
            remaining -= segment;
        }
        self.states.last().cloned()
    }

    /// Projects every state onto the first `dimension` coordinates.
    pub fn project(&self, dimension: usize) -> Option<Path> {
        self.states
            .iter()
            .map(|s| s.project(dimension))
            .collect::<Option<Vec<_>>>()
            .map(Path::new)
    }
}

impl FromIterator<State> for Path {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        Path::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = State::from([0.0, 0.0]);
        let b = State::from([3.0, 4.0]);
        assert_eq!(a.distance(&b), 5.0);
    }

    #[test]
    fn test_project_keeps_prefix() {
        let s = State::from([1.0, 2.0, 3.0]);
        assert_eq!(s.project(2), Some(State::from([1.0, 2.0])));
        assert_eq!(s.project(4), None);
    }

    #[test]
    fn test_path_length_and_interpolation() {
        let path = Path::new(vec![
            State::from([0.0, 0.0]),
            State::from([1.0, 0.0]),
            State::from([1.0, 1.0]),
        ]);
        assert_eq!(path.length(), 2.0);
        assert_eq!(path.interpolate(0.0), Some(State::from([0.0, 0.0])));
        assert_eq!(path.interpolate(0.25), Some(State::from([0.5, 0.0])));
        assert_eq!(path.interpolate(0.75), Some(State::from([1.0, 0.5])));
        assert_eq!(path.interpolate(2.0), Some(State::from([1.0, 1.0])));
    }

    #[test]
    fn test_empty_path() {
        let path = Path::default();
        assert!(path.is_empty());
        assert_eq!(path.dimension(), 0);
        assert_eq!(path.length(), 0.0);
        assert!(path.interpolate(0.5).is_none());
    }
}
