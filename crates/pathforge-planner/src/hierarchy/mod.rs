//! The ordered arena of levels, coarsest first.

mod level;

pub use level::Level;

use std::sync::Arc;

use pathforge_core::{PathForgeError, ProblemBinding, Quotient, Result, SpaceInformation};

/// Levels `0..N`, with non-decreasing dimensions.
///
/// Levels are addressed by index; nothing outside the arena holds a
/// reference to one.
#[derive(Debug)]
pub struct Hierarchy<Q> {
    levels: Vec<Level<Q>>,
}

impl<Q: Quotient> Hierarchy<Q> {
    /// Builds one level per space, with the planner `factory` returns for it.
    ///
    /// # Errors
    ///
    /// [`PathForgeError::EmptyHierarchy`] without spaces and
    /// [`PathForgeError::NonMonotonicDimensions`] when a space is smaller than
    /// its predecessor. The factory is not called on error.
    pub fn new<F>(spaces: Vec<Arc<SpaceInformation>>, mut factory: F) -> Result<Self>
    where
        F: FnMut(usize, &Arc<SpaceInformation>) -> Q,
    {
        if spaces.is_empty() {
            return Err(PathForgeError::EmptyHierarchy);
        }
        for (level, pair) in spaces.windows(2).enumerate() {
            let (previous, current) = (pair[0].dimension(), pair[1].dimension());
            if current < previous {
                return Err(PathForgeError::NonMonotonicDimensions {
                    level: level + 1,
                    previous,
                    current,
                });
            }
        }
        let levels = spaces
            .into_iter()
            .enumerate()
            .map(|(index, space)| {
                let planner = factory(index, &space);
                Level::new(index, space, planner)
            })
            .collect();
        Ok(Self { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Never true: construction rejects empty hierarchies.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the finest level.
    pub fn last_index(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Level<Q>> {
        self.levels.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Level<Q>> {
        self.levels.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Level<Q>> {
        self.levels.iter()
    }

    pub fn dimensions(&self) -> Vec<usize> {
        self.levels.iter().map(Level::dimension).collect()
    }

    /// Resolves `binding` and hands each level its problem.
    ///
    /// Nothing is rebound if the binding does not fit the hierarchy.
    pub fn bind(&mut self, binding: &ProblemBinding) -> Result<()> {
        let problems = binding.resolve(&self.dimensions())?;
        for (level, problem) in self.levels.iter_mut().zip(problems) {
            level.bind(problem);
        }
        Ok(())
    }

    /// Sets up every level, coarsest first, stopping at the first failure.
    pub fn setup(&mut self) -> Result<()> {
        self.levels.iter_mut().try_for_each(Level::setup)
    }

    pub fn clear(&mut self) {
        self.levels.iter_mut().for_each(Level::clear);
    }

    pub(crate) fn level_mut(&mut self, index: usize) -> &mut Level<Q> {
        &mut self.levels[index]
    }

    pub(crate) fn level(&self, index: usize) -> &Level<Q> {
        &self.levels[index]
    }
}

impl<'a, Q> IntoIterator for &'a Hierarchy<Q> {
    type Item = &'a Level<Q>;
    type IntoIter = std::slice::Iter<'a, Level<Q>>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

#[cfg(test)]
mod tests;
