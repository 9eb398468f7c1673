use std::collections::VecDeque;

use lattice_core::Coord;

/// The remaining steps of an entity, front first.
///
/// A path never contains the entity's current cell. An empty path means
/// "no further movement": either the entity arrived, or no route exists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path<const D: usize> {
    steps: VecDeque<Coord<D>>,
}

impl<const D: usize> Path<D> {
    /// An empty path.
    pub fn new() -> Self {
        Self {
            steps: VecDeque::new(),
        }
    }

    /// Number of remaining steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The next cell to enter.
    #[inline]
    pub fn front(&self) -> Option<Coord<D>> {
        self.steps.front().copied()
    }

    /// The final cell of the path.
    #[inline]
    pub fn destination(&self) -> Option<Coord<D>> {
        self.steps.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord<D>> + '_ {
        self.steps.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Coord<D>> {
        self.steps.iter().copied().collect()
    }

    pub(crate) fn pop_front(&mut self) -> Option<Coord<D>> {
        self.steps.pop_front()
    }
}

impl<const D: usize> From<Vec<Coord<D>>> for Path<D> {
    fn from(steps: Vec<Coord<D>>) -> Self {
        Self {
            steps: steps.into(),
        }
    }
}

/// A completed search: the path plus its total cost (the destination's
/// final `g` value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<const D: usize> {
    pub path: Path<D>,
    pub cost: i32,
}
