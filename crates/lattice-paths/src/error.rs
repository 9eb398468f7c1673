use std::fmt;

use lattice_core::LatticeError;

use crate::pathfinder::EntityId;

/// Errors raised while configuring a [`Pathfinder`](crate::Pathfinder) or
/// validating the arguments of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathfinderError {
    /// The grid extents themselves are invalid.
    Lattice(LatticeError),
    /// A lattice-shaped input does not match the grid extents.
    ShapeMismatch {
        what: &'static str,
        expected: String,
        found: String,
    },
    /// A cost metric is malformed for this dimensionality.
    InvalidMetric(String),
    /// A coordinate lies outside the grid.
    OutOfBounds(String),
    /// The space does not know the entity.
    UnknownEntity(EntityId),
}

impl fmt::Display for PathfinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lattice(e) => write!(f, "pathfinder: {e}"),
            Self::ShapeMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "pathfinder: {what} has shape {found}, grid is {expected}"
            ),
            Self::InvalidMetric(msg) => write!(f, "pathfinder: invalid cost metric: {msg}"),
            Self::OutOfBounds(c) => write!(f, "pathfinder: coordinate {c} is outside the grid"),
            Self::UnknownEntity(id) => write!(f, "pathfinder: unknown entity {id}"),
        }
    }
}

impl std::error::Error for PathfinderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lattice(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LatticeError> for PathfinderError {
    fn from(e: LatticeError) -> Self {
        Self::Lattice(e)
    }
}
