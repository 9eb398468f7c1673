use std::fmt;

/// Errors raised while building lattices and lattice-shaped arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// An axis was given a zero or negative extent.
    NonPositiveExtent { axis: usize, extent: i32 },
    /// A flat buffer does not hold exactly one value per cell.
    ShapeMismatch { expected: usize, found: usize },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveExtent { axis, extent } => {
                write!(f, "lattice: axis {axis} has non-positive extent {extent}")
            }
            Self::ShapeMismatch { expected, found } => {
                write!(f, "lattice: expected {expected} cells, found {found}")
            }
        }
    }
}

impl std::error::Error for LatticeError {}
