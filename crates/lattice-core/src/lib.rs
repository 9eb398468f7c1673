//! **lattice-core** — geometry for D-dimensional grid simulations.
//!
//! This crate provides the foundational types shared by the *lattice*
//! crates: 1-based cell coordinates, lattice shapes with periodic
//! arithmetic, and dense lattice-shaped arrays.

pub mod array;
pub mod error;
pub mod geom;

pub use array::LatticeArray;
pub use error::LatticeError;
pub use geom::{Coord, Lattice, LatticeIter};
