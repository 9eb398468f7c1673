//! Pathfinding for agents on D-dimensional lattices.
//!
//! A [`Pathfinder`] owns the grid geometry (extents, periodicity,
//! topology), a walkability mask, a [`CostMetric`] and the remaining path
//! of every entity that was given a target:
//!
//! - **A\*** shortest-path search ([`Pathfinder::find_path`],
//!   [`Pathfinder::search`])
//! - **Targets** ([`Pathfinder::set_target`],
//!   [`Pathfinder::set_best_target`]) plan and store a path per entity
//! - **Movement** ([`Pathfinder::move_agent`]) consumes one step per call
//!   and moves the entity through the caller's [`Space`]
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | step costs |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod distance;
mod error;
mod lifecycle;
mod metric;
mod neighbors;
mod path;
mod pathfinder;
mod traits;

pub use astar::UNREACHABLE;
pub use distance::{chebyshev, diagonal, manhattan};
pub use error::PathfinderError;
pub use lifecycle::{Selection, Space};
pub use metric::{CostMetric, default_direction_costs};
pub use neighbors::{Neighbors, Topology};
pub use path::{Path, Route};
pub use pathfinder::{EntityId, Pathfinder, PathfinderConfig};
pub use traits::{AstarPather, Pather, WeightedPather};

pub use lattice_core::{Coord, Lattice, LatticeArray, LatticeError};
