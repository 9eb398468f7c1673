//! The pathfinder state: grid geometry, walkability, cost metric and the
//! per-entity path store.

use std::collections::HashMap;

use lattice_core::{Coord, Lattice, LatticeArray};
use rand::{Rng, RngExt};

use crate::distance;
use crate::error::PathfinderError;
use crate::metric::CostMetric;
use crate::neighbors::{Neighbors, Topology};
use crate::path::Path;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// Identifier of a mobile entity, as handed out by the space.
pub type EntityId = usize;

/// Optional settings for [`Pathfinder::new`]. Unset fields fall back to an
/// all-walkable mask and the default diagonal metric.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathfinderConfig<const D: usize> {
    #[cfg_attr(feature = "serde", serde(default))]
    pub topology: Topology,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walkable: Option<LatticeArray<bool, D>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost_metric: Option<CostMetric<D>>,
}

/// Grid geometry plus the paths of every entity that was given a target.
///
/// All searches read this state; only [`set_target`](Self::set_target),
/// [`set_best_target`](Self::set_best_target),
/// [`move_agent`](Self::move_agent) and
/// [`remove_agent`](Self::remove_agent) change the path store. Clone it to
/// give each simulation replica its own copy.
#[derive(Debug, Clone)]
pub struct Pathfinder<const D: usize> {
    pub(crate) lattice: Lattice<D>,
    pub(crate) periodic: bool,
    neighbors: Neighbors<D>,
    walkable: LatticeArray<bool, D>,
    metric: CostMetric<D>,
    paths: HashMap<EntityId, Path<D>>,
}

impl<const D: usize> Pathfinder<D> {
    /// Build a pathfinder for a grid of the given extents.
    ///
    /// Fails if an extent is not positive, or if the walkability mask, the
    /// height map or the metric does not fit the grid.
    pub fn new(
        extents: [i32; D],
        periodic: bool,
        config: PathfinderConfig<D>,
    ) -> Result<Self, PathfinderError> {
        let lattice = Lattice::new(extents)?;

        let walkable = match config.walkable {
            Some(mask) => {
                if mask.lattice() != lattice {
                    return Err(PathfinderError::ShapeMismatch {
                        what: "walkable mask",
                        expected: lattice.to_string(),
                        found: mask.lattice().to_string(),
                    });
                }
                mask
            }
            None => LatticeArray::filled(lattice, true),
        };

        let metric = config.cost_metric.unwrap_or_default();
        metric.validate(&lattice)?;

        log::info!(
            "pathfinder: {lattice} grid, periodic={periodic}, {:?}, {} walkable cells",
            config.topology,
            walkable.count_fn(|&w| w)
        );

        Ok(Self {
            lattice,
            periodic,
            neighbors: Neighbors::new(config.topology),
            walkable,
            metric,
            paths: HashMap::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    #[inline]
    pub fn lattice(&self) -> Lattice<D> {
        self.lattice
    }

    #[inline]
    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.neighbors.topology()
    }

    #[inline]
    pub fn cost_metric(&self) -> &CostMetric<D> {
        &self.metric
    }

    /// Distance estimate between two cells under the active metric.
    ///
    /// Both cells must lie inside the grid; pass them through
    /// [`check_bounds`](Self::check_bounds) first when unsure. Debug builds
    /// assert this.
    #[inline]
    pub fn delta_cost(&self, from: Coord<D>, to: Coord<D>) -> i32 {
        debug_assert!(
            self.lattice.contains(from) && self.lattice.contains(to),
            "delta_cost({from}, {to}) outside {}",
            self.lattice
        );
        self.metric.delta_cost(&self.lattice, self.periodic, from, to)
    }

    /// Reject coordinates outside the grid.
    pub fn check_bounds(&self, c: Coord<D>) -> Result<Coord<D>, PathfinderError> {
        if self.lattice.contains(c) {
            Ok(c)
        } else {
            Err(PathfinderError::OutOfBounds(c.to_string()))
        }
    }

    // -----------------------------------------------------------------------
    // Walkability
    // -----------------------------------------------------------------------

    /// Whether `c` is inside the grid and walkable.
    #[inline]
    pub fn is_walkable(&self, c: Coord<D>) -> bool {
        self.walkable.at(c).copied().unwrap_or(false)
    }

    /// Change the walkability of a cell. Paths already stored are not
    /// recomputed.
    pub fn set_walkable(&mut self, c: Coord<D>, walkable: bool) -> Result<(), PathfinderError> {
        let c = self.check_bounds(c)?;
        self.walkable.set(c, walkable);
        Ok(())
    }

    #[inline]
    pub fn walkable_mask(&self) -> &LatticeArray<bool, D> {
        &self.walkable
    }

    /// A uniformly chosen walkable cell, or `None` if there is none.
    pub fn random_walkable(&self, rng: &mut impl Rng) -> Option<Coord<D>> {
        pick(rng, self.walkable.iter().filter(|(_, w)| **w).map(|(c, _)| c))
    }

    /// A uniformly chosen walkable cell within Chebyshev distance `radius`
    /// of `center` (wrapping around when periodic).
    pub fn random_walkable_within(
        &self,
        rng: &mut impl Rng,
        center: Coord<D>,
        radius: i32,
    ) -> Result<Option<Coord<D>>, PathfinderError> {
        let center = self.check_bounds(center)?;
        let near = self.walkable.iter().filter_map(|(c, w)| {
            let d = distance::chebyshev(self.lattice.axis_deltas(center, c, self.periodic));
            (*w && d <= radius).then_some(c)
        });
        Ok(pick(rng, near))
    }

    // -----------------------------------------------------------------------
    // Path store
    // -----------------------------------------------------------------------

    /// The stored path of an entity, `None` if it never had a target.
    #[inline]
    pub fn path(&self, id: EntityId) -> Option<&Path<D>> {
        self.paths.get(&id)
    }

    /// Whether the entity has nowhere left to go.
    pub fn is_stationary(&self, id: EntityId) -> bool {
        self.paths.get(&id).is_none_or(Path::is_empty)
    }

    /// Number of entities with a path record, empty ones included.
    #[inline]
    pub fn tracked(&self) -> usize {
        self.paths.len()
    }

    /// Drop the path record of an entity (e.g. when it leaves the
    /// simulation). Returns the remaining path, if any.
    pub fn remove_agent(&mut self, id: EntityId) -> Option<Path<D>> {
        self.paths.remove(&id)
    }

    pub(crate) fn replace_path(&mut self, id: EntityId, path: Path<D>) {
        if let Some(old) = self.paths.insert(id, path) {
            if !old.is_empty() {
                log::debug!(
                    "entity {id}: replacing path with {} remaining steps",
                    old.len()
                );
            }
        }
    }

    pub(crate) fn pop_step(&mut self, id: EntityId) -> Option<Coord<D>> {
        self.paths.get_mut(&id)?.pop_front()
    }
}

fn pick<const D: usize>(
    rng: &mut impl Rng,
    cells: impl Iterator<Item = Coord<D>>,
) -> Option<Coord<D>> {
    let cells: Vec<_> = cells.collect();
    if cells.is_empty() {
        return None;
    }
    Some(cells[rng.random_range(0..cells.len())])
}

impl<const D: usize> Pather<D> for Pathfinder<D> {
    fn neighbors(&self, p: Coord<D>, buf: &mut Vec<Coord<D>>) {
        self.neighbors.collect(p, buf, |c| {
            self.lattice
                .normalize(c, self.periodic)
                .filter(|&n| n != p && self.is_walkable(n))
        });
    }
}

impl<const D: usize> WeightedPather<D> for Pathfinder<D> {
    fn cost(&self, from: Coord<D>, to: Coord<D>) -> i32 {
        self.delta_cost(from, to)
    }
}

impl<const D: usize> AstarPather<D> for Pathfinder<D> {
    fn estimate(&self, from: Coord<D>, to: Coord<D>) -> i32 {
        self.delta_cost(from, to)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let lattice = Lattice::new([3, 3]).unwrap();
        let cfg = PathfinderConfig {
            topology: Topology::VonNeumann,
            walkable: Some(LatticeArray::filled(lattice, true)),
            cost_metric: Some(CostMetric::height_with(
                CostMetric::axis(10).unwrap(),
                LatticeArray::filled(lattice, 2),
            )),
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: PathfinderConfig<2> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.topology, cfg.topology);
        assert_eq!(back.walkable, cfg.walkable);
        assert_eq!(back.cost_metric, cfg.cost_metric);
        assert!(Pathfinder::new([3, 3], false, back).is_ok());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let cfg: PathfinderConfig<2> = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.topology, Topology::Moore);
        assert!(cfg.walkable.is_none());
        assert!(cfg.cost_metric.is_none());

        let cfg: PathfinderConfig<2> =
            serde_json::from_str(r#"{"topology":"VonNeumann"}"#).unwrap();
        assert_eq!(cfg.topology, Topology::VonNeumann);
        assert!(cfg.walkable.is_none());
        let pf = Pathfinder::new([4, 4], false, cfg).unwrap();
        assert_eq!(pf.topology(), Topology::VonNeumann);
    }
}
