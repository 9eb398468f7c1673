//! Per-entity path lifecycle: planning a route to a target and consuming
//! it one step per tick.

use lattice_core::Coord;

use crate::error::PathfinderError;
use crate::path::{Path, Route};
use crate::pathfinder::{EntityId, Pathfinder};

/// The space the entities live in. Positions are owned by the space; the
/// pathfinder only reads them and asks the space to move entities.
pub trait Space<const D: usize> {
    /// Current cell of an entity, `None` if the space does not know it.
    fn position(&self, id: EntityId) -> Option<Coord<D>>;

    /// Relocate an entity to `pos`.
    fn move_to(&mut self, id: EntityId, pos: Coord<D>);
}

/// Which candidate [`Pathfinder::set_best_target`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// The cheapest reachable target.
    #[default]
    Shortest,
    /// The most expensive reachable target.
    Longest,
}

impl<const D: usize> Pathfinder<D> {
    /// Plan a path from the entity's current position to `destination`
    /// and store it, replacing any previous path. An unreachable
    /// destination stores an empty path.
    pub fn set_target<S: Space<D>>(
        &mut self,
        space: &S,
        id: EntityId,
        destination: Coord<D>,
    ) -> Result<(), PathfinderError> {
        let pos = space
            .position(id)
            .ok_or(PathfinderError::UnknownEntity(id))?;
        let path = self.find_path(pos, destination)?;
        self.replace_path(id, path);
        Ok(())
    }

    /// Plan a path to every candidate and keep the one picked by
    /// `selection` among the reachable ones, comparing route costs.
    ///
    /// Returns the chosen target. When no candidate is reachable the
    /// entity gets an empty path and `None` is returned.
    pub fn set_best_target<S: Space<D>>(
        &mut self,
        space: &S,
        id: EntityId,
        targets: &[Coord<D>],
        selection: Selection,
    ) -> Result<Option<Coord<D>>, PathfinderError> {
        let pos = space
            .position(id)
            .ok_or(PathfinderError::UnknownEntity(id))?;

        let mut best: Option<(Coord<D>, Route<D>)> = None;
        for &target in targets {
            let Some(route) = self.search(pos, target)? else {
                continue;
            };
            let better = match &best {
                None => true,
                Some((_, b)) => match selection {
                    Selection::Shortest => route.cost < b.cost,
                    Selection::Longest => route.cost > b.cost,
                },
            };
            if better {
                best = Some((target, route));
            }
        }

        match best {
            Some((target, route)) => {
                self.replace_path(id, route.path);
                Ok(Some(target))
            }
            None => {
                self.replace_path(id, Path::new());
                Ok(None)
            }
        }
    }

    /// Advance an entity by one step along its stored path.
    ///
    /// Does nothing when the entity has no path or has arrived. Returns the
    /// cell it moved to.
    pub fn move_agent<S: Space<D>>(&mut self, space: &mut S, id: EntityId) -> Option<Coord<D>> {
        let next = self.pop_step(id)?;
        log::trace!("entity {id} -> {next}");
        space.move_to(id, next);
        Some(next)
    }
}
