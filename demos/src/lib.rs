//! Shared simulation scaffolding for the demo binaries.
//!
//! Provides a minimal [`Space`] implementation, random obstacle
//! generation, a tick loop that advances every walker one step, and an
//! ASCII renderer for 2D grids.

use std::collections::BTreeMap;

use lattice_core::{Coord, Lattice, LatticeArray};
use lattice_paths::{EntityId, Pathfinder, Space};
use rand::{Rng, RngExt};

/// Entity positions keyed by id. Iteration order is by id, so a tick
/// always moves walkers in the same order.
#[derive(Debug, Clone, Default)]
pub struct Walkers<const D: usize> {
    positions: BTreeMap<EntityId, Coord<D>>,
}

impl<const D: usize> Walkers<D> {
    pub fn new() -> Self {
        Self {
            positions: BTreeMap::new(),
        }
    }

    /// Place a walker, replacing any previous position.
    pub fn spawn(&mut self, id: EntityId, pos: Coord<D>) {
        self.positions.insert(id, pos);
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.positions.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, Coord<D>)> + '_ {
        self.positions.iter().map(|(&id, &c)| (id, c))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl<const D: usize> Space<D> for Walkers<D> {
    fn position(&self, id: EntityId) -> Option<Coord<D>> {
        self.positions.get(&id).copied()
    }

    fn move_to(&mut self, id: EntityId, pos: Coord<D>) {
        self.positions.insert(id, pos);
    }
}

/// A walkability mask where each cell is blocked with probability
/// `density`. Cells in `keep_open` stay walkable.
pub fn scatter_obstacles<const D: usize>(
    rng: &mut impl Rng,
    lattice: Lattice<D>,
    density: f64,
    keep_open: &[Coord<D>],
) -> LatticeArray<bool, D> {
    LatticeArray::from_fn(lattice, |c| {
        keep_open.contains(&c) || !rng.random_bool(density)
    })
}

/// Advance every walker by one step. Returns how many of them moved.
pub fn tick<const D: usize>(pf: &mut Pathfinder<D>, walkers: &mut Walkers<D>) -> usize {
    let mut moved = 0;
    for id in walkers.ids() {
        if pf.move_agent(walkers, id).is_some() {
            moved += 1;
        }
    }
    moved
}

/// Tick until nobody moves or `max_ticks` is reached. Returns the number
/// of ticks in which at least one walker moved.
pub fn run_until_settled<const D: usize>(
    pf: &mut Pathfinder<D>,
    walkers: &mut Walkers<D>,
    max_ticks: usize,
) -> usize {
    let mut ticks = 0;
    while ticks < max_ticks {
        let moved = tick(pf, walkers);
        if moved == 0 {
            break;
        }
        ticks += 1;
        log::debug!("tick {ticks}: {moved} walkers moved");
    }
    ticks
}

/// Render a 2D grid: `#` blocked, `.` open, `*` remaining path cells and
/// the last digit of each walker's id.
pub fn render(pf: &Pathfinder<2>, walkers: &Walkers<2>) -> String {
    let lattice = pf.lattice();
    let mut chars: Vec<char> = lattice
        .iter()
        .map(|c| if pf.is_walkable(c) { '.' } else { '#' })
        .collect();

    for (id, _) in walkers.iter() {
        if let Some(path) = pf.path(id) {
            for step in path.iter() {
                if let Some(i) = lattice.index(step) {
                    chars[i] = '*';
                }
            }
        }
    }
    for (id, pos) in walkers.iter() {
        if let Some(i) = lattice.index(pos) {
            chars[i] = char::from_digit((id % 10) as u32, 10).unwrap_or('@');
        }
    }

    let width = lattice.extent(0) as usize;
    let mut out = String::with_capacity(chars.len() + lattice.extent(1) as usize);
    for row in chars.chunks(width) {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_paths::PathfinderConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn obstacles_respect_keep_open() {
        let mut rng = StdRng::seed_from_u64(3);
        let lattice = Lattice::new([8, 8]).unwrap();
        let keep = [Coord::new([1, 1]), Coord::new([8, 8])];
        let mask = scatter_obstacles(&mut rng, lattice, 1.0, &keep);
        assert_eq!(mask.count_fn(|&w| w), 2);
        assert_eq!(mask.at(Coord::new([8, 8])), Some(&true));
    }

    #[test]
    fn walkers_reach_their_targets() {
        let mut pf = Pathfinder::new([6, 6], false, PathfinderConfig::default()).unwrap();
        let mut walkers = Walkers::new();
        walkers.spawn(0, Coord::new([1, 1]));
        walkers.spawn(1, Coord::new([6, 1]));
        pf.set_target(&walkers, 0, Coord::new([6, 6])).unwrap();
        pf.set_target(&walkers, 1, Coord::new([6, 3])).unwrap();

        let ticks = run_until_settled(&mut pf, &mut walkers, 100);
        assert_eq!(ticks, 5);
        assert_eq!(walkers.position(0), Some(Coord::new([6, 6])));
        assert_eq!(walkers.position(1), Some(Coord::new([6, 3])));
        assert!(pf.is_stationary(0) && pf.is_stationary(1));
    }

    #[test]
    fn render_marks_walls_paths_and_walkers() {
        let mut pf = Pathfinder::new([3, 2], false, PathfinderConfig::default()).unwrap();
        pf.set_walkable(Coord::new([2, 1]), false).unwrap();
        let mut walkers = Walkers::new();
        walkers.spawn(7, Coord::new([1, 1]));
        pf.set_target(&walkers, 7, Coord::new([3, 1])).unwrap();
        assert_eq!(render(&pf, &walkers), "7#*\n.*.\n");
    }
}
