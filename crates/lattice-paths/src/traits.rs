use lattice_core::Coord;

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather<const D: usize> {
    /// Append the cells reachable in one step from `p` into `buf`. The
    /// caller clears `buf` before calling.
    fn neighbors(&self, p: Coord<D>, buf: &mut Vec<Coord<D>>);
}

/// Pather with weighted (non-negative cost) edges.
pub trait WeightedPather<const D: usize>: Pather<D> {
    /// Cost of moving from `from` to adjacent `to`.
    fn cost(&self, from: Coord<D>, to: Coord<D>) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather<const D: usize>: WeightedPather<D> {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Coord<D>, to: Coord<D>) -> i32;
}
