use std::collections::BinaryHeap;

use lattice_core::{Coord, Lattice};

use crate::error::PathfinderError;
use crate::path::{Path, Route};
use crate::pathfinder::Pathfinder;
use crate::traits::AstarPather;

/// Sentinel `g` of a cell no search has reached yet.
pub const UNREACHABLE: i32 = i32::MAX;

const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Node arena
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Node {
    g: i32,
    h: i32,
    parent: usize,
    closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            h: UNREACHABLE,
            parent: NO_PARENT,
            closed: false,
        }
    }
}

/// Reference into the node arena, ordered by `f` for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    f: i32,
    g: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first; among
        // equal f prefer the deeper node, then the lower index.
        other
            .f
            .cmp(&self.f)
            .then(self.g.cmp(&other.g))
            .then(other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

pub(crate) struct SearchOutcome<const D: usize> {
    pub(crate) route: Option<Route<D>>,
    pub(crate) expanded: usize,
}

/// A* from `from` to `to` over the cells of `lattice`.
///
/// The returned path excludes `from` and ends with `to`; it is empty when
/// both are the same cell. `route` is `None` when `to` cannot be reached.
/// Queue entries for cells that were improved later are left in place and
/// skipped once the cell is closed. Costs saturate, and a cell whose cost
/// reaches [`UNREACHABLE`] is never entered.
pub(crate) fn astar<const D: usize, P: AstarPather<D>>(
    pather: &P,
    lattice: &Lattice<D>,
    from: Coord<D>,
    to: Coord<D>,
) -> SearchOutcome<D> {
    let (Some(start_idx), Some(goal_idx)) = (lattice.index(from), lattice.index(to)) else {
        return SearchOutcome {
            route: None,
            expanded: 0,
        };
    };

    if start_idx == goal_idx {
        return SearchOutcome {
            route: Some(Route {
                path: Path::new(),
                cost: 0,
            }),
            expanded: 0,
        };
    }

    let mut nodes = vec![Node::default(); lattice.len()];
    {
        let node = &mut nodes[start_idx];
        node.g = 0;
        node.h = pather.estimate(from, to);
    }

    let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
    open.push(NodeRef {
        idx: start_idx,
        f: nodes[start_idx].h,
        g: 0,
    });

    let mut nbuf = Vec::new();
    let mut expanded = 0;

    let found = 'search: loop {
        let Some(current) = open.pop() else {
            break 'search false;
        };

        let ci = current.idx;
        if nodes[ci].closed {
            continue;
        }
        nodes[ci].closed = true;
        expanded += 1;

        if ci == goal_idx {
            break 'search true;
        }

        let current_g = nodes[ci].g;
        let current_point = lattice.coord(ci);

        nbuf.clear();
        pather.neighbors(current_point, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = lattice.index(np) else {
                continue;
            };
            if nodes[ni].closed {
                continue;
            }
            let tentative_g = current_g.saturating_add(pather.cost(current_point, np));
            if tentative_g >= nodes[ni].g {
                continue;
            }

            let h = pather.estimate(np, to);
            let n = &mut nodes[ni];
            n.g = tentative_g;
            n.h = h;
            n.parent = ci;

            open.push(NodeRef {
                idx: ni,
                f: tentative_g.saturating_add(h),
                g: tentative_g,
            });
        }
    };

    if !found {
        return SearchOutcome {
            route: None,
            expanded,
        };
    }

    // Walk the parent links back; the source is the only reached cell
    // without a parent.
    let mut steps = Vec::new();
    let mut ci = goal_idx;
    while nodes[ci].parent != NO_PARENT {
        steps.push(lattice.coord(ci));
        ci = nodes[ci].parent;
    }
    steps.reverse();

    SearchOutcome {
        route: Some(Route {
            path: Path::from(steps),
            cost: nodes[goal_idx].g,
        }),
        expanded,
    }
}

impl<const D: usize> Pathfinder<D> {
    /// Search for a shortest route from `source` to `destination`.
    ///
    /// Returns `Ok(None)` when the destination is unreachable, and an
    /// empty zero-cost route when both cells coincide.
    pub fn search(
        &self,
        source: Coord<D>,
        destination: Coord<D>,
    ) -> Result<Option<Route<D>>, PathfinderError> {
        let source = self.check_bounds(source)?;
        let destination = self.check_bounds(destination)?;

        let lattice = self.lattice;
        let outcome = astar(self, &lattice, source, destination);
        match &outcome.route {
            Some(route) => log::debug!(
                "path {source} -> {destination}: {} steps, cost {}, {} expanded",
                route.path.len(),
                route.cost,
                outcome.expanded
            ),
            None => log::debug!(
                "path {source} -> {destination}: unreachable, {} expanded",
                outcome.expanded
            ),
        }
        Ok(outcome.route)
    }

    /// The steps from `source` to `destination`: the first step after
    /// `source` through `destination` inclusive. Empty when the two
    /// coincide or the destination is unreachable.
    pub fn find_path(
        &self,
        source: Coord<D>,
        destination: Coord<D>,
    ) -> Result<Path<D>, PathfinderError> {
        Ok(self
            .search(source, destination)?
            .map(|route| route.path)
            .unwrap_or_default())
    }

    /// Sum of the step costs of walking `path` starting at `source`.
    pub fn path_cost(&self, source: Coord<D>, path: &Path<D>) -> i32 {
        let mut prev = source;
        let mut total = 0i32;
        for step in path.iter() {
            total = total.saturating_add(self.delta_cost(prev, step));
            prev = step;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::CostMetric;
    use crate::neighbors::Topology;
    use crate::pathfinder::PathfinderConfig;
    use lattice_core::LatticeArray;

    fn c2(x: i32, y: i32) -> Coord<2> {
        Coord::new([x, y])
    }

    fn open_grid(periodic: bool, config: PathfinderConfig<2>) -> Pathfinder<2> {
        Pathfinder::new([5, 5], periodic, config).unwrap()
    }

    fn assert_adjacent_steps(pf: &Pathfinder<2>, source: Coord<2>, path: &Path<2>) {
        let mut prev = source;
        for step in path.iter() {
            let d = pf.lattice().axis_deltas(prev, step, pf.is_periodic());
            assert!(d.iter().all(|&v| v <= 1), "{prev} -> {step} is not one step");
            assert!(pf.is_walkable(step));
            prev = step;
        }
    }

    #[test]
    fn two_diagonal_steps() {
        let pf = open_grid(false, PathfinderConfig::default());
        let path = pf.find_path(c2(1, 1), c2(3, 3)).unwrap();
        assert_eq!(path.to_vec(), vec![c2(2, 2), c2(3, 3)]);
        assert_eq!(pf.path_cost(c2(1, 1), &path), 28);
        assert_eq!(pf.delta_cost(c2(1, 1), c2(3, 3)), 28);
    }

    #[test]
    fn manhattan_path_with_axis_metric() {
        let pf = open_grid(
            false,
            PathfinderConfig {
                topology: Topology::VonNeumann,
                cost_metric: Some(CostMetric::axis(10).unwrap()),
                ..Default::default()
            },
        );
        let route = pf.search(c2(1, 1), c2(3, 3)).unwrap().unwrap();
        assert_eq!(route.path.len(), 4);
        assert_eq!(route.cost, 40);
        assert_eq!(route.path.destination(), Some(c2(3, 3)));
        assert_eq!(pf.path_cost(c2(1, 1), &route.path), 40);
        let mut prev = c2(1, 1);
        for step in route.path.iter() {
            assert_eq!((step - prev).order(), 1);
            prev = step;
        }
    }

    #[test]
    fn periodic_wrap_is_one_step() {
        let pf = open_grid(true, PathfinderConfig::default());
        let route = pf.search(c2(1, 1), c2(5, 5)).unwrap().unwrap();
        assert_eq!(route.path.to_vec(), vec![c2(5, 5)]);
        assert_eq!(route.cost, 14);
    }

    #[test]
    fn wall_disconnects_regions() {
        let mut pf = open_grid(false, PathfinderConfig::default());
        for y in 1..=5 {
            pf.set_walkable(c2(3, y), false).unwrap();
        }
        assert!(pf.find_path(c2(1, 1), c2(5, 5)).unwrap().is_empty());
        assert_eq!(pf.search(c2(1, 3), c2(4, 2)).unwrap(), None);
        // Same side still works.
        assert_eq!(pf.find_path(c2(1, 1), c2(2, 5)).unwrap().len(), 4);
    }

    #[test]
    fn wall_does_not_disconnect_periodic_grid() {
        let mut pf = open_grid(true, PathfinderConfig::default());
        for y in 1..=5 {
            pf.set_walkable(c2(3, y), false).unwrap();
        }
        let path = pf.find_path(c2(2, 3), c2(4, 3)).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.to_vec(), vec![c2(1, 3), c2(5, 3), c2(4, 3)]);
        assert_eq!(pf.path_cost(c2(2, 3), &path), 30);
    }

    #[test]
    fn same_cell_is_empty() {
        let pf = open_grid(false, PathfinderConfig::default());
        let route = pf.search(c2(2, 2), c2(2, 2)).unwrap().unwrap();
        assert!(route.path.is_empty());
        assert_eq!(route.cost, 0);
    }

    #[test]
    fn unwalkable_destination_is_unreachable() {
        let mut pf = open_grid(false, PathfinderConfig::default());
        pf.set_walkable(c2(4, 4), false).unwrap();
        assert!(pf.find_path(c2(1, 1), c2(4, 4)).unwrap().is_empty());
    }

    #[test]
    fn out_of_bounds_is_rejected_before_search() {
        let pf = open_grid(false, PathfinderConfig::default());
        assert_eq!(
            pf.find_path(c2(1, 1), c2(6, 1)),
            Err(PathfinderError::OutOfBounds("(6, 1)".into()))
        );
        assert!(pf.search(c2(0, 1), c2(2, 2)).is_err());
    }

    #[test]
    fn detours_around_obstacle() {
        // . . . . .
        // . # # # .
        // . . S # G
        // . # # # .
        // . . . . .
        let mut pf = open_grid(false, PathfinderConfig::default());
        for c in [c2(2, 2), c2(3, 2), c2(4, 2), c2(4, 3), c2(2, 4), c2(3, 4), c2(4, 4)] {
            pf.set_walkable(c, false).unwrap();
        }
        let source = c2(3, 3);
        let route = pf.search(source, c2(5, 3)).unwrap().unwrap();
        assert_adjacent_steps(&pf, source, &route.path);
        assert_eq!(route.path.destination(), Some(c2(5, 3)));
        // (2,3) -> (1,2) -> (2,1) -> (3,1) -> (4,1) -> (5,2) -> (5,3)
        assert_eq!(route.cost, 10 + 14 + 14 + 10 + 10 + 14 + 10);
        assert_eq!(pf.path_cost(source, &route.path), route.cost);
    }

    #[test]
    fn height_metric_prefers_flat_ground() {
        // A ridge along x = 3, except for a pass at y = 5.
        let lattice = lattice_core::Lattice::new([5, 5]).unwrap();
        let heights = LatticeArray::from_fn(lattice, |c| {
            if c[0] == 3 && c[1] != 5 { 100 } else { 0 }
        });
        let pf = open_grid(
            false,
            PathfinderConfig {
                cost_metric: Some(CostMetric::height(heights)),
                ..Default::default()
            },
        );
        let source = c2(1, 3);
        let route = pf.search(source, c2(5, 3)).unwrap().unwrap();
        assert!(route.path.iter().any(|c| c == c2(3, 5)));
        assert!(route.cost < 200);
        assert_eq!(pf.path_cost(source, &route.path), route.cost);
    }

    #[test]
    fn route_cost_matches_step_costs_three_dimensions() {
        let mut pf = Pathfinder::<3>::new([6, 6, 6], false, PathfinderConfig::default()).unwrap();
        for y in 1..=5 {
            for z in 1..=6 {
                pf.set_walkable(Coord::new([3, y, z]), false).unwrap();
            }
        }
        let source = Coord::new([1, 1, 1]);
        let dest = Coord::new([6, 2, 5]);
        let route = pf.search(source, dest).unwrap().unwrap();
        assert_eq!(route.path.destination(), Some(dest));
        assert_eq!(pf.path_cost(source, &route.path), route.cost);
        assert!(route.cost >= pf.delta_cost(source, dest));
        assert!(route.path.iter().all(|c| c[0] != 3 || c[1] == 6));
    }

    #[test]
    fn saturated_costs_do_not_overflow() {
        let pf = Pathfinder::<2>::new(
            [5, 1],
            false,
            PathfinderConfig {
                cost_metric: Some(CostMetric::axis(i32::MAX / 2).unwrap()),
                ..Default::default()
            },
        )
        .unwrap();
        let route = pf.search(c2(1, 1), c2(3, 1)).unwrap().unwrap();
        assert_eq!(route.cost, i32::MAX - 1);
        assert_eq!(pf.search(c2(1, 1), c2(5, 1)).unwrap(), None);
        let far = Path::from(vec![c2(2, 1), c2(3, 1), c2(4, 1)]);
        assert_eq!(pf.path_cost(c2(1, 1), &far), i32::MAX);

        let lattice = lattice_core::Lattice::new([3, 1]).unwrap();
        let heights = LatticeArray::from_vec(lattice, vec![i32::MAX, -10, 0]).unwrap();
        let pf = Pathfinder::<2>::new(
            [3, 1],
            false,
            PathfinderConfig {
                cost_metric: Some(CostMetric::height(heights)),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(pf.find_path(c2(1, 1), c2(3, 1)).unwrap().is_empty());
        assert_eq!(pf.find_path(c2(3, 1), c2(2, 1)).unwrap().len(), 1);
    }

    #[test]
    fn search_is_deterministic() {
        let pf = open_grid(false, PathfinderConfig::default());
        let a = pf.find_path(c2(1, 5), c2(5, 1)).unwrap();
        let b = pf.find_path(c2(1, 5), c2(5, 1)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
    }
}
