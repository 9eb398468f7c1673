use lattice_core::Coord;

/// Adjacency rule of the lattice graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Steps along any combination of axes (`3^D - 1` neighbours).
    #[default]
    Moore,
    /// Steps along exactly one axis (`2D` neighbours).
    VonNeumann,
}

impl Topology {
    /// The non-zero unit offsets allowed by this topology.
    pub fn offsets<const D: usize>(self) -> Vec<Coord<D>> {
        match self {
            Topology::Moore => {
                let total = 3usize.pow(D as u32);
                let mut out = Vec::with_capacity(total - 1);
                for n in 0..total {
                    let mut rest = n;
                    let off = Coord::new(std::array::from_fn(|_| {
                        let digit = (rest % 3) as i32 - 1;
                        rest /= 3;
                        digit
                    }));
                    if !off.is_zero() {
                        out.push(off);
                    }
                }
                out
            }
            Topology::VonNeumann => {
                let mut out = Vec::with_capacity(2 * D);
                for axis in 0..D {
                    for step in [-1, 1] {
                        let mut off = Coord::splat(0);
                        off.0[axis] = step;
                        out.push(off);
                    }
                }
                out
            }
        }
    }
}

/// Cached neighbour offsets for one topology.
///
/// Enumerates the neighbours of a cell, filtered by a predicate that
/// decides bounds, wrapping and passability.
#[derive(Debug, Clone)]
pub struct Neighbors<const D: usize> {
    topology: Topology,
    offsets: Vec<Coord<D>>,
}

impl<const D: usize> Neighbors<D> {
    /// Create a `Neighbors` helper for `topology`.
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            offsets: topology.offsets(),
        }
    }

    /// The topology the offsets were built for.
    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// The raw offsets.
    #[inline]
    pub fn offsets(&self) -> &[Coord<D>] {
        &self.offsets
    }

    /// Append to `buf` every `keep(p + offset)` that returns a cell.
    ///
    /// `keep` maps a raw candidate to the cell actually entered (e.g. after
    /// periodic wrapping) or `None` to discard it.
    pub fn collect(
        &self,
        p: Coord<D>,
        buf: &mut Vec<Coord<D>>,
        keep: impl Fn(Coord<D>) -> Option<Coord<D>>,
    ) {
        for &d in &self.offsets {
            if let Some(n) = keep(p + d) {
                buf.push(n);
            }
        }
    }
}
