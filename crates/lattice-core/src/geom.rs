//! Geometry primitives: [`Coord`] and [`Lattice`].
//!
//! Coordinates are 1-based: on an axis of extent `n` the valid components
//! are `1..=n`. A lattice can optionally be treated as periodic, in which
//! case every axis wraps modulo its extent.

use std::fmt;
use std::ops::{Add, Index, Sub};

use crate::error::LatticeError;

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A cell of a `D`-dimensional lattice.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord<const D: usize>(pub [i32; D]);

impl<const D: usize> Coord<D> {
    /// Create a new coordinate.
    #[inline]
    pub const fn new(axes: [i32; D]) -> Self {
        Self(axes)
    }

    /// A coordinate with every component set to `v`.
    #[inline]
    pub const fn splat(v: i32) -> Self {
        Self([v; D])
    }

    /// The component along `axis`.
    #[inline]
    pub fn get(self, axis: usize) -> i32 {
        self.0[axis]
    }

    /// All components.
    #[inline]
    pub fn axes(&self) -> &[i32; D] {
        &self.0
    }

    /// Whether every component is zero (the null offset).
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }

    /// Number of non-zero components. For a neighbour offset this is the
    /// number of axes the step moves along.
    #[inline]
    pub fn order(self) -> usize {
        self.0.iter().filter(|&&v| v != 0).count()
    }
}

impl<const D: usize> From<[i32; D]> for Coord<D> {
    fn from(axes: [i32; D]) -> Self {
        Self(axes)
    }
}

impl<const D: usize> Index<usize> for Coord<D> {
    type Output = i32;
    #[inline]
    fn index(&self, axis: usize) -> &i32 {
        &self.0[axis]
    }
}

impl<const D: usize> Add for Coord<D> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|k| self.0[k] + rhs.0[k]))
    }
}

impl<const D: usize> Sub for Coord<D> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|k| self.0[k] - rhs.0[k]))
    }
}

impl<const D: usize> fmt::Display for Coord<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (k, v) in self.0.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}

// ---------------------------------------------------------------------------
// Lattice
// ---------------------------------------------------------------------------

/// The shape of a `D`-dimensional lattice: one positive extent per axis.
///
/// `Lattice` maps coordinates to flat indices (axis 0 varies fastest) and
/// provides the periodic arithmetic shared by metrics and searches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Lattice<const D: usize> {
    extents: [i32; D],
    strides: [usize; D],
    len: usize,
}

impl<const D: usize> Lattice<D> {
    /// Create a lattice. Every extent must be positive.
    pub fn new(extents: [i32; D]) -> Result<Self, LatticeError> {
        let mut strides = [0usize; D];
        let mut len = 1usize;
        for (axis, &extent) in extents.iter().enumerate() {
            if extent <= 0 {
                return Err(LatticeError::NonPositiveExtent { axis, extent });
            }
            strides[axis] = len;
            len *= extent as usize;
        }
        Ok(Self {
            extents,
            strides,
            len,
        })
    }

    /// Extent of every axis.
    #[inline]
    pub fn extents(&self) -> [i32; D] {
        self.extents
    }

    /// Extent of a single axis.
    #[inline]
    pub fn extent(&self, axis: usize) -> i32 {
        self.extents[axis]
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: extents are validated to be positive.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `c` lies inside the lattice (`1..=extent` on every axis).
    #[inline]
    pub fn contains(&self, c: Coord<D>) -> bool {
        c.0.iter()
            .zip(self.extents.iter())
            .all(|(&v, &e)| v >= 1 && v <= e)
    }

    /// Flat index of `c`, or `None` if it is outside the lattice.
    #[inline]
    pub fn index(&self, c: Coord<D>) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(
            c.0.iter()
                .zip(self.strides.iter())
                .map(|(&v, &s)| (v - 1) as usize * s)
                .sum(),
        )
    }

    /// Coordinate of a flat index. `idx` must be below [`len`](Self::len).
    #[inline]
    pub fn coord(&self, idx: usize) -> Coord<D> {
        Coord(std::array::from_fn(|k| {
            ((idx / self.strides[k]) % self.extents[k] as usize) as i32 + 1
        }))
    }

    /// Wrap every component into `1..=extent`.
    #[inline]
    pub fn wrap(&self, c: Coord<D>) -> Coord<D> {
        Coord(std::array::from_fn(|k| {
            (c.0[k] - 1).rem_euclid(self.extents[k]) + 1
        }))
    }

    /// Bring `c` into the lattice: wrapped when `periodic`, otherwise
    /// `None` for anything out of bounds.
    #[inline]
    pub fn normalize(&self, c: Coord<D>, periodic: bool) -> Option<Coord<D>> {
        if periodic {
            Some(self.wrap(c))
        } else if self.contains(c) {
            Some(c)
        } else {
            None
        }
    }

    /// Absolute per-axis distance between two cells. When `periodic`, each
    /// axis takes the shorter way around: `min(d, extent - d)`.
    #[inline]
    pub fn axis_deltas(&self, from: Coord<D>, to: Coord<D>, periodic: bool) -> [i32; D] {
        std::array::from_fn(|k| {
            let d = (to.0[k] - from.0[k]).abs();
            if periodic {
                d.min(self.extents[k] - d)
            } else {
                d
            }
        })
    }

    /// Iterator over every cell in flat-index order.
    #[inline]
    pub fn iter(&self) -> LatticeIter<D> {
        LatticeIter {
            lattice: *self,
            next: 0,
        }
    }
}

impl<const D: usize> IntoIterator for Lattice<D> {
    type Item = Coord<D>;
    type IntoIter = LatticeIter<D>;
    #[inline]
    fn into_iter(self) -> LatticeIter<D> {
        self.iter()
    }
}

impl<const D: usize> fmt::Display for Lattice<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (k, e) in self.extents.iter().enumerate() {
            if k > 0 {
                write!(f, "x")?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LatticeIter
// ---------------------------------------------------------------------------

/// Flat-index-order iterator over the cells of a [`Lattice`].
#[derive(Clone, Debug)]
pub struct LatticeIter<const D: usize> {
    lattice: Lattice<D>,
    next: usize,
}

impl<const D: usize> Iterator for LatticeIter<D> {
    type Item = Coord<D>;

    #[inline]
    fn next(&mut self) -> Option<Coord<D>> {
        if self.next >= self.lattice.len() {
            return None;
        }
        let c = self.lattice.coord(self.next);
        self.next += 1;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.lattice.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<const D: usize> ExactSizeIterator for LatticeIter<D> {}

// ---------------------------------------------------------------------------
// serde
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
pub(crate) fn deserialize_axes<'de, De, const D: usize>(deserializer: De) -> Result<[i32; D], De::Error>
where
    De: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    use serde::de::Error;

    let v = Vec::<i32>::deserialize(deserializer)?;
    let len = v.len();
    v.try_into()
        .map_err(|_| De::Error::invalid_length(len, &format!("{D} components").as_str()))
}

#[cfg(feature = "serde")]
impl<const D: usize> serde::Serialize for Coord<D> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(self.0.as_slice(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, const D: usize> serde::Deserialize<'de> for Coord<D> {
    fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        deserialize_axes(deserializer).map(Coord)
    }
}

#[cfg(feature = "serde")]
impl<const D: usize> serde::Serialize for Lattice<D> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(self.extents.as_slice(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, const D: usize> serde::Deserialize<'de> for Lattice<D> {
    fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        use serde::de::Error;
        let extents = deserialize_axes(deserializer)?;
        Lattice::new(extents).map_err(De::Error::custom)
    }
}
