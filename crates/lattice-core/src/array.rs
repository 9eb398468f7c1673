//! A dense array with one value per lattice cell.
//!
//! [`LatticeArray`] backs walkability masks and height maps. Values are
//! stored in the flat-index order of the owning [`Lattice`].

use crate::error::LatticeError;
use crate::geom::{Coord, Lattice};

/// A `D`-dimensional array shaped like a [`Lattice`].
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeArray<T, const D: usize> {
    lattice: Lattice<D>,
    cells: Vec<T>,
}

impl<T: Clone, const D: usize> LatticeArray<T, D> {
    /// Create an array with every cell set to `value`.
    pub fn filled(lattice: Lattice<D>, value: T) -> Self {
        Self {
            cells: vec![value; lattice.len()],
            lattice,
        }
    }

    /// Fill the whole array with `value`.
    pub fn fill(&mut self, value: T) {
        for v in self.cells.iter_mut() {
            *v = value.clone();
        }
    }
}

impl<T, const D: usize> LatticeArray<T, D> {
    /// Create an array by evaluating `f` at every cell.
    pub fn from_fn(lattice: Lattice<D>, mut f: impl FnMut(Coord<D>) -> T) -> Self {
        Self {
            cells: lattice.iter().map(&mut f).collect(),
            lattice,
        }
    }

    /// Wrap a flat buffer laid out in flat-index order (axis 0 fastest).
    pub fn from_vec(lattice: Lattice<D>, cells: Vec<T>) -> Result<Self, LatticeError> {
        if cells.len() != lattice.len() {
            return Err(LatticeError::ShapeMismatch {
                expected: lattice.len(),
                found: cells.len(),
            });
        }
        Ok(Self { lattice, cells })
    }

    /// The shape of the array.
    #[inline]
    pub fn lattice(&self) -> Lattice<D> {
        self.lattice
    }

    /// Value at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Coord<D>) -> Option<&T> {
        self.lattice.index(c).map(|i| &self.cells[i])
    }

    /// Value at a flat index.
    #[inline]
    pub fn at_index(&self, idx: usize) -> Option<&T> {
        self.cells.get(idx)
    }

    /// Set the value at `c`. Returns `false` (and does nothing) if `c` is
    /// out of bounds.
    pub fn set(&mut self, c: Coord<D>, value: T) -> bool {
        match self.lattice.index(c) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// Count the cells satisfying a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(&T) -> bool) -> usize {
        self.cells.iter().filter(|v| f(v)).count()
    }

    /// Flat view of the values.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    /// Iterate over `(Coord, &T)` pairs in flat-index order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord<D>, &T)> + '_ {
        self.lattice.iter().zip(self.cells.iter())
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize, const D: usize> serde::Serialize for LatticeArray<T, D> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut st = serializer.serialize_struct("LatticeArray", 2)?;
        st.serialize_field("lattice", &self.lattice)?;
        st.serialize_field("cells", &self.cells)?;
        st.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>, const D: usize> serde::Deserialize<'de>
    for LatticeArray<T, D>
{
    fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        use serde::de::Error;

        #[derive(serde::Deserialize)]
        #[serde(bound = "T: serde::Deserialize<'de>")]
        struct Raw<T, const D: usize> {
            lattice: Lattice<D>,
            cells: Vec<T>,
        }

        let raw = Raw::<T, D>::deserialize(deserializer)?;
        LatticeArray::from_vec(raw.lattice, raw.cells).map_err(De::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lattice() -> Lattice<2> {
        Lattice::new([4, 3]).unwrap()
    }

    #[test]
    fn filled_and_set() {
        let mut a = LatticeArray::filled(lattice(), true);
        assert_eq!(a.count_fn(|&w| w), 12);
        assert!(a.set(Coord::new([2, 3]), false));
        assert!(!a.set(Coord::new([5, 1]), false));
        assert_eq!(a.at(Coord::new([2, 3])), Some(&false));
        assert_eq!(a.at(Coord::new([0, 3])), None);
        assert_eq!(a.count_fn(|&w| !w), 1);
    }

    #[test]
    fn from_fn_follows_flat_order() {
        let a = LatticeArray::from_fn(lattice(), |c| c[0] * 10 + c[1]);
        assert_eq!(a.as_slice()[0], 11);
        assert_eq!(a.as_slice()[1], 21);
        assert_eq!(a.at(Coord::new([4, 3])), Some(&43));
        let (c, v) = a.iter().last().unwrap();
        assert_eq!(c, Coord::new([4, 3]));
        assert_eq!(*v, 43);
    }

    #[test]
    fn from_vec_checks_length() {
        let err = LatticeArray::from_vec(lattice(), vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            LatticeError::ShapeMismatch {
                expected: 12,
                found: 11
            }
        );
        let ok = LatticeArray::from_vec(lattice(), (0..12).collect()).unwrap();
        assert_eq!(ok.at_index(5), Some(&5));
    }

    #[test]
    fn fill_overwrites_everything() {
        let mut a = LatticeArray::filled(lattice(), 1);
        a.fill(7);
        assert_eq!(a.count_fn(|&v| v == 7), 12);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn array_round_trip() {
        let l = Lattice::new([2, 2]).unwrap();
        let a = LatticeArray::from_vec(l, vec![1, 2, 3, 4]).unwrap();
        let json = serde_json::to_string(&a).unwrap();
        let back: LatticeArray<i32, 2> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn array_with_wrong_cell_count_is_rejected() {
        let json = r#"{"lattice":[2,2],"cells":[1,2,3]}"#;
        assert!(serde_json::from_str::<LatticeArray<i32, 2>>(json).is_err());
    }
}
