//! Distances over per-axis deltas.
//!
//! All functions take absolute per-axis differences, as produced by
//! [`Lattice::axis_deltas`](lattice_core::Lattice::axis_deltas), so the
//! same code serves bounded and periodic lattices.

/// Manhattan (L1) distance.
#[inline]
pub fn manhattan<const D: usize>(deltas: [i32; D]) -> i32 {
    deltas.iter().fold(0i32, |acc, &d| acc.saturating_add(d))
}

/// Chebyshev (L∞) distance.
#[inline]
pub fn chebyshev<const D: usize>(deltas: [i32; D]) -> i32 {
    deltas.iter().copied().max().unwrap_or(0)
}

/// Weighted Chebyshev distance for diagonal movement.
///
/// `direction_costs[k - 1]` is the price of one step moving along `k` axes
/// at once, and must hold exactly `D` entries. The shared part of all axes
/// is charged at the `D`-axis price, then each time an axis runs out the
/// remainder is charged one order lower, ending with single-axis steps for
/// the excess of the longest axis.
///
/// Saturates at `i32::MAX` instead of overflowing.
pub fn diagonal<const D: usize>(mut deltas: [i32; D], direction_costs: &[i32]) -> i32 {
    deltas.sort_unstable();
    let mut carry = 0;
    let mut cost = 0i32;
    for (i, &d) in deltas.iter().enumerate() {
        let moving = D - i;
        cost = cost.saturating_add(direction_costs[moving - 1].saturating_mul(d - carry));
        carry = d;
    }
    cost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_and_chebyshev() {
        assert_eq!(manhattan([2, 3, 0]), 5);
        assert_eq!(chebyshev([2, 3, 0]), 3);
        assert_eq!(chebyshev::<0>([]), 0);
    }

    #[test]
    fn diagonal_two_dimensions() {
        assert_eq!(diagonal([2, 2], &[10, 14]), 28);
        assert_eq!(diagonal([3, 1], &[10, 14]), 14 + 2 * 10);
        assert_eq!(diagonal([0, 4], &[10, 14]), 40);
        assert_eq!(diagonal([0, 0], &[10, 14]), 0);
    }

    #[test]
    fn diagonal_three_dimensions() {
        // One triple-axis step, two double-axis steps, one single-axis step.
        assert_eq!(diagonal([4, 1, 3], &[10, 14, 17]), 17 + 2 * 14 + 10);
    }

    #[test]
    fn huge_costs_saturate() {
        assert_eq!(diagonal([3, 5], &[i32::MAX / 2, 14]), i32::MAX);
        assert_eq!(diagonal([4, 4], &[10, i32::MAX]), i32::MAX);
        assert_eq!(manhattan([i32::MAX, 1]), i32::MAX);
    }
}
