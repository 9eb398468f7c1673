//! Cost metrics.
//!
//! A [`CostMetric`] prices the movement between two cells. The same value
//! serves as the A* heuristic and as the cost of a single step, so every
//! variant must stay admissible and consistent for searches to be optimal.

use lattice_core::{Coord, Lattice, LatticeArray};

use crate::distance;
use crate::error::PathfinderError;

/// Default per-order step prices: `floor(10 * sqrt(k))` for `k = 1..=D`.
pub fn default_direction_costs<const D: usize>() -> Vec<i32> {
    (1..=D)
        .map(|k| (10.0 * (k as f64).sqrt()).floor() as i32)
        .collect()
}

/// How the distance between two cells is computed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CostMetric<const D: usize> {
    /// Diagonal movement priced by how many axes a step moves along.
    /// `direction_costs[k - 1]` is the price of a `k`-axis step.
    Diagonal { direction_costs: Vec<i32> },
    /// Axis-aligned movement: Manhattan distance times `border_cost`.
    Axis { border_cost: i32 },
    /// A base metric plus the absolute height difference of the endpoints.
    Height {
        base: Box<CostMetric<D>>,
        heights: LatticeArray<i32, D>,
    },
}

impl<const D: usize> Default for CostMetric<D> {
    fn default() -> Self {
        Self::diagonal()
    }
}

impl<const D: usize> CostMetric<D> {
    /// Diagonal metric with the default direction costs.
    pub fn diagonal() -> Self {
        Self::Diagonal {
            direction_costs: default_direction_costs::<D>(),
        }
    }

    /// Diagonal metric with explicit direction costs (one per order).
    pub fn diagonal_with(direction_costs: Vec<i32>) -> Result<Self, PathfinderError> {
        let m = Self::Diagonal { direction_costs };
        m.check_costs()?;
        Ok(m)
    }

    /// Axis metric with the given single-axis step cost.
    pub fn axis(border_cost: i32) -> Result<Self, PathfinderError> {
        let m = Self::Axis { border_cost };
        m.check_costs()?;
        Ok(m)
    }

    /// Height metric over the default diagonal metric.
    pub fn height(heights: LatticeArray<i32, D>) -> Self {
        Self::height_with(Self::diagonal(), heights)
    }

    /// Height metric over an arbitrary base metric.
    pub fn height_with(base: CostMetric<D>, heights: LatticeArray<i32, D>) -> Self {
        Self::Height {
            base: Box::new(base),
            heights,
        }
    }

    /// Distance estimate between two in-bounds cells. Saturates at
    /// `i32::MAX`, so extreme costs or heights never overflow.
    pub fn delta_cost(
        &self,
        lattice: &Lattice<D>,
        periodic: bool,
        from: Coord<D>,
        to: Coord<D>,
    ) -> i32 {
        match self {
            Self::Diagonal { direction_costs } => {
                distance::diagonal(lattice.axis_deltas(from, to, periodic), direction_costs)
            }
            Self::Axis { border_cost } => {
                let steps = distance::manhattan(lattice.axis_deltas(from, to, periodic));
                border_cost.saturating_mul(steps)
            }
            Self::Height { base, heights } => {
                let hf = heights.at(from).copied().unwrap_or(0);
                let ht = heights.at(to).copied().unwrap_or(0);
                let climb = i32::try_from(hf.abs_diff(ht)).unwrap_or(i32::MAX);
                base.delta_cost(lattice, periodic, from, to).saturating_add(climb)
            }
        }
    }

    /// Check the metric against the grid it will run on.
    pub(crate) fn validate(&self, lattice: &Lattice<D>) -> Result<(), PathfinderError> {
        self.check_costs()?;
        if let Self::Height { base, heights } = self {
            if heights.lattice() != *lattice {
                return Err(PathfinderError::ShapeMismatch {
                    what: "height map",
                    expected: lattice.to_string(),
                    found: heights.lattice().to_string(),
                });
            }
            base.validate(lattice)?;
        }
        Ok(())
    }

    fn check_costs(&self) -> Result<(), PathfinderError> {
        match self {
            Self::Diagonal { direction_costs } => {
                if direction_costs.len() != D {
                    return Err(PathfinderError::InvalidMetric(format!(
                        "expected {D} direction costs, found {}",
                        direction_costs.len()
                    )));
                }
                if direction_costs.iter().any(|&c| c < 0) {
                    return Err(PathfinderError::InvalidMetric(
                        "direction costs must be non-negative".into(),
                    ));
                }
            }
            Self::Axis { border_cost } => {
                if *border_cost < 0 {
                    return Err(PathfinderError::InvalidMetric(format!(
                        "border cost {border_cost} is negative"
                    )));
                }
            }
            Self::Height { .. } => {}
        }
        Ok(())
    }
}
