//! Naive sequential tour: visits points in the order given.

use super::{Tour, TourConstructor};
use crate::distance::TravelCost;
use crate::evaluation::closed_walk_cost;

/// Visits points exactly in input order, without looking at costs.
///
/// Deterministic and O(n); useful as a baseline for the cost-driven
/// heuristics.
///
/// # Examples
///
/// ```
/// use route_optimizer::constructive::{Sequential, TourConstructor};
/// use route_optimizer::distance::CostMatrix;
///
/// let dm = CostMatrix::from_rows(vec![
///     vec![0.0, 2.0, 9.0],
///     vec![2.0, 0.0, 6.0],
///     vec![9.0, 6.0, 0.0],
/// ])
/// .unwrap();
/// let tour = Sequential.construct(&dm, 0, &[2, 1]);
/// assert_eq!(tour.visits, vec![2, 1]);
/// assert_eq!(tour.cost, 9.0 + 6.0 + 2.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl TourConstructor for Sequential {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn construct(&self, costs: &dyn TravelCost, start: usize, points: &[usize]) -> Tour {
        let visits: Vec<usize> = points.iter().copied().filter(|&p| p != start).collect();
        let cost = closed_walk_cost(costs, start, &visits);
        Tour {
            visits,
            cost,
            unreached: Vec::new(),
        }
    }
}
