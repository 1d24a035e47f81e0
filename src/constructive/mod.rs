//! Constructive heuristics for building a single tour.
//!
//! - [`NearestNeighbor`]: Greedy nearest-neighbor ordering, O(n²)
//! - [`Sequential`]: Visits points in the order given, O(n)
//!
//! Both implement [`TourConstructor`] and can be picked at run time through
//! [`ConstructionStrategy`].

mod nearest_neighbor;
mod sequential;

use serde::{Deserialize, Serialize};

use crate::distance::TravelCost;

pub use nearest_neighbor::NearestNeighbor;
pub use sequential::Sequential;

/// An ordered visiting sequence bracketed by its start point.
///
/// `visits` excludes the start; `cost` is the closed-walk cost
/// `start → visits… → start`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Points in visiting order.
    pub visits: Vec<usize>,
    /// Cost of the closed walk, return arc included.
    pub cost: f64,
    /// Points that could not be reached at finite cost.
    pub unreached: Vec<usize>,
}

impl Tour {
    /// The tour of an idle vehicle: no visits, zero cost.
    pub fn empty() -> Self {
        Self {
            visits: Vec::new(),
            cost: 0.0,
            unreached: Vec::new(),
        }
    }

    /// Returns `true` if every requested point was visited.
    pub fn is_complete(&self) -> bool {
        self.unreached.is_empty()
    }
}

/// Produces an ordered visiting sequence from a start point over a set of
/// unvisited points.
pub trait TourConstructor {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Orders `points` into a tour starting and ending at `start`.
    ///
    /// Occurrences of `start` inside `points` are ignored. An empty point set
    /// yields [`Tour::empty`].
    fn construct(&self, costs: &dyn TravelCost, start: usize, points: &[usize]) -> Tour;
}

/// Run-time selection of a [`TourConstructor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConstructionStrategy {
    #[default]
    NearestNeighbor,
    Sequential,
}

impl ConstructionStrategy {
    /// Returns the constructor implementing this strategy.
    pub fn constructor(self) -> Box<dyn TourConstructor> {
        match self {
            Self::NearestNeighbor => Box::new(NearestNeighbor),
            Self::Sequential => Box::new(Sequential),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;

    #[test]
    fn test_strategy_dispatch() {
        assert_eq!(
            ConstructionStrategy::NearestNeighbor.constructor().name(),
            "nearest-neighbor"
        );
        assert_eq!(
            ConstructionStrategy::Sequential.constructor().name(),
            "sequential"
        );
        assert_eq!(
            ConstructionStrategy::default(),
            ConstructionStrategy::NearestNeighbor
        );
    }

    #[test]
    fn test_strategies_agree_on_empty_input() {
        let dm = CostMatrix::from_rows(vec![vec![0.0]]).expect("valid");
        for strategy in [
            ConstructionStrategy::NearestNeighbor,
            ConstructionStrategy::Sequential,
        ] {
            let tour = strategy.constructor().construct(&dm, 0, &[]);
            assert_eq!(tour, Tour::empty());
            assert!(tour.is_complete());
        }
    }
}
