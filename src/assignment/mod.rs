//! Fleet-wide route assignment.
//!
//! - [`RouteAssigner`]: Cheapest-arc extension across all vehicles at once
//! - [`GiantTourAssigner`]: One constructed giant tour, split across vehicles
//!
//! Both return an [`Assignment`]: a [`Solution`] satisfying the partition
//! invariant, or a typed [`Infeasibility`] when the search cannot complete it.

mod cancel;
mod cheapest_arc;
mod giant_tour;
mod index_map;
mod state;

pub use cancel::CancelToken;
pub use cheapest_arc::RouteAssigner;
pub use giant_tour::{split_tour, GiantTourAssigner};
pub use index_map::{IndexMap, NodeIndex};
pub use state::SearchState;

use crate::error::{Error, Result};
use crate::models::Solution;

/// Why a search could not produce a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfeasibleReason {
    /// Stops remain but none can be reached at finite cost.
    NoSelectableArc,
    /// A vehicle's tour cannot return to the depot at finite cost.
    UnclosableRoute { vehicle: usize },
    /// Every way of cutting the giant tour has infinite cost.
    NoFiniteSplit,
}

/// Details of an infeasible outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Infeasibility {
    pub reason: InfeasibleReason,
    /// Assignments made before the search stopped.
    pub assigned: usize,
    /// Stops that could not be routed.
    pub unassigned: Vec<usize>,
}

/// Outcome of an assignment run.
///
/// Zero stops is not infeasible: it yields a solution of idle routes with
/// zero cost.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    Solved(Solution),
    Infeasible(Infeasibility),
}

impl Assignment {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            Self::Infeasible(_) => None,
        }
    }

    /// Converts the outcome into a solution, mapping infeasibility to
    /// [`Error::NoFeasibleSolution`].
    pub fn into_solution(self) -> Result<Solution> {
        match self {
            Self::Solved(solution) => Ok(solution),
            Self::Infeasible(inf) => Err(Error::NoFeasibleSolution {
                unassigned: inf.unassigned.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Route;

    #[test]
    fn test_assignment_accessors() {
        let solved = Assignment::Solved(Solution::new(vec![Route::idle(0, 0)]));
        assert!(solved.is_feasible());
        assert_eq!(solved.solution().map(Solution::num_routes), Some(1));

        let infeasible = Assignment::Infeasible(Infeasibility {
            reason: InfeasibleReason::NoSelectableArc,
            assigned: 0,
            unassigned: vec![3, 4],
        });
        assert!(!infeasible.is_feasible());
        assert!(infeasible.solution().is_none());
        assert!(matches!(
            infeasible.into_solution(),
            Err(Error::NoFeasibleSolution { unassigned: 2 })
        ));
    }
}
