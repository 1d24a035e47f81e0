//! Solution and violation types.

use serde::{Deserialize, Serialize};

use super::Route;

/// A broken invariant found when checking a solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViolationType {
    /// A stop is not visited by any vehicle.
    Unvisited {
        /// Location index.
        location: usize,
    },
    /// A stop is visited more than once across the solution.
    VisitedTwice {
        /// Location index.
        location: usize,
        /// Number of visits found.
        count: usize,
    },
    /// A route does not start and end at the depot.
    NotClosed {
        /// Vehicle owning the route.
        vehicle_id: usize,
    },
    /// A route passes through the depot between its endpoints, or visits a
    /// location outside the problem.
    InvalidVisit {
        /// Vehicle owning the route.
        vehicle_id: usize,
        /// Offending location index.
        location: usize,
    },
    /// The cost stored on a route differs from the recomputed cost.
    RouteCostMismatch {
        /// Vehicle owning the route.
        vehicle_id: usize,
        /// Cost stored on the route.
        announced: f64,
        /// Cost recomputed arc by arc.
        recomputed: f64,
    },
    /// The solution total differs from the sum of recomputed route costs.
    TotalCostMismatch {
        /// Total stored on the solution.
        announced: f64,
        /// Recomputed total.
        recomputed: f64,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// A complete solution: one route per vehicle plus the total cost.
///
/// The total is the sum of the route costs, accumulated in vehicle order.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::{Route, Solution};
///
/// let sol = Solution::new(vec![
///     Route::new(0, 0, vec![1, 2], 10.0),
///     Route::idle(1, 0),
/// ]);
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 2);
/// assert_eq!(sol.total_cost(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SolutionRecord")]
pub struct Solution {
    routes: Vec<Route>,
    total_cost: f64,
}

impl Solution {
    /// Creates a solution from routes listed in vehicle order.
    pub fn new(routes: Vec<Route>) -> Self {
        let total_cost = total_of(routes.iter().map(Route::distance));
        Self { routes, total_cost }
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes (one per vehicle, idle ones included).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of vehicles that leave the depot.
    pub fn num_active_routes(&self) -> usize {
        self.routes.iter().filter(|r| !r.is_empty()).count()
    }

    /// Returns the total cost of this solution.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Cost of every route, in vehicle order.
    pub fn route_costs(&self) -> Vec<f64> {
        self.routes.iter().map(Route::distance).collect()
    }

    /// Total number of stops served (across all routes).
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}

/// Serialized form; the stored total is ignored and recomputed.
#[derive(Deserialize)]
struct SolutionRecord {
    routes: Vec<Route>,
}

impl From<SolutionRecord> for Solution {
    fn from(record: SolutionRecord) -> Self {
        Self::new(record.routes)
    }
}

/// Sums costs left to right starting from zero.
pub(crate) fn total_of(costs: impl IntoIterator<Item = f64>) -> f64 {
    costs.into_iter().fold(0.0, |acc, c| acc + c)
}
