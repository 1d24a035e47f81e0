//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of positions (i, j) in a route, consider reversing the
//! segment `route[i..=j]`. On a symmetric cost model only the two boundary
//! arcs change:
//!
//! ```text
//! delta = c(prev_i, r[j]) + c(r[i], next_j) - c(prev_i, r[i]) - c(r[j], next_j)
//! ```
//!
//! On an asymmetric model the reversed segment's inner arcs change direction
//! too, so the candidate walk is costed in full.
//!
//! If the move improves the route, reverse the segment and accept it. Repeat
//! until no further improvements are found (first-improvement strategy).
//!
//! # Complexity
//!
//! O(n²) per pass on symmetric models, O(n³) per pass otherwise.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::distance::TravelCost;
use crate::evaluation::closed_walk_cost;
use crate::models::{Route, Solution};

const IMPROVEMENT_EPS: f64 = 1e-10;

/// Applies 2-opt improvement to a single route given as its visits.
///
/// The route is assumed to start and end at `depot`. Returns the improved
/// visit sequence and its closed-walk cost.
///
/// # Examples
///
/// ```
/// use route_optimizer::distance::{GeoCost, Metric};
/// use route_optimizer::local_search::two_opt_improve;
/// use route_optimizer::models::Point;
///
/// let geo = GeoCost::new(
///     vec![
///         Point::new(0.0, 0.0),
///         Point::new(1.0, 1.0),
///         Point::new(2.0, 0.0),
///         Point::new(1.0, -1.0),
///     ],
///     Metric::Euclidean,
/// )
/// .unwrap();
///
/// // Suboptimal order: 1, 3, 2 crosses itself
/// let (improved, dist) = two_opt_improve(&[1, 3, 2], 0, &geo);
/// assert_eq!(improved, vec![1, 2, 3]);
/// assert!((dist - 4.0 * 2f64.sqrt()).abs() < 1e-10);
/// ```
pub fn two_opt_improve(
    route: &[usize],
    depot: usize,
    costs: &dyn TravelCost,
) -> (Vec<usize>, f64) {
    let mut current = route.to_vec();
    if current.len() < 2 {
        let dist = closed_walk_cost(costs, depot, &current);
        return (current, dist);
    }

    let symmetric = costs.is_symmetric();
    let mut current_cost = closed_walk_cost(costs, depot, &current);
    let mut improved = true;

    while improved {
        improved = false;
        let n = current.len();

        for i in 0..n - 1 {
            for j in i + 1..n {
                if symmetric {
                    if two_opt_delta(&current, depot, costs, i, j) < -IMPROVEMENT_EPS {
                        current[i..=j].reverse();
                        current_cost = closed_walk_cost(costs, depot, &current);
                        improved = true;
                    }
                } else {
                    let mut candidate = current.clone();
                    candidate[i..=j].reverse();
                    let candidate_cost = closed_walk_cost(costs, depot, &candidate);
                    if candidate_cost < current_cost - IMPROVEMENT_EPS {
                        current = candidate;
                        current_cost = candidate_cost;
                        improved = true;
                    }
                }
            }
        }
    }

    (current, current_cost)
}

/// Computes the cost change from reversing `route[i..=j]` on a symmetric
/// cost model.
///
/// Before: ...-prev_i - route[i] - route[i+1] - ... - route[j] - next_j-...
/// After:  ...-prev_i - route[j] - route[j-1] - ... - route[i] - next_j-...
fn two_opt_delta(
    route: &[usize],
    depot: usize,
    costs: &dyn TravelCost,
    i: usize,
    j: usize,
) -> f64 {
    let n = route.len();
    let prev_i = if i == 0 { depot } else { route[i - 1] };
    let next_j = if j == n - 1 { depot } else { route[j + 1] };

    let old_cost = costs.arc(prev_i, route[i]) + costs.arc(route[j], next_j);
    let new_cost = costs.arc(prev_i, route[j]) + costs.arc(route[i], next_j);

    new_cost - old_cost
}

/// Applies [`two_opt_improve`] to every route of a solution.
///
/// A route is replaced only when 2-opt strictly lowers its cost, so routes
/// that are already 2-optimal keep their exact order and cost. Every vehicle
/// keeps its own stops: the partition is unchanged.
pub fn improve_solution(solution: &Solution, costs: &dyn TravelCost) -> Solution {
    let routes = solution
        .routes()
        .iter()
        .map(|route| {
            if route.len() < 2 {
                return route.clone();
            }
            let (visits, cost) = two_opt_improve(route.visits(), route.depot(), costs);
            if cost < route.distance() {
                Route::new(route.vehicle_id(), route.depot(), visits, cost)
            } else {
                route.clone()
            }
        })
        .collect();
    Solution::new(routes)
}
