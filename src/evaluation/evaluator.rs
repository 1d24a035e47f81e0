//! Route and solution cost evaluation.

use crate::distance::TravelCost;
use crate::models::{total_of, Route, Solution, Violation, ViolationType};

/// Cost of the closed walk `depot → visits… → depot`.
///
/// Arcs are accumulated left to right starting from zero, the same order in
/// which the constructive searches extend a route, so a route's announced
/// cost and its recomputed cost are bitwise equal. A walk with no visits
/// costs zero: the vehicle never leaves the depot.
pub fn closed_walk_cost(costs: &dyn TravelCost, depot: usize, visits: &[usize]) -> f64 {
    if visits.is_empty() {
        return 0.0;
    }
    let mut total = 0.0;
    let mut prev = depot;
    for &next in visits {
        total += costs.arc(prev, next);
        prev = next;
    }
    total + costs.arc(prev, depot)
}

/// Per-route and total cost of a set of routes.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Cost of each route, in input order.
    pub per_route: Vec<f64>,
    /// Sum of `per_route`.
    pub total: f64,
}

/// Recomputes route costs arc by arc and checks solution invariants.
///
/// # Examples
///
/// ```
/// use route_optimizer::distance::CostMatrix;
/// use route_optimizer::evaluation::SolutionEvaluator;
/// use route_optimizer::models::Route;
///
/// let dm = CostMatrix::from_rows(vec![
///     vec![0.0, 2.0, 9.0, 10.0],
///     vec![2.0, 0.0, 6.0, 4.0],
///     vec![9.0, 6.0, 0.0, 8.0],
///     vec![10.0, 4.0, 8.0, 0.0],
/// ])
/// .unwrap();
///
/// let evaluator = SolutionEvaluator::new(&dm, 0);
/// let eval = evaluator.evaluate(&[Route::new(0, 0, vec![1, 3, 2], 0.0)]);
/// assert_eq!(eval.per_route, vec![23.0]);
/// assert_eq!(eval.total, 23.0);
/// ```
pub struct SolutionEvaluator<'a> {
    costs: &'a dyn TravelCost,
    depot: usize,
}

impl<'a> SolutionEvaluator<'a> {
    pub fn new(costs: &'a dyn TravelCost, depot: usize) -> Self {
        Self { costs, depot }
    }

    /// Cost of a single route's closed walk, return arc included.
    pub fn route_cost(&self, route: &Route) -> f64 {
        closed_walk_cost(self.costs, route.depot(), route.visits())
    }

    /// Computes per-route and total cost. Inputs are not modified.
    pub fn evaluate(&self, routes: &[Route]) -> Evaluation {
        let per_route: Vec<f64> = routes.iter().map(|r| self.route_cost(r)).collect();
        let total = total_of(per_route.iter().copied());
        Evaluation { per_route, total }
    }

    /// Checks the partition, closure and cost-consistency invariants.
    ///
    /// Returns every violation found; an empty list means the solution is
    /// consistent with this evaluator's cost model and depot.
    pub fn verify(&self, solution: &Solution) -> Vec<Violation> {
        let size = self.costs.size();
        let mut violations = Vec::new();
        let mut visits = vec![0usize; size];

        for route in solution.routes() {
            let vehicle_id = route.vehicle_id();
            let stops = route.stops();
            if stops.first() != Some(&self.depot) || stops.last() != Some(&self.depot) {
                violations.push(Violation::new(ViolationType::NotClosed { vehicle_id }));
            }
            let mut in_bounds = true;
            for &location in route.visits() {
                if location >= size || location == self.depot {
                    in_bounds &= location < size;
                    violations.push(Violation::new(ViolationType::InvalidVisit {
                        vehicle_id,
                        location,
                    }));
                } else {
                    visits[location] += 1;
                }
            }
            if in_bounds && route.depot() < size {
                let recomputed = self.route_cost(route);
                if !same_cost(recomputed, route.distance()) {
                    violations.push(Violation::new(ViolationType::RouteCostMismatch {
                        vehicle_id,
                        announced: route.distance(),
                        recomputed,
                    }));
                }
            }
        }

        for (location, &count) in visits.iter().enumerate() {
            if location == self.depot {
                continue;
            }
            match count {
                0 => violations.push(Violation::new(ViolationType::Unvisited { location })),
                1 => {}
                _ => violations.push(Violation::new(ViolationType::VisitedTwice {
                    location,
                    count,
                })),
            }
        }

        let announced_routes = total_of(solution.routes().iter().map(Route::distance));
        if !same_cost(announced_routes, solution.total_cost()) {
            violations.push(Violation::new(ViolationType::TotalCostMismatch {
                announced: solution.total_cost(),
                recomputed: announced_routes,
            }));
        }

        violations
    }
}

fn same_cost(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}
