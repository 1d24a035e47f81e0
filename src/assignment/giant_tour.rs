//! Route-first, cluster-second assignment.
//!
//! # Algorithm
//!
//! A [`TourConstructor`] orders every stop into one giant tour from the
//! depot. The tour is then cut into at most K consecutive segments, each
//! served by one vehicle as a depot-anchored closed walk, choosing the cuts
//! that minimize the total cost.
//!
//! The cut search is a shortest-path problem on an auxiliary graph where node
//! `j` is the boundary after the j-th stop and edge `(i, j)` serves stops
//! `i..j` in one route, layered by the number of routes used.
//!
//! # Complexity
//!
//! O(K · n²) where n = number of stops and K = fleet size.
//!
//! # Reference
//!
//! Prins, C. (2004). "A simple and effective evolutionary algorithm for the
//! vehicle routing problem", *Computers & Operations Research* 31(12), 1985-2002.

use log::{debug, info, warn};

use super::{Assignment, CancelToken, InfeasibleReason, Infeasibility};
use crate::constructive::{ConstructionStrategy, TourConstructor};
use crate::distance::TravelCost;
use crate::error::{Error, Result};
use crate::evaluation::closed_walk_cost;
use crate::models::{Fleet, Route, Solution};

/// Splits a giant tour into at most `max_routes` depot-anchored routes with
/// minimum total cost.
///
/// Returns `None` if every split has non-finite cost. On equal cost the split
/// with fewer routes wins. An empty tour yields no routes.
///
/// # Examples
///
/// ```
/// use route_optimizer::assignment::split_tour;
/// use route_optimizer::distance::CostMatrix;
///
/// // Two clusters far apart on a line: 1, 2 near the depot; 3, 4 far away.
/// let xs: [f64; 5] = [0.0, 1.0, 2.0, 10.0, 11.0];
/// let dm = CostMatrix::from_fn(5, |i, j| (xs[i] - xs[j]).abs()).unwrap();
///
/// let routes = split_tour(&dm, 0, &[1, 2, 3, 4], 2).unwrap();
/// assert_eq!(routes, vec![vec![1, 2, 3, 4]]);
/// ```
pub fn split_tour(
    costs: &dyn TravelCost,
    depot: usize,
    tour: &[usize],
    max_routes: usize,
) -> Option<Vec<Vec<usize>>> {
    let n = tour.len();
    if n == 0 {
        return Some(Vec::new());
    }
    if max_routes == 0 {
        return None;
    }

    // best[k][j] = minimum cost to serve tour[0..j] with exactly k routes
    // pred[k][j] = start of the last route in that optimum
    let mut best = vec![vec![f64::INFINITY; n + 1]; max_routes + 1];
    let mut pred = vec![vec![0usize; n + 1]; max_routes + 1];
    best[0][0] = 0.0;

    for k in 1..=max_routes {
        for i in 0..n {
            let base = best[k - 1][i];
            if !base.is_finite() {
                continue;
            }
            let mut route_cost = 0.0;
            for j in i..n {
                route_cost += if j == i {
                    costs.arc(depot, tour[j])
                } else {
                    costs.arc(tour[j - 1], tour[j])
                };
                if !route_cost.is_finite() {
                    break;
                }
                let candidate = base + route_cost + costs.arc(tour[j], depot);
                if candidate < best[k][j + 1] {
                    best[k][j + 1] = candidate;
                    pred[k][j + 1] = i;
                }
            }
        }
    }

    let mut routes_used = 0;
    for k in 1..=max_routes {
        if best[k][n] < best[routes_used][n] {
            routes_used = k;
        }
    }
    if routes_used == 0 {
        return None;
    }

    let mut routes = Vec::with_capacity(routes_used);
    let mut j = n;
    for k in (1..=routes_used).rev() {
        let i = pred[k][j];
        routes.push(tour[i..j].to_vec());
        j = i;
    }
    routes.reverse();
    Some(routes)
}

/// Assigns stops by splitting one giant tour across the fleet.
///
/// # Examples
///
/// ```
/// use route_optimizer::assignment::GiantTourAssigner;
/// use route_optimizer::constructive::ConstructionStrategy;
/// use route_optimizer::distance::CostMatrix;
/// use route_optimizer::models::Fleet;
///
/// let dm = CostMatrix::from_rows(vec![
///     vec![0.0, 2.0, 9.0, 10.0],
///     vec![2.0, 0.0, 6.0, 4.0],
///     vec![9.0, 6.0, 0.0, 8.0],
///     vec![10.0, 4.0, 8.0, 0.0],
/// ])
/// .unwrap();
///
/// let assigner = GiantTourAssigner::new(
///     &dm,
///     0,
///     Fleet::new(2).unwrap(),
///     ConstructionStrategy::Sequential,
/// )
/// .unwrap();
/// let solution = assigner.assign().unwrap().into_solution().unwrap();
/// assert_eq!(solution.num_routes(), 2);
/// assert_eq!(solution.num_served(), 3);
/// ```
pub struct GiantTourAssigner<'a> {
    costs: &'a dyn TravelCost,
    depot: usize,
    fleet: Fleet,
    constructor: Box<dyn TourConstructor>,
    cancel: Option<CancelToken>,
}

impl<'a> GiantTourAssigner<'a> {
    /// Fails with [`Error::InvalidIndex`] if the depot is out of bounds.
    pub fn new(
        costs: &'a dyn TravelCost,
        depot: usize,
        fleet: Fleet,
        strategy: ConstructionStrategy,
    ) -> Result<Self> {
        Error::check_index(depot, costs.size())?;
        Ok(Self {
            costs,
            depot,
            fleet,
            constructor: strategy.constructor(),
            cancel: None,
        })
    }

    /// Polls `token` once the giant tour is built.
    pub fn with_cancellation(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn assign(&self) -> Result<Assignment> {
        let stops: Vec<usize> = (0..self.costs.size()).filter(|&i| i != self.depot).collect();
        info!(
            "building {} giant tour over {} stop(s) for {} vehicle(s)",
            self.constructor.name(),
            stops.len(),
            self.fleet.size()
        );

        let tour = self.constructor.construct(self.costs, self.depot, &stops);
        if !tour.is_complete() {
            warn!("giant tour left {} stop(s) unreached", tour.unreached.len());
            return Ok(Assignment::Infeasible(Infeasibility {
                reason: InfeasibleReason::NoSelectableArc,
                assigned: tour.visits.len(),
                unassigned: tour.unreached,
            }));
        }
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            return Err(Error::Cancelled {
                assigned: tour.visits.len(),
            });
        }

        let Some(segments) = split_tour(self.costs, self.depot, &tour.visits, self.fleet.size())
        else {
            warn!("every split of the giant tour has infinite cost");
            return Ok(Assignment::Infeasible(Infeasibility {
                reason: InfeasibleReason::NoFiniteSplit,
                assigned: 0,
                unassigned: tour.visits,
            }));
        };
        debug!("giant tour split into {} route(s)", segments.len());

        let mut segments = segments.into_iter();
        let routes = self
            .fleet
            .vehicle_ids()
            .map(|vehicle| {
                let visits = segments.next().unwrap_or_default();
                let cost = closed_walk_cost(self.costs, self.depot, &visits);
                Route::new(vehicle, self.depot, visits, cost)
            })
            .collect();
        Ok(Assignment::Solved(Solution::new(routes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;
    use crate::evaluation::SolutionEvaluator;

    fn line(xs: &[f64]) -> CostMatrix {
        CostMatrix::from_fn(xs.len(), |i, j| (xs[i] - xs[j]).abs()).expect("valid")
    }

    #[test]
    fn test_split_single_route() {
        let dm = line(&[0.0, 1.0, 2.0, 3.0]);
        let routes = split_tour(&dm, 0, &[1, 2, 3], 3).expect("finite");
        // On a line one route is never worse: 0→1→2→3→0 = 6
        assert_eq!(routes, vec![vec![1, 2, 3]]);
    }

    #[test]
    fn test_split_empty() {
        let dm = line(&[0.0, 1.0]);
        assert_eq!(split_tour(&dm, 0, &[], 2), Some(Vec::new()));
    }

    #[test]
    fn test_split_prefers_cut_when_cheaper() {
        // Going 1→2 directly is expensive; returning to the depot between
        // them is cheaper.
        let dm = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 10.0],
            vec![1.0, 10.0, 0.0],
        ])
        .expect("valid");
        let routes = split_tour(&dm, 0, &[1, 2], 2).expect("finite");
        assert_eq!(routes, vec![vec![1], vec![2]]);
        // One vehicle only: forced into a single route.
        let routes = split_tour(&dm, 0, &[1, 2], 1).expect("finite");
        assert_eq!(routes, vec![vec![1, 2]]);
    }

    #[test]
    fn test_split_avoids_infinite_arc() {
        let dm = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, f64::INFINITY],
            vec![1.0, 1.0, 0.0],
        ])
        .expect("valid");
        assert_eq!(split_tour(&dm, 0, &[1, 2], 1), None);
        assert_eq!(
            split_tour(&dm, 0, &[1, 2], 2),
            Some(vec![vec![1], vec![2]])
        );
    }

    #[test]
    fn test_assigner_pads_idle_vehicles() {
        let dm = line(&[0.0, 1.0, 2.0, 3.0]);
        let assigner = GiantTourAssigner::new(
            &dm,
            0,
            Fleet::new(3).expect("fleet"),
            ConstructionStrategy::NearestNeighbor,
        )
        .expect("valid");
        let sol = assigner
            .assign()
            .expect("not cancelled")
            .into_solution()
            .expect("feasible");
        assert_eq!(sol.num_routes(), 3);
        assert_eq!(sol.routes()[0].stops(), &[0, 1, 2, 3, 0]);
        assert!(sol.routes()[1].is_empty());
        assert!(sol.routes()[2].is_empty());
        assert_eq!(sol.total_cost(), 6.0);

        let eval = SolutionEvaluator::new(&dm, 0);
        assert!(eval.verify(&sol).is_empty());
    }

    #[test]
    fn test_assigner_reports_unreached_stops() {
        let dm = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, f64::INFINITY],
            vec![1.0, 0.0, f64::INFINITY],
            vec![1.0, 1.0, 0.0],
        ])
        .expect("valid");
        let outcome = GiantTourAssigner::new(
            &dm,
            0,
            Fleet::new(2).expect("fleet"),
            ConstructionStrategy::NearestNeighbor,
        )
        .expect("valid")
        .assign()
        .expect("not cancelled");
        assert!(!outcome.is_feasible());
    }

    #[test]
    fn test_invalid_depot() {
        let dm = line(&[0.0, 1.0]);
        let result = GiantTourAssigner::new(
            &dm,
            2,
            Fleet::new(1).expect("fleet"),
            ConstructionStrategy::Sequential,
        );
        assert!(matches!(result, Err(Error::InvalidIndex { index: 2, size: 2 })));
    }

    #[test]
    fn test_cancelled_before_split() {
        let dm = line(&[0.0, 1.0, 2.0, 3.0]);
        let token = CancelToken::new();
        let assigner = GiantTourAssigner::new(
            &dm,
            0,
            Fleet::new(2).expect("fleet"),
            ConstructionStrategy::NearestNeighbor,
        )
        .expect("valid")
        .with_cancellation(token.clone());
        token.cancel();
        assert!(matches!(
            assigner.assign(),
            Err(Error::Cancelled { assigned: 3 })
        ));
    }

    #[test]
    fn test_uncancelled_token_is_ignored() {
        let dm = line(&[0.0, 1.0, 2.0]);
        let outcome = GiantTourAssigner::new(
            &dm,
            0,
            Fleet::new(1).expect("fleet"),
            ConstructionStrategy::Sequential,
        )
        .expect("valid")
        .with_cancellation(CancelToken::new())
        .assign()
        .expect("not cancelled");
        assert!(outcome.is_feasible());
    }
}
