//! Cheapest-arc route assignment over the whole fleet.
//!
//! # Algorithm
//!
//! Every vehicle starts on its own start node at the depot. At each step the
//! assigner looks at every `(vehicle, unvisited node)` pair and extends the
//! vehicle whose current tour end has the cheapest arc to an unvisited node.
//! When every node is visited, each vehicle returns to the depot.
//!
//! Ties go to the lowest vehicle index, then the lowest node index. Arcs with
//! non-finite cost are never selected.
//!
//! # Complexity
//!
//! O(K · n²) cost queries where n = number of stops and K = fleet size.

use log::{debug, info, trace, warn};

use super::{Assignment, CancelToken, IndexMap, InfeasibleReason, Infeasibility, NodeIndex, SearchState};
use crate::distance::TravelCost;
use crate::error::{Error, Result};
use crate::models::{Fleet, Route, Solution};

/// Partitions the stops across a fleet and orders each vehicle's tour.
///
/// # Examples
///
/// ```
/// use route_optimizer::assignment::RouteAssigner;
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
/// let assigner = RouteAssigner::new(&dm, 0, Fleet::new(1).unwrap()).unwrap();
/// let solution = assigner.assign().unwrap().into_solution().unwrap();
/// assert_eq!(solution.routes()[0].stops(), &[0, 1, 3, 2, 0]);
/// assert_eq!(solution.total_cost(), 23.0);
/// ```
pub struct RouteAssigner<'a> {
    costs: &'a dyn TravelCost,
    map: IndexMap,
    cancel: Option<CancelToken>,
}

impl<'a> RouteAssigner<'a> {
    /// Creates an assigner for `fleet` vehicles based at `depot`.
    ///
    /// Fails with [`Error::InvalidIndex`] if the depot is out of bounds; no
    /// search work happens before this check.
    pub fn new(costs: &'a dyn TravelCost, depot: usize, fleet: Fleet) -> Result<Self> {
        let map = IndexMap::new(costs.size(), depot, fleet.size())?;
        Ok(Self {
            costs,
            map,
            cancel: None,
        })
    }

    /// Polls `token` after each node assignment.
    pub fn with_cancellation(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn index_map(&self) -> &IndexMap {
        &self.map
    }

    /// Runs the search from a fresh state.
    pub fn assign(&self) -> Result<Assignment> {
        self.run(SearchState::new(&self.map))
    }

    /// Runs the search, consuming `state`.
    ///
    /// Returns [`Assignment::Infeasible`] if unvisited nodes remain but no
    /// vehicle can reach any of them at finite cost, or a route cannot return
    /// to the depot. Returns [`Error::Cancelled`] if the cancellation token
    /// fires, and [`Error::InvalidState`] if `state` was not built from this
    /// assigner's [`IndexMap`] or has a closed vehicle.
    pub fn run(&self, mut state: SearchState) -> Result<Assignment> {
        self.check_state(&state)?;
        info!(
            "assigning {} stop(s) to {} vehicle(s) from depot {}",
            state.remaining(),
            self.map.num_vehicles(),
            self.map.depot()
        );

        while state.remaining() > 0 {
            let Some((vehicle, node, arc)) = self.cheapest_arc(&state) else {
                let unassigned = self.map.to_locations(&state.unvisited());
                warn!(
                    "no finite arc reaches {} remaining stop(s) after {} step(s)",
                    unassigned.len(),
                    state.steps()
                );
                return Ok(Assignment::Infeasible(Infeasibility {
                    reason: InfeasibleReason::NoSelectableArc,
                    assigned: state.steps(),
                    unassigned,
                }));
            };
            trace!(
                "vehicle {vehicle} -> location {} (arc {arc})",
                self.map.to_location(node)
            );
            state.assign(vehicle, node, arc);

            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return Err(Error::Cancelled {
                    assigned: state.steps(),
                });
            }
        }

        self.close_routes(state)
    }

    /// A resumable state has this map's dimensions and every vehicle still
    /// open: its tour ends on its own start node or on a travel node.
    fn check_state(&self, state: &SearchState) -> Result<()> {
        if state.num_vehicles() != self.map.num_vehicles()
            || state.num_travel_nodes() != self.map.num_travel_nodes()
        {
            return Err(Error::invalid_state(format!(
                "state has {} vehicle(s) and {} travel node(s), expected {} and {}",
                state.num_vehicles(),
                state.num_travel_nodes(),
                self.map.num_vehicles(),
                self.map.num_travel_nodes()
            )));
        }
        for vehicle in 0..state.num_vehicles() {
            let tail = state.tail(vehicle);
            if self.map.is_end(tail) {
                return Err(Error::invalid_state(format!(
                    "vehicle {vehicle} is already closed"
                )));
            }
            if self.map.is_start(tail) && tail != self.map.start(vehicle) {
                return Err(Error::invalid_state(format!(
                    "vehicle {vehicle} starts on node {tail}"
                )));
            }
        }
        Ok(())
    }

    /// Cheapest `(vehicle, node, arc)` extension among unvisited nodes.
    fn cheapest_arc(&self, state: &SearchState) -> Option<(usize, NodeIndex, f64)> {
        let mut best: Option<(usize, NodeIndex, f64)> = None;
        for vehicle in 0..state.num_vehicles() {
            let from = self.map.to_location(state.tail(vehicle));
            for node in self.map.travel_nodes() {
                if state.is_visited(node) {
                    continue;
                }
                let arc = self.costs.arc(from, self.map.to_location(node));
                if !arc.is_finite() {
                    continue;
                }
                match best {
                    Some((_, _, b)) if arc >= b => {}
                    _ => best = Some((vehicle, node, arc)),
                }
            }
        }
        best
    }

    fn close_routes(&self, mut state: SearchState) -> Result<Assignment> {
        let depot = self.map.depot();
        for vehicle in 0..state.num_vehicles() {
            let end = self.map.end(vehicle);
            if state.path_len(vehicle) == 0 {
                state.close(vehicle, end, 0.0);
                continue;
            }
            let arc = self.costs.arc(self.map.to_location(state.tail(vehicle)), depot);
            if !arc.is_finite() {
                warn!("vehicle {vehicle} cannot return to depot {depot}");
                let assigned = state.steps();
                let unassigned = state
                    .into_paths()
                    .swap_remove(vehicle)
                    .0
                    .into_iter()
                    .filter(|&n| self.map.is_travel(n))
                    .map(|n| self.map.to_location(n))
                    .collect();
                return Ok(Assignment::Infeasible(Infeasibility {
                    reason: InfeasibleReason::UnclosableRoute { vehicle },
                    assigned,
                    unassigned,
                }));
            }
            state.close(vehicle, end, arc);
            trace!("vehicle {vehicle} closed at cost {}", state.cost(vehicle));
        }

        let routes: Vec<Route> = state
            .into_paths()
            .into_iter()
            .enumerate()
            .map(|(vehicle, (path, cost))| {
                let visits = self.map.to_locations(&path[1..path.len() - 1]);
                Route::new(vehicle, depot, visits, cost)
            })
            .collect();
        let solution = Solution::new(routes);
        debug!(
            "assignment complete: {} active route(s), total cost {}",
            solution.num_active_routes(),
            solution.total_cost()
        );
        Ok(Assignment::Solved(solution))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::CostMatrix;
    use crate::evaluation::SolutionEvaluator;

    fn scenario() -> CostMatrix {
        CostMatrix::from_rows(vec![
            vec![0.0, 2.0, 9.0, 10.0],
            vec![2.0, 0.0, 6.0, 4.0],
            vec![9.0, 6.0, 0.0, 8.0],
            vec![10.0, 4.0, 8.0, 0.0],
        ])
        .expect("valid")
    }

    fn solve(dm: &CostMatrix, depot: usize, vehicles: usize) -> Solution {
        RouteAssigner::new(dm, depot, Fleet::new(vehicles).expect("fleet"))
            .expect("valid depot")
            .assign()
            .expect("not cancelled")
            .into_solution()
            .expect("feasible")
    }

    #[test]
    fn test_single_vehicle_scenario() {
        let sol = solve(&scenario(), 0, 1);
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].stops(), &[0, 1, 3, 2, 0]);
        // 2 + 4 + 8 + 9
        assert_eq!(sol.total_cost(), 23.0);
    }

    #[test]
    fn test_two_vehicles_scenario() {
        // Step 1: v0 takes 0→1 (2). Step 2: from 1 the cheapest is 1→3 (4),
        // beating v1's 0→2 (9). Step 3: v0 3→2 (8) beats v1's 0→2 (9).
        let sol = solve(&scenario(), 0, 2);
        assert_eq!(sol.routes()[0].stops(), &[0, 1, 3, 2, 0]);
        assert_eq!(sol.routes()[1].stops(), &[0, 0]);
        assert_eq!(sol.route_costs(), vec![23.0, 0.0]);
    }

    #[test]
    fn test_second_vehicle_takes_cheaper_depot_arc() {
        let dm = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 10.0],
            vec![2.0, 10.0, 0.0],
        ])
        .expect("valid");
        let sol = solve(&dm, 0, 2);
        assert_eq!(sol.routes()[0].stops(), &[0, 1, 0]);
        assert_eq!(sol.routes()[1].stops(), &[0, 2, 0]);
        assert_eq!(sol.total_cost(), 2.0 + 4.0);
    }

    #[test]
    fn test_tie_prefers_lowest_vehicle_then_node() {
        let dm = CostMatrix::from_fn(3, |i, j| if i == j { 0.0 } else { 1.0 }).expect("valid");
        let sol = solve(&dm, 0, 3);
        // All arcs cost 1: vehicle 0 takes node of location 1, then from 1
        // location 2 ties with the idle vehicles' depot arcs; vehicle 0 wins.
        assert_eq!(sol.routes()[0].stops(), &[0, 1, 2, 0]);
        assert!(sol.routes()[1].is_empty());
        assert!(sol.routes()[2].is_empty());
    }

    #[test]
    fn test_depot_only() {
        let dm = CostMatrix::from_rows(vec![vec![0.0]]).expect("valid");
        let sol = solve(&dm, 0, 3);
        assert_eq!(sol.num_routes(), 3);
        for route in sol.routes() {
            assert_eq!(route.stops(), &[0, 0]);
        }
        assert_eq!(sol.total_cost(), 0.0);
    }

    #[test]
    fn test_non_zero_depot() {
        let sol = solve(&scenario(), 2, 1);
        let stops = sol.routes()[0].stops();
        assert_eq!(stops.first(), Some(&2));
        assert_eq!(stops.last(), Some(&2));
        // 2→1 (6), 1→0 (2), 0→3 (10), 3→2 (8)
        assert_eq!(stops, &[2, 1, 0, 3, 2]);
        assert_eq!(sol.total_cost(), 26.0);
    }

    #[test]
    fn test_cost_matches_evaluator() {
        let dm = scenario();
        for vehicles in 1..=4 {
            let sol = solve(&dm, 1, vehicles);
            let eval = SolutionEvaluator::new(&dm, 1);
            let e = eval.evaluate(sol.routes());
            assert_eq!(e.per_route, sol.route_costs());
            assert_eq!(e.total, sol.total_cost());
            assert!(eval.verify(&sol).is_empty());
        }
    }

    #[test]
    fn test_invalid_depot() {
        let dm = scenario();
        assert!(matches!(
            RouteAssigner::new(&dm, 4, Fleet::new(1).expect("fleet")),
            Err(Error::InvalidIndex { index: 4, size: 4 })
        ));
    }

    #[test]
    fn test_unreachable_stop_is_infeasible() {
        let dm = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, f64::INFINITY],
            vec![1.0, 0.0, f64::INFINITY],
            vec![1.0, 1.0, 0.0],
        ])
        .expect("valid");
        let outcome = RouteAssigner::new(&dm, 0, Fleet::new(2).expect("fleet"))
            .expect("valid")
            .assign()
            .expect("not cancelled");
        match &outcome {
            Assignment::Infeasible(inf) => {
                assert_eq!(inf.reason, InfeasibleReason::NoSelectableArc);
                assert_eq!(inf.unassigned, vec![2]);
                assert_eq!(inf.assigned, 1);
            }
            Assignment::Solved(_) => panic!("expected infeasible outcome"),
        }
        assert!(matches!(
            outcome.into_solution(),
            Err(Error::NoFeasibleSolution { unassigned: 1 })
        ));
    }

    #[test]
    fn test_unclosable_route_is_infeasible() {
        let dm = CostMatrix::from_rows(vec![vec![0.0, 1.0], vec![f64::INFINITY, 0.0]])
            .expect("valid");
        let outcome = RouteAssigner::new(&dm, 0, Fleet::new(1).expect("fleet"))
            .expect("valid")
            .assign()
            .expect("not cancelled");
        match outcome {
            Assignment::Infeasible(inf) => {
                assert_eq!(inf.reason, InfeasibleReason::UnclosableRoute { vehicle: 0 });
                assert_eq!(inf.unassigned, vec![1]);
            }
            Assignment::Solved(_) => panic!("expected infeasible outcome"),
        }
    }

    #[test]
    fn test_cancellation_stops_after_first_assignment() {
        let dm = scenario();
        let token = CancelToken::new();
        token.cancel();
        let result = RouteAssigner::new(&dm, 0, Fleet::new(1).expect("fleet"))
            .expect("valid")
            .with_cancellation(token)
            .assign();
        assert!(matches!(result, Err(Error::Cancelled { assigned: 1 })));
    }

    #[test]
    fn test_run_with_explicit_state() {
        let dm = scenario();
        let assigner = RouteAssigner::new(&dm, 0, Fleet::new(2).expect("fleet")).expect("valid");
        let state = SearchState::new(assigner.index_map());
        let a = assigner.run(state).expect("not cancelled");
        let b = assigner.assign().expect("not cancelled");
        assert_eq!(a, b);
    }

    #[test]
    fn test_run_resumes_partial_state() {
        let dm = scenario();
        let assigner = RouteAssigner::new(&dm, 0, Fleet::new(1).expect("fleet")).expect("valid");
        let mut state = SearchState::new(assigner.index_map());
        // Location 2 (node 1) first, then the search finishes the tour.
        state.assign(0, 1, 9.0);
        let sol = assigner
            .run(state)
            .expect("not cancelled")
            .into_solution()
            .expect("feasible");
        assert_eq!(sol.routes()[0].stops(), &[0, 2, 1, 3, 0]);
        assert_eq!(sol.total_cost(), 9.0 + 6.0 + 4.0 + 10.0);
    }

    #[test]
    fn test_run_rejects_state_from_other_map() {
        let dm = scenario();
        let assigner = RouteAssigner::new(&dm, 0, Fleet::new(1).expect("fleet")).expect("valid");
        let other = IndexMap::new(4, 0, 3).expect("valid");
        assert!(matches!(
            assigner.run(SearchState::new(&other)),
            Err(Error::InvalidState(_))
        ));
        let smaller = IndexMap::new(3, 0, 1).expect("valid");
        assert!(matches!(
            assigner.run(SearchState::new(&smaller)),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_run_rejects_closed_state() {
        let dm = scenario();
        let assigner = RouteAssigner::new(&dm, 0, Fleet::new(2).expect("fleet")).expect("valid");
        let map = assigner.index_map();
        let mut state = SearchState::new(map);
        state.close(1, map.end(1), 0.0);
        let err = assigner.run(state).expect_err("closed vehicle");
        assert!(err.to_string().contains("vehicle 1 is already closed"));
    }
}
