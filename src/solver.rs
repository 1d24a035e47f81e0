//! Configured end-to-end solve: assignment, optional improvement, checks.

use log::{debug, info, warn};

use crate::assignment::{Assignment, CancelToken, GiantTourAssigner, RouteAssigner};
use crate::config::SolverConfig;
use crate::error::Result;
use crate::evaluation::SolutionEvaluator;
use crate::local_search::improve_solution;
use crate::models::{Fleet, Problem};

/// Runs the configured strategy on a [`Problem`].
///
/// # Examples
///
/// ```
/// use route_optimizer::config::SolverConfig;
/// use route_optimizer::distance::CostMatrix;
/// use route_optimizer::models::Problem;
/// use route_optimizer::solver::Solver;
///
/// let dm = CostMatrix::from_rows(vec![
///     vec![0.0, 2.0, 9.0, 10.0],
///     vec![2.0, 0.0, 6.0, 4.0],
///     vec![9.0, 6.0, 0.0, 8.0],
///     vec![10.0, 4.0, 8.0, 0.0],
/// ])
/// .unwrap();
/// let problem = Problem::from_matrix(dm, 0).unwrap();
///
/// let solver = Solver::new(SolverConfig::default()).unwrap();
/// let solution = solver.solve(&problem).unwrap().into_solution().unwrap();
/// assert_eq!(solution.total_cost(), 23.0);
/// ```
pub struct Solver {
    config: SolverConfig,
    fleet: Fleet,
    cancel: Option<CancelToken>,
}

impl Solver {
    /// Fails with [`Error::InvalidFleet`](crate::Error::InvalidFleet) if the
    /// configured fleet is out of bounds.
    pub fn new(config: SolverConfig) -> Result<Self> {
        let fleet = config.validate()?;
        Ok(Self {
            config,
            fleet,
            cancel: None,
        })
    }

    pub fn with_cancellation(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn solve(&self, problem: &Problem) -> Result<Assignment> {
        let costs = problem.costs();
        let depot = problem.depot();
        info!(
            "solving {} location(s) with {} vehicle(s) using {}",
            problem.size(),
            self.fleet.size(),
            self.config.strategy
        );

        let assignment = match self.config.strategy.construction() {
            None => {
                let mut assigner = RouteAssigner::new(costs, depot, self.fleet)?;
                if let Some(token) = &self.cancel {
                    assigner = assigner.with_cancellation(token.clone());
                }
                assigner.assign()?
            }
            Some(construction) => {
                let mut assigner = GiantTourAssigner::new(costs, depot, self.fleet, construction)?;
                if let Some(token) = &self.cancel {
                    assigner = assigner.with_cancellation(token.clone());
                }
                assigner.assign()?
            }
        };

        let solution = match assignment {
            Assignment::Solved(solution) => solution,
            Assignment::Infeasible(inf) => {
                warn!(
                    "no feasible solution ({:?}): {} stop(s) unassigned",
                    inf.reason,
                    inf.unassigned.len()
                );
                return Ok(Assignment::Infeasible(inf));
            }
        };

        let solution = if self.config.improve {
            let improved = improve_solution(&solution, costs);
            debug!(
                "2-opt: {} -> {}",
                solution.total_cost(),
                improved.total_cost()
            );
            improved
        } else {
            solution
        };

        let violations = SolutionEvaluator::new(costs, depot).verify(&solution);
        for violation in &violations {
            warn!("solution check failed: {:?}", violation.kind);
        }
        info!(
            "total cost {} over {} active route(s)",
            solution.total_cost(),
            solution.num_active_routes()
        );
        Ok(Assignment::Solved(solution))
    }
}
