//! Human- and machine-readable rendering of an assignment outcome.

use std::fmt;

use serde::Serialize;

use crate::assignment::Assignment;
use crate::config::Strategy;
use crate::error::Result;
use crate::models::Problem;

/// One vehicle's route with location labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleReport {
    /// 1-based vehicle number.
    pub vehicle: usize,
    /// Labels along the route, depot at both ends.
    pub stops: Vec<String>,
    pub distance: f64,
}

/// Rendered outcome of a solve.
///
/// # Examples
///
/// ```
/// use route_optimizer::assignment::RouteAssigner;
/// use route_optimizer::config::Strategy;
/// use route_optimizer::distance::CostMatrix;
/// use route_optimizer::models::{Fleet, Problem};
/// use route_optimizer::report::Report;
///
/// let dm = CostMatrix::from_rows(vec![vec![0.0, 3.0], vec![4.0, 0.0]]).unwrap();
/// let problem = Problem::from_matrix(dm, 0).unwrap();
/// let assignment = RouteAssigner::new(problem.costs(), 0, Fleet::new(1).unwrap())
///     .unwrap()
///     .assign()
///     .unwrap();
///
/// let report = Report::new(&problem, &assignment, Strategy::CheapestArc);
/// assert!(report.feasible);
/// assert_eq!(report.total_distance, Some(7.0));
/// assert_eq!(
///     report.to_string(),
///     "Vehicle 1: 0 → 1 → 0 (distance 7)\nTotal distance: 7\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub strategy: Strategy,
    pub feasible: bool,
    pub vehicles: Vec<VehicleReport>,
    pub total_distance: Option<f64>,
    /// Labels of stops left unrouted when infeasible.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unassigned: Vec<String>,
}

impl Report {
    pub fn new(problem: &Problem, assignment: &Assignment, strategy: Strategy) -> Self {
        let labels = |indices: &[usize]| -> Vec<String> {
            indices.iter().map(|&i| problem.label(i).to_string()).collect()
        };
        match assignment {
            Assignment::Solved(solution) => Self {
                strategy,
                feasible: true,
                vehicles: solution
                    .routes()
                    .iter()
                    .map(|route| VehicleReport {
                        vehicle: route.vehicle_id() + 1,
                        stops: labels(route.stops()),
                        distance: route.distance(),
                    })
                    .collect(),
                total_distance: Some(solution.total_cost()),
                unassigned: Vec::new(),
            },
            Assignment::Infeasible(inf) => Self {
                strategy,
                feasible: false,
                vehicles: Vec::new(),
                total_distance: None,
                unassigned: labels(&inf.unassigned),
            },
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(total) = self.total_distance.filter(|_| self.feasible) else {
            writeln!(f, "No solution found.")?;
            if !self.unassigned.is_empty() {
                writeln!(f, "Unreachable: {}", self.unassigned.join(", "))?;
            }
            return Ok(());
        };
        for v in &self.vehicles {
            writeln!(
                f,
                "Vehicle {}: {} (distance {})",
                v.vehicle,
                v.stops.join(" → "),
                v.distance
            )?;
        }
        writeln!(f, "Total distance: {total}")
    }
}
