//! # route-optimizer
//!
//! Single-depot, fixed-fleet vehicle routing over a pairwise cost model:
//! partitions delivery stops across vehicles, orders each vehicle's tour,
//! and accounts for every arc so reported costs are exact.
//!
//! ## Modules
//!
//! - [`distance`]: Cost models: precomputed matrix or geometric distance
//! - [`models`]: Domain types (Location, Fleet, Route, Solution, Problem)
//! - [`constructive`]: Tour constructors (nearest neighbor, sequential)
//! - [`assignment`]: Fleet-wide assignment (cheapest arc, giant tour split)
//! - [`evaluation`]: Route costs and solution checks
//! - [`local_search`]: Intra-route 2-opt
//! - [`solver`]: Configured end-to-end solve
//! - [`io`], [`report`], [`config`], [`demo`]: Loading, rendering, settings
//!   and synthetic data
//!
//! ## Example
//!
//! ```
//! use route_optimizer::config::SolverConfig;
//! use route_optimizer::io::{read_matrix, MatrixFormat};
//! use route_optimizer::report::Report;
//! use route_optimizer::solver::Solver;
//!
//! let csv = ",Depot,A,B,C\n\
//!            Depot,0,2,9,10\n\
//!            A,2,0,6,4\n\
//!            B,9,6,0,8\n\
//!            C,10,4,8,0\n";
//! let config = SolverConfig::default();
//! let problem = read_matrix(csv.as_bytes(), MatrixFormat::Auto)
//!     .unwrap()
//!     .into_problem(&config.depot)
//!     .unwrap();
//!
//! let solver = Solver::new(config).unwrap();
//! let outcome = solver.solve(&problem).unwrap();
//! let report = Report::new(&problem, &outcome, solver.config().strategy);
//! assert_eq!(report.vehicles[0].stops, ["Depot", "A", "C", "B", "Depot"]);
//! assert_eq!(report.total_distance, Some(23.0));
//! ```

pub mod assignment;
pub mod config;
pub mod constructive;
pub mod demo;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod local_search;
pub mod models;
pub mod report;
pub mod solver;

pub use error::{Error, Result};
