//! Domain model types for fixed-fleet vehicle routing.
//!
//! Provides locations with optional coordinates, the fleet, routes as
//! depot-anchored closed walks, solutions, and the validated problem
//! instance that ties them together.

mod fleet;
mod location;
mod problem;
mod route;
mod solution;

pub use fleet::{Fleet, DEFAULT_MAX_VEHICLES};
pub use location::{Location, Point};
pub use problem::Problem;
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};

pub(crate) use solution::total_of;
