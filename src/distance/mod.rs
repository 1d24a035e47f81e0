//! Travel costs between locations.
//!
//! A [`CostModel`] is either a dense [`CostMatrix`] or a [`GeoCost`] computed
//! from coordinates; every search component reads it through the
//! [`TravelCost`] trait.

mod geo;
mod matrix;
mod model;

pub use geo::{GeoCost, Metric};
pub use matrix::CostMatrix;
pub use model::{CostModel, TravelCost};
