//! Local search applied after construction.
//!
//! - [`two_opt`]: Intra-route 2-opt segment reversal

mod two_opt;

pub use two_opt::{improve_solution, two_opt_improve};
