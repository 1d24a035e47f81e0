//! Cost evaluation and invariant checking for routes and solutions.

mod evaluator;

pub use evaluator::{closed_walk_cost, Evaluation, SolutionEvaluator};
