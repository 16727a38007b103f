//! Comparison of a user request against every offer in a catalog snapshot

mod engine;
mod rows;

pub use engine::{ComparisonEngine, ComparisonError, ComparisonRequest};
pub use rows::{best_row, ComparisonRow};
