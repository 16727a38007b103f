//! Deposit Compare - Term-deposit comparison and growth-projection engine
//!
//! This library provides:
//! - Compound-growth projections for a principal/rate/term triple
//! - Catalog snapshots of banks and their term-deposit offers
//! - Side-by-side comparison of every offer against a user request
//! - Best-effort pub/sub fan-out of rate-change events to live subscribers

pub mod catalog;
pub mod comparison;
pub mod growth;
pub mod notify;

// Re-export commonly used types
pub use catalog::{load_catalog, Bank, CatalogStore, Rate, RateCatalog};
pub use comparison::{ComparisonEngine, ComparisonRequest, ComparisonRow};
pub use growth::{GrowthCalculator, GrowthPoint};
pub use notify::{ChangeNotifier, RateChangeEvent, Subscription, RATES_CHANNEL};
