//! Bank and rate catalog: snapshot types, CSV ingestion, and the write path

mod data;
pub mod loader;
mod store;

pub use data::{Bank, CatalogError, Rate, RateCatalog};
pub use loader::{load_catalog, load_catalog_from_readers};
pub use store::CatalogStore;
