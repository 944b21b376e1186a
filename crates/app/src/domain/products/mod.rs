//! Catalog domain: read-only product listings.

pub mod errors;
pub(crate) mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::{CatalogService, MockCatalogService, PgCatalogService};
