//! Delivery area domain: read-only reference data.

pub mod errors;
pub(crate) mod repository;
pub mod service;

pub use errors::DeliveryServiceError;
pub use service::{DeliveryService, MockDeliveryService, PgDeliveryService};
