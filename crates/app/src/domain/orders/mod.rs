//! Orders domain: atomic order creation and confirmation reads.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use models::{CreatedOrder, Order, OrderId, OrderItem, OrderStatus, OrderWithItems};
pub use service::{MockOrdersService, OrdersService, PgOrdersService};
