//! Errors

use salvo::http::StatusError;
use tracing::error;

use snaxo_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        OrdersServiceError::EmptyOrder => StatusError::bad_request().brief("Order has no items"),
        OrdersServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Line quantity must be at least 1")
        }
        OrdersServiceError::UnknownDeliveryArea => {
            StatusError::bad_request().brief("Unknown delivery area")
        }
        OrdersServiceError::UnknownProduct | OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Order references an unknown product")
        }
        OrdersServiceError::ProductUnavailable(name) => {
            StatusError::conflict().brief(format!("{name} is out of stock"))
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::AlreadyExists => {
            error!("order number collision");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("failed to process order: {source}");

            StatusError::internal_server_error()
        }
    }
}
