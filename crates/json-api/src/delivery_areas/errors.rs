//! Errors

use salvo::http::StatusError;
use tracing::error;

use snaxo_app::domain::delivery::DeliveryServiceError;

pub(crate) fn into_status_error(error: DeliveryServiceError) -> StatusError {
    match error {
        DeliveryServiceError::NotFound => {
            StatusError::not_found().brief("Delivery area not found")
        }
        DeliveryServiceError::Sql(source) => {
            error!("failed to query delivery areas: {source}");

            StatusError::internal_server_error()
        }
    }
}
