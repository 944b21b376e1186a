//! Errors

use salvo::http::StatusError;
use tracing::error;

use snaxo_app::domain::products::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        CatalogServiceError::InvalidData => {
            error!("catalog row failed validation");

            StatusError::internal_server_error()
        }
        CatalogServiceError::Sql(source) => {
            error!("failed to query catalog: {source}");

            StatusError::internal_server_error()
        }
    }
}
