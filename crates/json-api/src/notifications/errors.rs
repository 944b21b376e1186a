//! Errors

use salvo::http::StatusError;
use tracing::error;

use snaxo_app::domain::emails::EmailServiceError;

pub(crate) fn into_status_error(error: EmailServiceError) -> StatusError {
    match error {
        EmailServiceError::MissingCredential => {
            StatusError::service_unavailable().brief("Email delivery is not configured")
        }
        EmailServiceError::InvalidRecipient => {
            StatusError::bad_request().brief("Recipient email address is not valid")
        }
        EmailServiceError::UnknownOrder => {
            StatusError::not_found().brief("No order matches the given number and email")
        }
        EmailServiceError::Provider(source) => {
            error!("email provider request failed: {source}");

            StatusError::bad_gateway()
        }
        EmailServiceError::ProviderStatus(status) => {
            error!("email provider returned status {status}");

            StatusError::bad_gateway()
        }
        EmailServiceError::Orders(source) => {
            error!("order lookup failed during email dispatch: {source}");

            StatusError::internal_server_error()
        }
    }
}
