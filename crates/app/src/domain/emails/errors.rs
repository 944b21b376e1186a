//! Email service errors.

use thiserror::Error;

use crate::domain::orders::OrdersServiceError;

#[derive(Debug, Error)]
pub enum EmailServiceError {
    #[error("email delivery is not configured")]
    MissingCredential,

    #[error("recipient email address is not valid")]
    InvalidRecipient,

    #[error("no order matches the given number and email")]
    UnknownOrder,

    #[error("email provider request failed")]
    Provider(#[from] reqwest::Error),

    #[error("email provider returned status {0}")]
    ProviderStatus(u16),

    #[error("order lookup failed")]
    Orders(#[source] OrdersServiceError),
}

impl From<OrdersServiceError> for EmailServiceError {
    fn from(error: OrdersServiceError) -> Self {
        match error {
            OrdersServiceError::NotFound => Self::UnknownOrder,
            other => Self::Orders(other),
        }
    }
}
