//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use snaxo::checkout::ValidationError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("order contains no items")]
    EmptyOrder,

    #[error("order line quantity must be at least 1")]
    InvalidQuantity,

    #[error("unknown delivery area")]
    UnknownDeliveryArea,

    #[error("unknown product")]
    UnknownProduct,

    #[error("order references a missing record")]
    InvalidReference,

    #[error("product is out of stock: {0}")]
    ProductUnavailable(String),

    #[error("order not found")]
    NotFound,

    #[error("order already exists")]
    AlreadyExists,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(_) | None => Self::Sql(error),
        }
    }
}
