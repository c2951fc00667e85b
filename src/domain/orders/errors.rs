//! Orders service errors.

use thiserror::Error;

use crate::http::ApiError;

/// Failures of [`OrdersService`](super::OrdersService) requests.
#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// The backend answered 404.
    #[error("order not found")]
    NotFound,

    /// Refused locally: an order needs at least one line.
    #[error("order has no items")]
    Empty,

    /// Any other request failure.
    #[error("orders request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for OrdersServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
