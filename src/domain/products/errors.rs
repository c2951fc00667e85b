//! Products service errors.

use thiserror::Error;

use crate::http::ApiError;

/// Failures of [`ProductsService`](super::ProductsService) requests.
#[derive(Debug, Error)]
pub enum ProductsServiceError {
    /// The backend answered 404.
    #[error("product not found")]
    NotFound,

    /// The admin form is incomplete.
    #[error("invalid product: {0}")]
    InvalidData(&'static str),

    /// Any other request failure.
    #[error("catalog request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for ProductsServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
