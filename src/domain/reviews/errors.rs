//! Reviews service errors.

use thiserror::Error;

use crate::http::ApiError;

/// Failures of [`ReviewsService`](super::ReviewsService) requests.
#[derive(Debug, Error)]
pub enum ReviewsServiceError {
    /// The product does not exist.
    #[error("product not found")]
    NotFound,

    /// Refused locally before sending.
    #[error("invalid review: {0}")]
    InvalidData(&'static str),

    /// Any other request failure.
    #[error("reviews request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for ReviewsServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
