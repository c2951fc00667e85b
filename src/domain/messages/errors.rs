//! Messages service errors.

use thiserror::Error;

use crate::http::ApiError;

/// Failures of [`MessagesService`](super::MessagesService) requests.
#[derive(Debug, Error)]
pub enum MessagesServiceError {
    /// The backend answered 404.
    #[error("message not found")]
    NotFound,

    /// A required field is blank.
    #[error("invalid message: {0}")]
    InvalidData(&'static str),

    /// Any other request failure.
    #[error("messages request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for MessagesServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
