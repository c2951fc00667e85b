//! Users service errors.

use thiserror::Error;

use crate::http::ApiError;

/// Failures of [`UsersService`](super::UsersService) requests.
#[derive(Debug, Error)]
pub enum UsersServiceError {
    /// The backend answered 404.
    #[error("user not found")]
    NotFound,

    /// Any other request failure.
    #[error("users request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for UsersServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
