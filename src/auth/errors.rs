//! Auth errors.

use std::io;

use thiserror::Error;

use crate::http::ApiError;

/// Failures of [`AuthService`](crate::auth::AuthService) requests.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// The request failed or was rejected.
    #[error("auth request failed")]
    Api(#[from] ApiError),
}

impl AuthServiceError {
    /// The backend's rejection message, if it sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api(error) => error.server_message(),
        }
    }
}

/// Failures reading or writing the cached session.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// The file could not be read, written or removed.
    #[error("session file i/o failed")]
    Io(#[from] io::Error),

    /// The file exists but is not a session.
    #[error("session file is corrupt")]
    Corrupt(#[from] serde_json::Error),
}

/// Errors surfaced by [`SessionManager`](crate::auth::SessionManager) and by
/// role-gated operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend refused the request. `message` is the server's own text
    /// when it sent one, otherwise a generic fallback for the operation.
    #[error("{message}")]
    Rejected {
        /// Text shown to the user.
        message: String,
        /// The failed request.
        #[source]
        source: AuthServiceError,
    },

    /// No session is present.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The session belongs to a shopper, not an administrator.
    #[error("this action requires an administrator")]
    Forbidden,

    /// The session could not be persisted.
    #[error("session storage failed")]
    Store(#[from] SessionStoreError),
}

impl AuthError {
    pub(crate) fn rejected(source: AuthServiceError, fallback: &str) -> Self {
        Self::Rejected {
            message: source.server_message().unwrap_or(fallback).to_owned(),
            source,
        }
    }
}
