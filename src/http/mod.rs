//! REST client for the storefront backend.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{Instrument, debug, debug_span, warn};
use uuid::Uuid;

pub mod cancel;

pub use cancel::{CancelScope, CancelToken, Cancelled};

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Query string for requests that take no parameters.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];

/// Connection settings for the storefront backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Backend origin, e.g. `"http://localhost:3001"`.
    pub base_url: String,

    /// Per-request timeout. `None` lets requests wait indefinitely.
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    /// Settings for the given origin with the default 30 second timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Errors raised at the network boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connect, timeout, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{method} {path} failed with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        /// Request method.
        method: Method,
        /// Request path.
        path: String,
        /// Response status.
        status: StatusCode,
        /// The `message` field of the error body, when present.
        message: Option<String>,
    },

    /// The response body did not match the expected schema.
    #[error("unexpected response body from {path}")]
    Decode {
        /// Request path.
        path: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The owning view went away before the response arrived.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

impl ApiError {
    /// Server-provided rejection message, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Http(_) | Self::Decode { .. } | Self::Cancelled(_) => None,
        }
    }

    /// Response status, if the backend answered at all.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(source) => source.status(),
            Self::Decode { .. } | Self::Cancelled(_) => None,
        }
    }

    /// Whether the failure was a 404 from the backend.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client bound to one backend origin.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            http: builder.build()?,
        })
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET path?query`, decoding the JSON response.
    pub(crate) async fn get<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.get(self.url(path)).query(query);
        let body = self.execute(Method::GET, path, request).await?;

        decode(path, &body)
    }

    /// Send a JSON body, decoding the JSON response.
    pub(crate) async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.request(method.clone(), self.url(path)).json(body);
        let response = self.execute(method, path, request).await?;

        decode(path, &response)
    }

    /// Send a JSON body, ignoring whatever the backend answers with.
    pub(crate) async fn send_unit<B>(&self, method: Method, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.http.request(method.clone(), self.url(path)).json(body);

        self.execute(method, path, request).await.map(drop)
    }

    /// Send a request with only query parameters, ignoring the response body.
    pub(crate) async fn send_query<Q>(&self, method: Method, path: &str, query: &Q) -> Result<(), ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.http.request(method.clone(), self.url(path)).query(query);

        self.execute(method, path, request).await.map(drop)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<String, ApiError> {
        let request_id = Uuid::now_v7().to_string();
        let span = debug_span!("api_request", %method, path, request_id = %request_id);

        async move {
            debug!("sending request");

            let response = request
                .header(REQUEST_ID_HEADER, &request_id)
                .send()
                .await?;

            let status = response.status();
            let text = response.text().await?;

            if !status.is_success() {
                let message = serde_json::from_str::<ErrorBody>(&text)
                    .ok()
                    .and_then(|body| body.message);

                warn!(%status, "request rejected");

                return Err(ApiError::Status {
                    method,
                    path: path.to_owned(),
                    status,
                    message,
                });
            }

            debug!(%status, bytes = text.len(), "response received");

            Ok(text)
        }
        .instrument(span)
        .await
    }
}

/// Decode a response body against its schema, failing fast on mismatch.
pub(crate) fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        path: path.to_owned(),
        source,
    })
}
