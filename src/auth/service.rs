//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;
use tracing::instrument;

use crate::{
    auth::{AuthResponse, AuthServiceError, Credentials, ProfileUpdate, Registration},
    domain::users::models::{User, UserId, UserPatch},
    http::ApiClient,
};

const LOGIN_PATH: &str = "/api/users/login";
const REGISTER_PATH: &str = "/api/users/register";

/// [`AuthService`] over the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    api: ApiClient,
}

impl HttpAuthService {
    /// Service issuing its requests through `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: Credentials) -> Result<User, AuthServiceError> {
        let response: AuthResponse = self.api.send(Method::POST, LOGIN_PATH, &credentials).await?;

        Ok(response.user)
    }

    #[instrument(skip_all, fields(email = %registration.email))]
    async fn register(&self, registration: Registration) -> Result<User, AuthServiceError> {
        let response: AuthResponse = self
            .api
            .send(Method::POST, REGISTER_PATH, &registration)
            .await?;

        Ok(response.user)
    }

    #[instrument(skip(self))]
    async fn update_profile(
        &self,
        user: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserPatch, AuthServiceError> {
        let path = format!("/api/users/{user}");

        Ok(self.api.send(Method::PATCH, &path, &update).await?)
    }
}

/// Login, registration and profile updates against the backend.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Signs in with email and password.
    async fn login(&self, credentials: Credentials) -> Result<User, AuthServiceError>;

    /// Creates an account and signs in.
    async fn register(&self, registration: Registration) -> Result<User, AuthServiceError>;

    /// Updates profile fields, returning whatever the backend echoes back.
    async fn update_profile(
        &self,
        user: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserPatch, AuthServiceError>;
}
