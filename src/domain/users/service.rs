//! Users service.

use async_trait::async_trait;
use mockall::automock;
use tracing::instrument;

use crate::{
    domain::users::{errors::UsersServiceError, models::User},
    http::{ApiClient, NO_QUERY},
};

const USERS_PATH: &str = "/api/users";

/// [`UsersService`] over the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpUsersService {
    api: ApiClient,
}

impl HttpUsersService {
    /// Service issuing its requests through `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UsersService for HttpUsersService {
    #[instrument(skip(self))]
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError> {
        Ok(self.api.get(USERS_PATH, NO_QUERY).await?)
    }
}

/// Account listing for the admin dashboard.
#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieve every registered user.
    async fn list_users(&self) -> Result<Vec<User>, UsersServiceError>;
}
