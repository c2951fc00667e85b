//! Storefront Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::PathBuf,
    sync::Arc,
};

use thiserror::Error;

use crate::{
    auth::{AuthService, FileSessionStore, HttpAuthService, SessionManager, SessionStore},
    checkout::CheckoutFlow,
    dashboard::Dashboard,
    domain::{
        carts::{CartStore, CartsService, HttpCartsService},
        messages::{HttpMessagesService, MessagesService},
        orders::{HttpOrdersService, OrdersService},
        payments::{HttpPaymentsService, PaymentsService},
        products::{Catalog, HttpProductsService, ProductsService, SearchMode},
        reviews::{HttpReviewsService, ReviewsService},
        users::{HttpUsersService, UsersService},
    },
    http::{ApiClient, ApiConfig, ApiError, CancelToken},
};

/// Failure building a [`StorefrontContext`].
#[derive(Debug, Error)]
pub enum ContextInitError {
    /// The HTTP client could not be configured.
    #[error("failed to build the HTTP client")]
    Client(#[source] ApiError),
}

/// Every service a front end needs, sharing one HTTP client.
#[derive(Clone)]
pub struct StorefrontContext {
    /// Login, registration and profile updates.
    pub auth: Arc<dyn AuthService>,
    /// Cached session between runs.
    pub session_store: Arc<dyn SessionStore>,
    /// Remote carts.
    pub carts: Arc<dyn CartsService>,
    /// Product catalogue and admin product CRUD.
    pub products: Arc<dyn ProductsService>,
    /// Order creation and history.
    pub orders: Arc<dyn OrdersService>,
    /// Payment intents.
    pub payments: Arc<dyn PaymentsService>,
    /// User accounts.
    pub users: Arc<dyn UsersService>,
    /// Contact-form messages.
    pub messages: Arc<dyn MessagesService>,
    /// Product reviews.
    pub reviews: Arc<dyn ReviewsService>,
}

impl StorefrontContext {
    /// Build the context against a backend, caching the session at
    /// `session_file`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_config(
        config: &ApiConfig,
        session_file: impl Into<PathBuf>,
    ) -> Result<Self, ContextInitError> {
        let api = ApiClient::new(config).map_err(ContextInitError::Client)?;

        Ok(Self {
            auth: Arc::new(HttpAuthService::new(api.clone())),
            session_store: Arc::new(FileSessionStore::new(session_file)),
            carts: Arc::new(HttpCartsService::new(api.clone())),
            products: Arc::new(HttpProductsService::new(api.clone())),
            orders: Arc::new(HttpOrdersService::new(api.clone())),
            payments: Arc::new(HttpPaymentsService::new(api.clone())),
            users: Arc::new(HttpUsersService::new(api.clone())),
            messages: Arc::new(HttpMessagesService::new(api.clone())),
            reviews: Arc::new(HttpReviewsService::new(api)),
        })
    }

    /// Session manager over the shared auth service and store.
    #[must_use]
    pub fn session_manager(&self) -> SessionManager {
        SessionManager::new(Arc::clone(&self.auth), Arc::clone(&self.session_store))
    }

    /// Catalog browsing with the given search mode.
    #[must_use]
    pub fn catalog(&self, mode: SearchMode) -> Catalog {
        Catalog::new(Arc::clone(&self.products), mode)
    }

    /// Cart for a view; its requests are abandoned when `token` is cancelled.
    #[must_use]
    pub fn cart_store(&self, token: CancelToken) -> CartStore {
        CartStore::new(Arc::clone(&self.carts), token)
    }

    /// Fresh checkout flow bound to `token`.
    #[must_use]
    pub fn checkout(&self, token: CancelToken) -> CheckoutFlow {
        CheckoutFlow::new(
            Arc::clone(&self.carts),
            Arc::clone(&self.payments),
            Arc::clone(&self.orders),
            token,
        )
    }

    /// Role-gated dashboard over the shared services.
    #[must_use]
    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(
            Arc::clone(&self.orders),
            Arc::clone(&self.users),
            Arc::clone(&self.products),
            Arc::clone(&self.messages),
            Arc::clone(&self.reviews),
        )
    }
}

impl Debug for StorefrontContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StorefrontContext").finish_non_exhaustive()
    }
}
