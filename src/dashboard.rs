//! Dashboard operations.
//!
//! Role-gated wrappers over the domain services: shoppers see their own
//! orders and may post reviews, administrators manage orders, users, products
//! and the contact inbox.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use thiserror::Error;
use tracing::{instrument, warn};

use crate::{
    auth::{AuthError, Session},
    domain::{
        messages::{
            MessagesService, MessagesServiceError,
            models::{Message, MessageId, NewMessage},
        },
        orders::{
            OrderOverview, OrdersService, OrdersServiceError,
            models::{Order, OrderId, OrderStatus},
        },
        products::{
            ProductsService, ProductsServiceError,
            models::{NewProduct, Product, ProductId},
        },
        reviews::{
            ReviewsService, ReviewsServiceError,
            models::{NewReview, Review},
        },
        users::{UsersService, UsersServiceError, models::User},
    },
};

/// Why a dashboard operation failed.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Not signed in, or not allowed to do this.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The orders request failed.
    #[error(transparent)]
    Orders(#[from] OrdersServiceError),

    /// The users request failed.
    #[error(transparent)]
    Users(#[from] UsersServiceError),

    /// The products request failed.
    #[error(transparent)]
    Products(#[from] ProductsServiceError),

    /// The contact messages request failed.
    #[error(transparent)]
    Messages(#[from] MessagesServiceError),

    /// The reviews request failed.
    #[error(transparent)]
    Reviews(#[from] ReviewsServiceError),
}

/// Contact-form fields as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Sender name.
    pub name: String,
    /// Reply-to address.
    pub email: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub message: String,
}

/// Dashboard operations for shoppers and administrators.
#[derive(Clone)]
pub struct Dashboard {
    orders: Arc<dyn OrdersService>,
    users: Arc<dyn UsersService>,
    products: Arc<dyn ProductsService>,
    messages: Arc<dyn MessagesService>,
    reviews: Arc<dyn ReviewsService>,
}

fn require_session(session: Option<&Session>) -> Result<&Session, AuthError> {
    session.ok_or(AuthError::NotAuthenticated)
}

fn require_admin(session: &Session) -> Result<(), AuthError> {
    if !session.is_admin() {
        warn!(user = %session.user_id(), "non-admin attempted an admin operation");

        return Err(AuthError::Forbidden);
    }

    Ok(())
}

impl Dashboard {
    /// Dashboard over the given services.
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrdersService>,
        users: Arc<dyn UsersService>,
        products: Arc<dyn ProductsService>,
        messages: Arc<dyn MessagesService>,
        reviews: Arc<dyn ReviewsService>,
    ) -> Self {
        Self {
            orders,
            users,
            products,
            messages,
            reviews,
        }
    }

    /// The orders view: every order for administrators, the shopper's own
    /// orders otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the orders request fails.
    pub async fn orders(&self, session: &Session) -> Result<Vec<Order>, DashboardError> {
        if session.is_admin() {
            return self.all_orders(session).await;
        }

        self.my_orders(session).await
    }

    /// Orders placed by the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the orders request fails.
    pub async fn my_orders(&self, session: &Session) -> Result<Vec<Order>, DashboardError> {
        Ok(self.orders.list_orders(session.user_id()).await?)
    }

    /// Every order in the store.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Forbidden`]: the session is not an administrator's.
    /// - [`DashboardError::Orders`]: the orders request failed.
    pub async fn all_orders(&self, session: &Session) -> Result<Vec<Order>, DashboardError> {
        require_admin(session)?;

        Ok(self.orders.list_all_orders().await?)
    }

    /// Move an order to `status`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Forbidden`]: the session is not an administrator's.
    /// - [`DashboardError::Orders`]: the status update failed.
    #[instrument(skip(self, session))]
    pub async fn update_order_status(
        &self,
        session: &Session,
        order: &OrderId,
        status: OrderStatus,
    ) -> Result<(), DashboardError> {
        require_admin(session)?;

        Ok(self.orders.update_status(order, status).await?)
    }

    /// Headline sales figures over every order.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Forbidden`]: the session is not an administrator's.
    /// - [`DashboardError::Orders`]: the orders request failed.
    pub async fn overview(&self, session: &Session) -> Result<OrderOverview, DashboardError> {
        let orders = self.all_orders(session).await?;

        Ok(OrderOverview::from_orders(&orders))
    }

    /// Every registered user.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Forbidden`]: the session is not an administrator's.
    /// - [`DashboardError::Users`]: the users request failed.
    pub async fn users(&self, session: &Session) -> Result<Vec<User>, DashboardError> {
        require_admin(session)?;

        Ok(self.users.list_users().await?)
    }

    /// Add a product to the catalogue.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Forbidden`]: the session is not an administrator's.
    /// - [`DashboardError::Products`]: validation or the request failed.
    pub async fn create_product(
        &self,
        session: &Session,
        product: NewProduct,
    ) -> Result<Product, DashboardError> {
        require_admin(session)?;

        Ok(self.products.create_product(product).await?)
    }

    /// Replace a product's details with `update`.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Forbidden`]: the session is not an administrator's.
    /// - [`DashboardError::Products`]: validation or the request failed.
    pub async fn update_product(
        &self,
        session: &Session,
        product: &ProductId,
        update: NewProduct,
    ) -> Result<Product, DashboardError> {
        require_admin(session)?;

        Ok(self.products.update_product(product, update).await?)
    }

    /// Remove a product from the catalogue.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Forbidden`]: the session is not an administrator's.
    /// - [`DashboardError::Products`]: the request failed.
    pub async fn delete_product(
        &self,
        session: &Session,
        product: &ProductId,
    ) -> Result<(), DashboardError> {
        require_admin(session)?;

        Ok(self.products.delete_product(product).await?)
    }

    /// The contact inbox.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Forbidden`]: the session is not an administrator's.
    /// - [`DashboardError::Messages`]: the request failed.
    pub async fn messages(&self, session: &Session) -> Result<Vec<Message>, DashboardError> {
        require_admin(session)?;

        Ok(self.messages.list_messages().await?)
    }

    /// Mark a message as handled.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Forbidden`]: the session is not an administrator's.
    /// - [`DashboardError::Messages`]: the request failed.
    pub async fn resolve_message(
        &self,
        session: &Session,
        message: &MessageId,
    ) -> Result<(), DashboardError> {
        require_admin(session)?;

        Ok(self.messages.resolve_message(message).await?)
    }

    /// Send a contact-form message, attributed to the signed-in user if any.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Messages`] if a field is missing or the
    /// request fails.
    pub async fn submit_message(
        &self,
        session: Option<&Session>,
        form: ContactForm,
    ) -> Result<(), DashboardError> {
        let ContactForm {
            name,
            email,
            subject,
            message,
        } = form;

        let message = NewMessage {
            name,
            email,
            subject,
            message,
            user_id: session.map(|session| session.user_id().clone()),
        };

        Ok(self.messages.submit_message(message).await?)
    }

    /// Reviews left on a product.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Reviews`] if the request fails.
    pub async fn reviews(&self, product: &ProductId) -> Result<Vec<Review>, DashboardError> {
        Ok(self.reviews.list_reviews(product).await?)
    }

    /// Post a review as the signed-in shopper.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotAuthenticated`]: nobody is signed in.
    /// - [`AuthError::Forbidden`]: administrators cannot review.
    /// - [`DashboardError::Reviews`]: the rating is outside 1 to 5, the
    ///   comment is blank, or the request failed.
    #[instrument(skip(self, session, comment))]
    pub async fn submit_review(
        &self,
        session: Option<&Session>,
        product: &ProductId,
        rating: u8,
        comment: String,
    ) -> Result<(), DashboardError> {
        let session = require_session(session)?;

        if session.is_admin() {
            return Err(AuthError::Forbidden.into());
        }

        let review = NewReview {
            user_id: session.user_id().clone(),
            rating,
            comment,
        };

        Ok(self.reviews.submit_review(product, review).await?)
    }
}

impl Debug for Dashboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Dashboard").finish_non_exhaustive()
    }
}
