//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::{
    domain::{
        orders::{
            errors::OrdersServiceError,
            models::{NewOrder, Order, OrderId, OrderStatus, StatusUpdate},
        },
        users::models::UserId,
    },
    http::{ApiClient, ApiError, NO_QUERY},
};

const ORDERS_PATH: &str = "/api/orders";
const ALL_ORDERS_PATH: &str = "/api/orders/all";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OwnerQuery<'a> {
    user_id: &'a UserId,
}

/// [`OrdersService`] over the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    api: ApiClient,
}

impl HttpOrdersService {
    /// Service issuing its requests through `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    #[instrument(skip(self, order), fields(user = %order.user_id, items = order.items.len()))]
    async fn create_order(&self, order: NewOrder) -> Result<Option<Order>, OrdersServiceError> {
        if order.items.is_empty() {
            return Err(OrdersServiceError::Empty);
        }

        match self.api.send(Method::POST, ORDERS_PATH, &order).await {
            Ok(order) => Ok(Some(order)),
            // Only a success status gets as far as decoding.
            Err(ApiError::Decode { path, source }) => {
                warn!(path = %path, error = %source, "order accepted without an order body");

                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }

    #[instrument(skip(self))]
    async fn list_orders(&self, user: &UserId) -> Result<Vec<Order>, OrdersServiceError> {
        Ok(self.api.get(ORDERS_PATH, &OwnerQuery { user_id: user }).await?)
    }

    #[instrument(skip(self))]
    async fn list_all_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        Ok(self.api.get(ALL_ORDERS_PATH, NO_QUERY).await?)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        order: &OrderId,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError> {
        let path = format!("{ORDERS_PATH}/{order}/status");

        Ok(self
            .api
            .send_unit(Method::PATCH, &path, &StatusUpdate { status })
            .await?)
    }
}

/// Order creation, history and fulfilment.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Records a paid order.
    ///
    /// Returns `None` when the backend accepted the order but did not send
    /// the stored order back.
    async fn create_order(&self, order: NewOrder) -> Result<Option<Order>, OrdersServiceError>;

    /// Retrieve the orders placed by one user.
    async fn list_orders(&self, user: &UserId) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve every order in the store.
    async fn list_all_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Moves an order to a new fulfilment state.
    async fn update_status(
        &self,
        order: &OrderId,
        status: OrderStatus,
    ) -> Result<(), OrdersServiceError>;
}
