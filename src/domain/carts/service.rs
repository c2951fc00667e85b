//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Method;
use serde::Serialize;
use tracing::instrument;

use crate::{
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartItem, CartItemId, NewCartItem},
        },
        users::models::UserId,
    },
    http::ApiClient,
};

const CART_PATH: &str = "/api/cart";

fn line_path(item: &CartItemId) -> String {
    format!("{CART_PATH}/{item}")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserScope<'a> {
    user_id: &'a UserId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuantityUpdate<'a> {
    quantity: u32,
    user_id: &'a UserId,
}

/// [`CartsService`] over the storefront REST API.
#[derive(Debug, Clone)]
pub struct HttpCartsService {
    api: ApiClient,
}

impl HttpCartsService {
    /// Service issuing its requests through `api`.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CartsService for HttpCartsService {
    #[instrument(skip(self))]
    async fn get_cart(&self, user: &UserId) -> Result<Vec<CartItem>, CartsServiceError> {
        Ok(self.api.get(CART_PATH, &UserScope { user_id: user }).await?)
    }

    #[instrument(skip(self))]
    async fn add_item(&self, item: NewCartItem) -> Result<(), CartsServiceError> {
        Ok(self.api.send_unit(Method::POST, CART_PATH, &item).await?)
    }

    #[instrument(skip(self))]
    async fn update_item(
        &self,
        item: &CartItemId,
        quantity: u32,
        user: &UserId,
    ) -> Result<(), CartsServiceError> {
        let body = QuantityUpdate {
            quantity,
            user_id: user,
        };

        Ok(self.api.send_unit(Method::PUT, &line_path(item), &body).await?)
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, item: &CartItemId, user: &UserId) -> Result<(), CartsServiceError> {
        Ok(self
            .api
            .send_query(Method::DELETE, &line_path(item), &UserScope { user_id: user })
            .await?)
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self, user: &UserId) -> Result<(), CartsServiceError> {
        Ok(self
            .api
            .send_unit(Method::DELETE, CART_PATH, &UserScope { user_id: user })
            .await?)
    }
}

/// Remote cart of a signed-in shopper.
#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve every line in the user's cart.
    async fn get_cart(&self, user: &UserId) -> Result<Vec<CartItem>, CartsServiceError>;

    /// Adds a line to the user's cart.
    async fn add_item(&self, item: NewCartItem) -> Result<(), CartsServiceError>;

    /// Sets the quantity of a line.
    async fn update_item(
        &self,
        item: &CartItemId,
        quantity: u32,
        user: &UserId,
    ) -> Result<(), CartsServiceError>;

    /// Deletes a line.
    async fn remove_item(&self, item: &CartItemId, user: &UserId) -> Result<(), CartsServiceError>;

    /// Deletes every line in the user's cart.
    async fn clear_cart(&self, user: &UserId) -> Result<(), CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        domain::products::models::{ProductId, Size},
        test::{RecordedRequest, TestServer},
    };

    use super::*;

    const CART: &str = r#"[{"_id":"c1","productId":{"_id":"p1","name":"Tee","price":500,
        "category":"unisex"},"quantity":2,"size":"M","userId":"u1"}]"#;

    async fn only_request(server: &TestServer) -> TestResult<RecordedRequest> {
        let requests = server.requests().await;

        assert_eq!(requests.len(), 1, "expected exactly one request");

        Ok(requests.into_iter().next().ok_or("no request received")?)
    }

    #[tokio::test]
    async fn cart_is_fetched_by_user_query() -> TestResult {
        let server = TestServer::respond_with(200, CART).await?;
        let carts = HttpCartsService::new(server.client()?);

        let items = carts.get_cart(&UserId::new("u1")).await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|item| item.quantity), Some(2));

        let request = only_request(&server).await?;

        assert_eq!(request.method, "GET");
        assert_eq!(request.target, "/api/cart?userId=u1");

        Ok(())
    }

    #[tokio::test]
    async fn new_line_is_posted_as_json() -> TestResult {
        let server = TestServer::respond_with(201, "{}").await?;
        let carts = HttpCartsService::new(server.client()?);

        carts
            .add_item(NewCartItem {
                product_id: ProductId::new("p1"),
                quantity: 1,
                size: Some(Size::L),
                user_id: UserId::new("u1"),
            })
            .await?;

        let request = only_request(&server).await?;

        assert_eq!(request.method, "POST");
        assert_eq!(request.target, "/api/cart");
        assert_eq!(
            request.json()?,
            json!({"productId": "p1", "quantity": 1, "size": "L", "userId": "u1"})
        );

        Ok(())
    }

    #[tokio::test]
    async fn quantity_update_puts_quantity_and_user_in_body() -> TestResult {
        let server = TestServer::respond_with(200, "{}").await?;
        let carts = HttpCartsService::new(server.client()?);

        carts
            .update_item(&CartItemId::new("c1"), 3, &UserId::new("u1"))
            .await?;

        let request = only_request(&server).await?;

        assert_eq!(request.method, "PUT");
        assert_eq!(request.target, "/api/cart/c1");
        assert_eq!(request.json()?, json!({"quantity": 3, "userId": "u1"}));

        Ok(())
    }

    #[tokio::test]
    async fn line_removal_sends_user_in_query() -> TestResult {
        let server = TestServer::respond_with(200, "{}").await?;
        let carts = HttpCartsService::new(server.client()?);

        carts
            .remove_item(&CartItemId::new("c1"), &UserId::new("u1"))
            .await?;

        let request = only_request(&server).await?;

        assert_eq!(request.method, "DELETE");
        assert_eq!(request.target, "/api/cart/c1?userId=u1");
        assert!(request.body.is_empty(), "body: {}", request.body);

        Ok(())
    }

    #[tokio::test]
    async fn clearing_sends_user_in_body() -> TestResult {
        let server = TestServer::respond_with(200, "{}").await?;
        let carts = HttpCartsService::new(server.client()?);

        carts.clear_cart(&UserId::new("u1")).await?;

        let request = only_request(&server).await?;

        assert_eq!(request.method, "DELETE");
        assert_eq!(request.target, "/api/cart");
        assert_eq!(request.json()?, json!({"userId": "u1"}));

        Ok(())
    }

    #[tokio::test]
    async fn missing_line_maps_to_not_found() -> TestResult {
        let server = TestServer::respond_with(404, r#"{"message":"Item not found"}"#).await?;
        let carts = HttpCartsService::new(server.client()?);

        let result = carts
            .update_item(&CartItemId::new("gone"), 1, &UserId::new("u1"))
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "got {result:?}"
        );

        Ok(())
    }
}
