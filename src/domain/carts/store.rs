//! Cart Store
//!
//! The client-side view of a cart. Guests get a purely local cart that starts
//! empty on every load. Signed-in shoppers mirror every mutation to the cart
//! endpoint and then refetch the whole cart, so the exposed lines are always
//! the server's.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    future::Future,
    sync::Arc,
};

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::Session,
    domain::{
        carts::{
            errors::{CartError, CartsServiceError},
            models::{CartItem, CartItemId, NewCartItem, cart_total},
            service::CartsService,
        },
        products::models::{Product, Size},
        users::models::UserId,
    },
    http::CancelToken,
};

/// Cart lines plus the service they are reconciled against.
pub struct CartStore {
    carts: Arc<dyn CartsService>,
    token: CancelToken,
    items: Vec<CartItem>,
}

impl CartStore {
    /// Create an empty store whose requests are abandoned once `token`'s scope
    /// is cancelled.
    #[must_use]
    pub fn new(carts: Arc<dyn CartsService>, token: CancelToken) -> Self {
        Self {
            carts,
            token,
            items: Vec::new(),
        }
    }

    /// Current lines.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price × quantity` over the current lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        cart_total(&self.items)
    }

    /// Replace the view with the remote cart, or an empty one for guests.
    ///
    /// # Errors
    ///
    /// Returns the service error if the fetch fails; the view is unchanged.
    #[instrument(skip_all)]
    pub async fn load(&mut self, session: Option<&Session>) -> Result<(), CartError> {
        let Some(session) = session else {
            self.items.clear();

            return Ok(());
        };

        self.refetch(session.user_id()).await
    }

    /// Add one unit of `product` in `size`, merging into an existing line for
    /// the same product and size.
    ///
    /// # Errors
    ///
    /// - [`CartError::Forbidden`]: the session belongs to an administrator.
    /// - [`CartError::Service`]: a remote call failed; the view is unchanged.
    #[instrument(skip_all, fields(product = %product.id, ?size))]
    pub async fn add(
        &mut self,
        session: Option<&Session>,
        product: &Product,
        size: Option<Size>,
    ) -> Result<(), CartError> {
        let Some(session) = session else {
            match self
                .items
                .iter_mut()
                .find(|item| item.holds(&product.id, size))
            {
                Some(line) => line.quantity = line.quantity.saturating_add(1),
                None => self.items.push(CartItem {
                    id: CartItemId::new(format!("local-{}", Uuid::now_v7())),
                    product: product.clone(),
                    quantity: 1,
                    size,
                }),
            }

            return Ok(());
        };

        if session.is_admin() {
            return Err(CartError::Forbidden);
        }

        let user = session.user_id();

        match self.items.iter().find(|item| item.holds(&product.id, size)) {
            Some(line) => {
                let quantity = line.quantity.saturating_add(1);

                self.remote("update_item", self.carts.update_item(&line.id, quantity, user))
                    .await?;
            }
            None => {
                let item = NewCartItem {
                    product_id: product.id.clone(),
                    quantity: 1,
                    size,
                    user_id: user.clone(),
                };

                self.remote("add_item", self.carts.add_item(item)).await?;
            }
        }

        self.refetch(user).await
    }

    /// Set a line's quantity; zero or less removes the line.
    ///
    /// # Errors
    ///
    /// - [`CartError::LineNotFound`]: a guest cart has no such line.
    /// - [`CartError::InvalidQuantity`]: `quantity` exceeds what a line can hold.
    /// - [`CartError::Service`]: a remote call failed; the view is unchanged.
    #[instrument(skip(self, session))]
    pub async fn update_quantity(
        &mut self,
        session: Option<&Session>,
        item: &CartItemId,
        quantity: i64,
    ) -> Result<(), CartError> {
        if quantity <= 0 {
            return self.remove(session, item).await;
        }

        let quantity = u32::try_from(quantity).map_err(|_err| CartError::InvalidQuantity(quantity))?;

        let Some(session) = session else {
            let line = self
                .items
                .iter_mut()
                .find(|line| line.id == *item)
                .ok_or_else(|| CartError::LineNotFound(item.clone()))?;

            line.quantity = quantity;

            return Ok(());
        };

        let user = session.user_id();

        self.remote("update_item", self.carts.update_item(item, quantity, user))
            .await?;

        self.refetch(user).await
    }

    /// Delete a line regardless of its quantity.
    ///
    /// # Errors
    ///
    /// - [`CartError::LineNotFound`]: a guest cart has no such line.
    /// - [`CartError::Service`]: a remote call failed; the view is unchanged.
    #[instrument(skip(self, session))]
    pub async fn remove(
        &mut self,
        session: Option<&Session>,
        item: &CartItemId,
    ) -> Result<(), CartError> {
        let Some(session) = session else {
            let before = self.items.len();

            self.items.retain(|line| line.id != *item);

            if self.items.len() == before {
                return Err(CartError::LineNotFound(item.clone()));
            }

            return Ok(());
        };

        let user = session.user_id();

        self.remote("remove_item", self.carts.remove_item(item, user))
            .await?;

        self.refetch(user).await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns the service error if the remote clear fails; the view is
    /// unchanged.
    #[instrument(skip_all)]
    pub async fn clear(&mut self, session: Option<&Session>) -> Result<(), CartError> {
        if let Some(session) = session {
            self.remote("clear_cart", self.carts.clear_cart(session.user_id()))
                .await?;
        }

        self.items.clear();

        Ok(())
    }

    async fn refetch(&mut self, user: &UserId) -> Result<(), CartError> {
        let items = self.remote("get_cart", self.carts.get_cart(user)).await?;

        debug!(lines = items.len(), "cart refreshed");

        self.items = items;

        Ok(())
    }

    async fn remote<T>(
        &self,
        operation: &'static str,
        request: impl Future<Output = Result<T, CartsServiceError>>,
    ) -> Result<T, CartError> {
        match self.token.run(request).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => {
                warn!(operation, error = %error, "cart request failed");

                Err(error.into())
            }
            Err(cancelled) => {
                debug!(operation, "cart request cancelled");

                Err(cancelled.into())
            }
        }
    }
}

impl Debug for CartStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use reqwest::{Method, StatusCode};
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::MockCartsService,
            products::models::{Category, ProductId},
            users::models::{Role, User},
        },
        http::{ApiError, CancelScope},
    };

    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::from(price),
            image: String::new(),
            category: Category::Unisex,
            description: String::new(),
            is_new: false,
        }
    }

    fn session(role: Role) -> Session {
        Session::new(User {
            id: UserId::new("u1"),
            email: "asha@example.com".to_owned(),
            name: "Asha".to_owned(),
            role,
            avatar: None,
            phone: None,
            address: None,
        })
    }

    fn line(id: &str, product: Product, quantity: u32) -> CartItem {
        CartItem {
            id: CartItemId::new(id),
            product,
            quantity,
            size: Some(Size::M),
        }
    }

    fn server_error() -> CartsServiceError {
        CartsServiceError::Api(ApiError::Status {
            method: Method::DELETE,
            path: "/api/cart/c1".to_owned(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        })
    }

    #[tokio::test]
    async fn guest_add_twice_yields_quantity_two() -> TestResult {
        let mut store = CartStore::new(Arc::new(MockCartsService::new()), CancelToken::never());
        let tee = product("p1", 500);

        store.add(None, &tee, Some(Size::M)).await?;
        store.add(None, &tee, Some(Size::M)).await?;

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 2);
        assert_eq!(store.total(), Decimal::from(1000));

        Ok(())
    }

    #[tokio::test]
    async fn guest_different_sizes_are_separate_lines() -> TestResult {
        let mut store = CartStore::new(Arc::new(MockCartsService::new()), CancelToken::never());
        let tee = product("p1", 500);

        store.add(None, &tee, Some(Size::M)).await?;
        store.add(None, &tee, Some(Size::L)).await?;

        assert_eq!(store.items().len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn guest_non_positive_quantity_removes_line() -> TestResult {
        let mut store = CartStore::new(Arc::new(MockCartsService::new()), CancelToken::never());

        store.add(None, &product("p1", 500), None).await?;
        store.add(None, &product("p2", 1200), None).await?;

        let first = store.items()[0].id.clone();

        store.update_quantity(None, &first, -1).await?;

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].product.id, ProductId::new("p2"));

        let second = store.items()[0].id.clone();

        store.update_quantity(None, &second, 0).await?;

        assert!(store.is_empty(), "quantity 0 should remove the line");

        Ok(())
    }

    #[tokio::test]
    async fn guest_load_starts_empty() -> TestResult {
        let mut store = CartStore::new(Arc::new(MockCartsService::new()), CancelToken::never());

        store.add(None, &product("p1", 500), None).await?;
        store.load(None).await?;

        assert!(store.is_empty(), "guest carts are not persisted");

        Ok(())
    }

    #[tokio::test]
    async fn admin_cannot_add() {
        let mut store = CartStore::new(Arc::new(MockCartsService::new()), CancelToken::never());
        let admin = session(Role::Admin);

        let result = store.add(Some(&admin), &product("p1", 500), None).await;

        assert!(matches!(result, Err(CartError::Forbidden)), "got {result:?}");
    }

    #[tokio::test]
    async fn authenticated_add_merges_remotely_then_refetches() -> TestResult {
        let tee = product("p1", 500);
        let existing = line("c1", tee.clone(), 1);
        let refreshed = vec![line("c1", tee.clone(), 2)];

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(move |_| Ok(vec![existing]));

        carts
            .expect_update_item()
            .once()
            .withf(|item, quantity, user| {
                item.as_str() == "c1" && *quantity == 2 && user.as_str() == "u1"
            })
            .return_once(|_, _, _| Ok(()));

        carts
            .expect_get_cart()
            .once()
            .return_once(move |_| Ok(refreshed));

        let shopper = session(Role::User);
        let mut store = CartStore::new(Arc::new(carts), CancelToken::never());

        store.load(Some(&shopper)).await?;
        store.add(Some(&shopper), &tee, Some(Size::M)).await?;

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn failed_remote_mutation_leaves_view_unchanged() -> TestResult {
        let tee = product("p1", 500);
        let loaded = vec![line("c1", tee, 3)];

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(move |_| Ok(loaded));

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(server_error()));

        let shopper = session(Role::User);
        let mut store = CartStore::new(Arc::new(carts), CancelToken::never());

        store.load(Some(&shopper)).await?;

        let before = store.items().to_vec();
        let result = store
            .remove(Some(&shopper), &CartItemId::new("c1"))
            .await;

        assert!(matches!(result, Err(CartError::Service(_))), "got {result:?}");
        assert_eq!(store.items(), before.as_slice());

        Ok(())
    }

    #[tokio::test]
    async fn authenticated_zero_quantity_removes_remotely() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(|item, _| item.as_str() == "c1")
            .return_once(|_, _| Ok(()));

        carts.expect_get_cart().once().return_once(|_| Ok(Vec::new()));

        let shopper = session(Role::User);
        let mut store = CartStore::new(Arc::new(carts), CancelToken::never());

        store
            .update_quantity(Some(&shopper), &CartItemId::new("c1"), 0)
            .await?;

        assert!(store.is_empty(), "refetched cart is empty");

        Ok(())
    }

    #[tokio::test]
    async fn cancelled_scope_discards_results() {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .times(0..=1)
            .returning(|_| Ok(vec![line("c1", product("p1", 500), 1)]));

        let scope = CancelScope::new();
        let mut store = CartStore::new(Arc::new(carts), scope.token());
        let shopper = session(Role::User);

        scope.cancel();

        let result = store.load(Some(&shopper)).await;

        assert!(matches!(result, Err(CartError::Cancelled(_))), "got {result:?}");
        assert!(store.is_empty(), "nothing applied after cancellation");
    }
}
