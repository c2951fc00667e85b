//! Integration tests for cart reconciliation against the cart endpoint

mod common;

use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use reqwest::{Method, StatusCode};
use rust_decimal::Decimal;
use testresult::TestResult;

use storefront::{
    domain::{
        carts::{CartError, CartStore, CartsServiceError, MockCartsService, models::CartItemId},
        products::models::Size,
        users::models::Role,
    },
    http::{ApiError, CancelToken},
};

use common::{line, product, session, shopper};

fn store(carts: MockCartsService) -> CartStore {
    CartStore::new(Arc::new(carts), CancelToken::never())
}

#[tokio::test]
async fn guest_cart_merges_same_product_and_size() -> TestResult {
    let mut cart = store(MockCartsService::new());
    let tee = product("p1", 500);

    cart.add(None, &tee, Some(Size::M)).await?;
    cart.add(None, &tee, Some(Size::M)).await?;
    cart.add(None, &tee, Some(Size::L)).await?;

    let quantities: Vec<_> = cart
        .items()
        .iter()
        .map(|item| (item.size, item.quantity))
        .collect();

    assert_eq!(quantities, vec![(Some(Size::M), 2), (Some(Size::L), 1)]);
    assert_eq!(cart.total(), Decimal::from(1500));

    Ok(())
}

#[tokio::test]
async fn guest_quantity_at_or_below_zero_removes_line() -> TestResult {
    let mut cart = store(MockCartsService::new());

    cart.add(None, &product("p1", 500), None).await?;
    cart.add(None, &product("p2", 1200), None).await?;

    let first = cart
        .items()
        .first()
        .map(|item| item.id.clone())
        .ok_or("cart should have lines")?;

    cart.update_quantity(None, &first, -3).await?;

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.total(), Decimal::from(1200));

    Ok(())
}

#[tokio::test]
async fn authenticated_cart_mirrors_server_after_each_mutation() -> TestResult {
    let mut carts = MockCartsService::new();
    let fetches = Arc::new(AtomicU32::new(0));

    carts
        .expect_add_item()
        .once()
        .withf(|item| item.product_id.as_str() == "p2" && item.quantity == 1)
        .return_once(|_| Ok(()));

    carts.expect_get_cart().times(2).returning({
        let fetches = Arc::clone(&fetches);

        move |_| {
            let mut items = vec![line("c1", product("p1", 500), 2)];

            if fetches.fetch_add(1, Ordering::SeqCst) > 0 {
                items.push(line("c2", product("p2", 1200), 1));
            }

            Ok(items)
        }
    });

    let mut cart = store(carts);
    let session = shopper();

    cart.load(Some(&session)).await?;

    assert_eq!(cart.total(), Decimal::from(1000));

    cart.add(Some(&session), &product("p2", 1200), Some(Size::M))
        .await?;

    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.total(), Decimal::from(2200));

    Ok(())
}

#[tokio::test]
async fn failed_update_leaves_cart_as_it_was() -> TestResult {
    let mut carts = MockCartsService::new();

    carts
        .expect_get_cart()
        .once()
        .return_once(|_| Ok(vec![line("c1", product("p1", 500), 2)]));

    carts.expect_update_item().once().return_once(|_, _, _| {
        Err(CartsServiceError::Api(ApiError::Status {
            method: Method::PUT,
            path: "/api/cart/c1".to_owned(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        }))
    });

    let mut cart = store(carts);
    let session = shopper();

    cart.load(Some(&session)).await?;

    let before = cart.items().to_vec();
    let result = cart
        .update_quantity(Some(&session), &CartItemId::new("c1"), 5)
        .await;

    assert!(matches!(result, Err(CartError::Service(_))), "got {result:?}");
    assert_eq!(cart.items(), before.as_slice());

    Ok(())
}

#[tokio::test]
async fn administrators_have_no_cart() {
    let mut cart = store(MockCartsService::new());

    let result = cart
        .add(Some(&session(Role::Admin)), &product("p1", 500), Some(Size::S))
        .await;

    assert!(matches!(result, Err(CartError::Forbidden)), "got {result:?}");
    assert!(cart.is_empty(), "nothing was added");
}

#[tokio::test]
async fn clearing_an_authenticated_cart_empties_the_view() -> TestResult {
    let mut carts = MockCartsService::new();

    carts
        .expect_get_cart()
        .once()
        .return_once(|_| Ok(vec![line("c1", product("p1", 500), 2)]));
    carts.expect_clear_cart().once().return_once(|_| Ok(()));

    let mut cart = store(carts);
    let session = shopper();

    cart.load(Some(&session)).await?;
    cart.clear(Some(&session)).await?;

    assert!(cart.is_empty(), "cart should be empty after clear");
    assert_eq!(cart.total(), Decimal::ZERO);

    Ok(())
}
