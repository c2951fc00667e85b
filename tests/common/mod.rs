//! Shared fixtures for integration tests.

#![expect(
    dead_code,
    reason = "each integration test binary uses a different subset of fixtures"
)]

use jiff::Timestamp;
use rust_decimal::Decimal;

use storefront::{
    auth::Session,
    domain::{
        carts::models::{CartItem, CartItemId},
        orders::models::{NewOrder, Order, OrderId, OrderItem, ProductRef},
        products::models::{Category, Product, ProductId, Size},
        users::models::{Role, User, UserId, UserRef},
    },
};

pub fn product(id: &str, price: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Decimal::from(price),
        image: format!("/images/{id}.jpg"),
        category: Category::Unisex,
        description: String::new(),
        is_new: false,
    }
}

pub fn line(id: &str, product: Product, quantity: u32) -> CartItem {
    CartItem {
        id: CartItemId::new(id),
        product,
        quantity,
        size: Some(Size::M),
    }
}

pub fn shopper() -> Session {
    session(Role::User)
}

pub fn session(role: Role) -> Session {
    Session::new(User {
        id: UserId::new("u1"),
        email: "asha@example.com".to_owned(),
        name: "Asha".to_owned(),
        role,
        avatar: None,
        phone: Some("9876543210".to_owned()),
        address: None,
    })
}

/// The order the backend would answer `POST /api/orders` with.
pub fn created_order(order: &NewOrder) -> Order {
    Order {
        id: OrderId::new("665f00000000000000abcdef"),
        user: Some(UserRef::Id(order.user_id.clone())),
        items: order
            .items
            .iter()
            .map(|item| OrderItem {
                product: Some(ProductRef::Id(item.product.clone())),
                quantity: item.quantity,
                size: item.size,
                price: item.price,
            })
            .collect(),
        total: order.total,
        payment_id: order.payment_id.clone(),
        status: order.status,
        payment_status: order.payment_status,
        address: order.address.clone(),
        created_at: Timestamp::UNIX_EPOCH,
    }
}
