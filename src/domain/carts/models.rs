//! Cart Models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        products::models::{Product, ProductId, Size, blank_size_as_none},
        users::models::UserId,
    },
    ids::TypedId,
    pricing,
};

/// Cart Item Id
pub type CartItemId = TypedId<CartItem>;

/// One cart line: a product, a quantity and an optional size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Backend line id, or `local-…` for a guest line.
    #[serde(rename = "_id")]
    pub id: CartItemId,

    /// The backend populates the product reference in place.
    #[serde(rename = "productId")]
    pub product: Product,

    /// Units of the product, at least one.
    pub quantity: u32,

    #[serde(
        default,
        deserialize_with = "blank_size_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    /// Chosen size, if the product is sized.
    pub size: Option<Size>,
}

impl CartItem {
    /// Whether this line holds `product` in `size`.
    #[must_use]
    pub fn holds(&self, product: &ProductId, size: Option<Size>) -> bool {
        self.product.id == *product && self.size == size
    }

    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        pricing::line_total(self.product.price, self.quantity)
    }
}

/// Sum of `price × quantity` over `items`, computed fresh on every call.
#[must_use]
pub fn cart_total(items: &[CartItem]) -> Decimal {
    pricing::total_price(
        items
            .iter()
            .map(|item| (item.product.price, item.quantity)),
    )
}

/// Body of `POST /api/cart`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    /// Product to add.
    pub product_id: ProductId,
    /// Units to add.
    pub quantity: u32,
    /// Chosen size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Owner of the cart.
    pub user_id: UserId,
}
