//! Order Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        carts::models::{CartItem, cart_total},
        products::models::{ProductId, Size, blank_size_as_none},
        users::models::{UserId, UserRef},
    },
    ids::TypedId,
};

/// Order Id
pub type OrderId = TypedId<Order>;

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet handled.
    Pending,
    /// Being prepared.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the shopper.
    Delivered,
    /// Closed successfully.
    Completed,
    /// Called off.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in fulfilment order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Status name outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownStatus(String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownStatus(value.to_owned()))
    }
}

/// Settlement state of an order's payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Not settled yet.
    Pending,
    /// Captured.
    Completed,
    /// Declined or errored.
    Failed,
    /// Returned to the shopper.
    Refunded,
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        })
    }
}

/// Product summary populated into order lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Backend id.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Name at population time.
    #[serde(default)]
    pub name: String,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Current catalogue price, if populated.
    #[serde(default)]
    pub price: Option<Decimal>,
}

/// A product reference that is either a bare id or a populated summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductRef {
    /// Unpopulated reference.
    Id(ProductId),
    /// Populated reference.
    Summary(ProductSummary),
}

impl ProductRef {
    /// Referenced product's id, in either form.
    #[must_use]
    pub fn id(&self) -> &ProductId {
        match self {
            Self::Id(id) => id,
            Self::Summary(summary) => &summary.id,
        }
    }

    /// Product name when populated.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Summary(summary) => Some(summary.name.as_str()),
        }
    }
}

/// One purchased line, priced as it was at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// `None` when the product has since been deleted.
    pub product: Option<ProductRef>,
    /// Units bought.
    pub quantity: u32,
    /// Size bought.
    #[serde(default, deserialize_with = "blank_size_as_none")]
    pub size: Option<Size>,
    /// Unit price at checkout.
    pub price: Decimal,
}

/// Order Model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Backend id.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Buyer, populated for admin listings.
    #[serde(rename = "userId", default)]
    pub user: Option<UserRef>,
    /// Purchased lines.
    pub items: Vec<OrderItem>,
    /// Amount charged.
    pub total: Decimal,
    /// Provider payment id.
    #[serde(default)]
    pub payment_id: String,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Shipping address.
    #[serde(default)]
    pub address: String,
    /// Placement time.
    pub created_at: Timestamp,
}

impl Order {
    /// Short invoice reference: the last eight characters of the id, uppercased.
    #[must_use]
    pub fn invoice_number(&self) -> String {
        let id = self.id.as_str();
        let skip = id.chars().count().saturating_sub(8);

        id.chars().skip(skip).collect::<String>().to_uppercase()
    }
}

/// Snapshot of a cart line sent with a new order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrderItem {
    /// Product bought.
    pub product: ProductId,
    /// Units bought.
    pub quantity: u32,
    /// Size bought.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Unit price copied from the cart.
    pub price: Decimal,
}

/// Body of `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Buyer.
    pub user_id: UserId,
    /// Snapshot of the cart lines.
    pub items: Vec<NewOrderItem>,
    /// Sum of the snapshot lines.
    pub total: Decimal,
    /// Provider payment id.
    pub payment_id: String,
    /// Fulfilment status the order starts in.
    pub status: OrderStatus,
    /// Always [`PaymentStatus::Completed`]: orders follow a captured payment.
    pub payment_status: PaymentStatus,
    /// Trimmed shipping address.
    pub address: String,
}

impl NewOrder {
    /// Capture the cart as a paid order.
    ///
    /// Unit prices are copied from the cart lines, so later catalog price
    /// changes never reach the order.
    #[must_use]
    pub fn from_cart(
        user: UserId,
        items: &[CartItem],
        payment_id: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user,
            items: items
                .iter()
                .map(|item| NewOrderItem {
                    product: item.product.id.clone(),
                    quantity: item.quantity,
                    size: item.size,
                    price: item.product.price,
                })
                .collect(),
            total: cart_total(items),
            payment_id: payment_id.into(),
            status: OrderStatus::Completed,
            payment_status: PaymentStatus::Completed,
            address: address.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusUpdate {
    pub(crate) status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::{
        carts::models::CartItemId,
        products::models::{Category, Product},
    };

    use super::*;

    fn cart_line(id: &str, price: i64, quantity: u32) -> CartItem {
        CartItem {
            id: CartItemId::new(format!("c-{id}")),
            product: Product {
                id: ProductId::new(id),
                name: id.to_owned(),
                price: Decimal::from(price),
                image: String::new(),
                category: Category::Women,
                description: String::new(),
                is_new: false,
            },
            quantity,
            size: Some(Size::S),
        }
    }

    #[test]
    fn decodes_populated_and_bare_references() -> TestResult {
        let orders: Vec<Order> = serde_json::from_str(
            r#"[
              {"_id":"665f00000000000000abcdef","userId":{"_id":"u1","name":"Asha","email":"a@b.c"},
               "items":[{"product":{"_id":"p1","name":"Tee","image":"/t.jpg","price":500},
                         "quantity":2,"size":"M","price":450}],
               "total":900,"paymentId":"pay_1","status":"completed","paymentStatus":"completed",
               "address":"12 MG Road","createdAt":"2024-03-05T10:00:00.000Z"},
              {"_id":"o2","userId":"u2","items":[{"product":"p2","quantity":1,"price":100}],
               "total":100,"status":"pending","paymentStatus":"pending",
               "createdAt":"2024-04-01T00:00:00Z"}
            ]"#,
        )?;

        assert_eq!(orders[0].user.as_ref().and_then(UserRef::name), Some("Asha"));
        assert_eq!(
            orders[0].items[0].price,
            Decimal::from(450),
            "line keeps its purchase-time price"
        );
        assert_eq!(orders[1].user.as_ref().map(UserRef::id), Some(&UserId::new("u2")));
        assert_eq!(
            orders[1].items[0].product.as_ref().map(ProductRef::id),
            Some(&ProductId::new("p2"))
        );
        assert_eq!(orders[0].invoice_number(), "00ABCDEF");

        Ok(())
    }

    #[test]
    fn new_order_snapshots_cart_prices() -> TestResult {
        let lines = [cart_line("p1", 500, 2), cart_line("p2", 1200, 1)];

        let order = NewOrder::from_cart(UserId::new("u1"), &lines, "pay_123", "12 MG Road");

        assert_eq!(order.total, Decimal::from(2200));
        assert_eq!(order.items[0].price, Decimal::from(500));

        let body = serde_json::to_value(&order)?;

        assert_eq!(body["userId"], "u1");
        assert_eq!(body["paymentId"], "pay_123");
        assert_eq!(body["status"], "completed");
        assert_eq!(body["paymentStatus"], "completed");
        assert_eq!(body["items"][0]["product"], "p1");

        Ok(())
    }

    #[test]
    fn status_names_parse_case_insensitively() {
        assert_eq!("Shipped".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
        assert_eq!(
            "lost".parse::<OrderStatus>(),
            Err(UnknownStatus("lost".to_owned()))
        );
    }

    #[test]
    fn invoice_number_of_short_id_is_whole_id() {
        let order_id = OrderId::new("ab12");

        let order = Order {
            id: order_id,
            user: None,
            items: Vec::new(),
            total: Decimal::ZERO,
            payment_id: String::new(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            address: String::new(),
            created_at: Timestamp::UNIX_EPOCH,
        };

        assert_eq!(order.invoice_number(), "AB12");
    }
}
