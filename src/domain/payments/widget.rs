//! Third-party payment widget boundary.
//!
//! The widget is opened with a pre-created [`PaymentIntent`] and either
//! reports a captured payment or a dismissal. Front ends supply their own
//! implementation (a hosted checkout, a terminal prompt, a test double).

use async_trait::async_trait;
use mockall::automock;

use crate::domain::payments::{errors::PaymentWidgetError, models::PaymentIntent};

/// Customer details prefilled into the widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefill {
    /// Customer name.
    pub name: String,
    /// Customer email.
    pub email: String,
    /// Customer phone number.
    pub contact: Option<String>,
}

/// Everything the widget needs to take a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Provider order to pay.
    pub intent: PaymentIntent,
    /// Shown to the customer.
    pub description: String,
    /// Customer details.
    pub prefill: Prefill,
}

/// Provider references for a captured payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    /// Provider payment id, sent with the order.
    pub payment_id: String,
    /// Provider order the payment settled.
    pub order_id: String,
    /// Provider signature over the two ids.
    pub signature: String,
}

/// How the widget was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The payment was captured.
    Paid(PaymentReceipt),
    /// Closed without paying.
    Dismissed,
}

/// Hosted checkout a front end opens for a payment intent.
#[automock]
#[async_trait]
pub trait PaymentWidget: Send + Sync {
    /// Shows the widget and waits for the customer to pay or close it.
    async fn open(&self, request: PaymentRequest) -> Result<PaymentOutcome, PaymentWidgetError>;
}
