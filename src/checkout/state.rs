//! Checkout states.

use crate::domain::{orders::models::Order, payments::models::PaymentIntent};

/// Where a [`CheckoutFlow`](super::CheckoutFlow) currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    /// Waiting for the cart fetch.
    LoadingCart,

    /// Nothing to pay for, or nobody signed in. Terminal.
    EmptyCart,

    /// Cart loaded; paying needs a shipping address.
    AwaitingAddress,

    /// The payment widget is open for this intent.
    ProcessingPayment {
        /// Provider order the widget was opened with.
        intent: PaymentIntent,
        /// Trimmed shipping address the order will be placed with.
        address: String,
    },

    /// The order was recorded. Terminal.
    Completed {
        /// The created order, or `None` when the backend accepted it without
        /// sending it back.
        order: Option<Box<Order>>,
    },
}

impl CheckoutState {
    /// Short kebab-case label used in logs and error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoadingCart => "loading-cart",
            Self::EmptyCart => "empty-cart",
            Self::AwaitingAddress => "awaiting-address",
            Self::ProcessingPayment { .. } => "processing-payment",
            Self::Completed { .. } => "completed",
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::EmptyCart | Self::Completed { .. })
    }
}

/// How [`CheckoutFlow::pay`](super::CheckoutFlow::pay) ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckoutOutcome<'a> {
    /// The order was placed. Its details are missing when the backend did
    /// not echo it.
    Placed(Option<&'a Order>),

    /// The shopper closed the widget; the cart is untouched.
    Dismissed,
}
