//! Checkout errors.

use thiserror::Error;

use crate::{
    domain::{
        carts::CartsServiceError,
        orders::{OrdersServiceError, models::OrderId},
        payments::{PaymentWidgetError, PaymentsServiceError},
    },
    http::Cancelled,
};

/// Why a checkout step was refused or failed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to pay for.
    #[error("your cart is empty")]
    EmptyCart,

    /// The shipping address is blank.
    #[error("please enter a shipping address")]
    AddressRequired,

    /// The step is not allowed in the current state.
    #[error("cannot {action} while {state}")]
    InvalidState {
        /// What was attempted.
        action: &'static str,
        /// [`CheckoutState::name`](super::CheckoutState::name) at the time.
        state: &'static str,
    },

    /// The cart could not be fetched.
    #[error("failed to load cart")]
    Cart(#[from] CartsServiceError),

    /// The payment intent could not be created.
    #[error("payment initialization failed")]
    Payment(#[from] PaymentsServiceError),

    /// The payment widget reported an error.
    #[error("payment widget failed")]
    Widget(#[from] PaymentWidgetError),

    /// The backend rejected the order.
    #[error("failed to create order")]
    Order(#[from] OrdersServiceError),

    /// The order exists but the cart still holds its items.
    #[error("{} was placed but the cart could not be cleared", placed(.order.as_ref()))]
    CartNotCleared {
        /// Id of the created order, when the backend sent it back.
        order: Option<OrderId>,
        /// Why clearing failed.
        #[source]
        source: CartsServiceError,
    },

    /// The view went away mid-request.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

fn placed(order: Option<&OrderId>) -> String {
    order.map_or_else(|| "the order".to_owned(), |order| format!("order {order}"))
}
