//! Checkout
//!
//! ```text
//! LoadingCart ──▶ AwaitingAddress ──▶ ProcessingPayment ──▶ Completed
//!      │                ▲                    │
//!      ▼                └──── dismissed ─────┘
//!  EmptyCart
//! ```

mod errors;
mod flow;
mod state;

pub use errors::CheckoutError;
pub use flow::CheckoutFlow;
pub use state::{CheckoutOutcome, CheckoutState};
