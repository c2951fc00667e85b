//! Payments

pub mod errors;
pub mod models;
pub mod service;
pub mod widget;

pub use errors::{PaymentWidgetError, PaymentsServiceError};
pub use service::*;
pub use widget::*;
