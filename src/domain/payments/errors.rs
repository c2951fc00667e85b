//! Payment errors.

use std::io;

use thiserror::Error;

use crate::{http::ApiError, pricing::PricingError};

/// Failures creating a payment intent.
#[derive(Debug, Error)]
pub enum PaymentsServiceError {
    /// The total has no minor-unit form.
    #[error("cannot charge this amount")]
    Amount(#[from] PricingError),

    /// The request failed or was rejected.
    #[error("payment request failed")]
    Api(#[from] ApiError),
}

/// The payment widget could not be shown or did not report back.
#[derive(Debug, Error)]
pub enum PaymentWidgetError {
    /// The widget could not be shown.
    #[error("payment widget unavailable: {0}")]
    Unavailable(String),

    /// Reading the customer's answer failed.
    #[error("payment widget i/o failed")]
    Io(#[from] io::Error),
}
