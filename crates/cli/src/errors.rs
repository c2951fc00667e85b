//! Command errors.

use std::io;

use thiserror::Error;

use storefront::{
    auth::AuthError,
    checkout::CheckoutError,
    context::ContextInitError,
    dashboard::DashboardError,
    domain::{carts::CartError, products::ProductsServiceError},
};

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error(transparent)]
    Context(#[from] ContextInitError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Catalog(#[from] ProductsServiceError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    Dashboard(#[from] DashboardError),

    #[error("no order {0} in your orders")]
    UnknownOrder(String),

    #[error("failed to write output")]
    Output(#[from] io::Error),
}
