//! Cart errors.

use thiserror::Error;

use crate::{
    domain::carts::models::CartItemId,
    http::{ApiError, Cancelled},
};

/// Failures of [`CartsService`](super::CartsService) requests.
#[derive(Debug, Error)]
pub enum CartsServiceError {
    /// The backend answered 404.
    #[error("cart line not found")]
    NotFound,

    /// Any other request failure.
    #[error("cart request failed")]
    Api(#[source] ApiError),
}

impl From<ApiError> for CartsServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}

/// Errors surfaced by [`CartStore`](crate::domain::carts::CartStore) mutations.
///
/// The local view is left untouched whenever one of these is returned.
#[derive(Debug, Error)]
pub enum CartError {
    /// Administrators cannot shop.
    #[error("admins cannot add products to the cart")]
    Forbidden,

    /// No line with this id in the current view.
    #[error("cart line {0} not found")]
    LineNotFound(CartItemId),

    /// Quantity does not fit a cart line.
    #[error("invalid quantity {0}")]
    InvalidQuantity(i64),

    /// The backend rejected the change.
    #[error(transparent)]
    Service(#[from] CartsServiceError),

    /// The view went away mid-request.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}
