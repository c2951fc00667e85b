//! Storefront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{
        AuthError, Credentials, FileSessionStore, Password, ProfileUpdate, Registration, Session,
        SessionManager,
    },
    checkout::{CheckoutError, CheckoutFlow, CheckoutOutcome, CheckoutState},
    context::{ContextInitError, StorefrontContext},
    dashboard::{ContactForm, Dashboard, DashboardError},
    domain::{
        carts::{CartError, CartStore, models::CartItem},
        orders::{
            OrderOverview,
            models::{Order, OrderStatus},
        },
        payments::{PaymentOutcome, PaymentReceipt, PaymentRequest, PaymentWidget},
        products::{
            Catalog, SearchMode,
            models::{Category, CategoryFilter, Product, ProductQuery, Size, SortKey},
        },
        users::models::{Role, User},
    },
    http::{ApiConfig, ApiError, CancelScope, CancelToken},
};
