//! Storefront
//!
//! Client core for a REST e-commerce backend: catalog browsing, cart
//! reconciliation, checkout with a third-party payment widget, the auth
//! session, and the role-gated dashboard operations.

pub mod auth;
pub mod checkout;
pub mod context;
pub mod dashboard;
pub mod domain;
pub mod http;
pub mod ids;
pub mod prelude;
pub mod pricing;
pub mod tables;

#[cfg(test)]
mod test;
