//! Orders

pub mod errors;
pub mod models;
pub mod overview;
pub mod service;

pub use errors::OrdersServiceError;
pub use overview::OrderOverview;
pub use service::*;
