//! Products

pub mod catalog;
pub mod errors;
pub mod models;
pub mod service;

pub use catalog::{Catalog, SearchMode};
pub use errors::ProductsServiceError;
pub use service::*;
