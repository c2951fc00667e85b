//! Users

pub mod errors;
pub mod models;
pub mod service;

pub use errors::UsersServiceError;
pub use service::*;
