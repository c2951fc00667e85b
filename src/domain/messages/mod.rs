//! Contact messages

pub mod errors;
pub mod models;
pub mod service;

pub use errors::MessagesServiceError;
pub use service::*;
