//! Authentication
//!
//! Login, registration and profile updates against the users endpoints, with
//! the signed-in user cached in a [`SessionStore`] so a restart can restore
//! the session.

mod errors;
mod models;
mod service;
mod session;
mod store;

pub use errors::*;
pub use models::*;
pub use service::*;
pub use session::SessionManager;
pub use store::*;
