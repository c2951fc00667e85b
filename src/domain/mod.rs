//! Domain services and models.

pub mod carts;
pub mod messages;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod users;
