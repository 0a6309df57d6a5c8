//! Business logic that spans tables or needs a transaction.

pub mod auth_service;
pub mod order_service;

pub use auth_service::AuthService;
pub use order_service::OrderService;
