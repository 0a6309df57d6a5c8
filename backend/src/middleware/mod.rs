pub mod auth;

pub use auth::{AdminUser, AuthMiddleware, CustomerUser, OptionalAuthMiddleware};
