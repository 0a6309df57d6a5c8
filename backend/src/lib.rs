//! REST backend for the Acme Store retail platform.
//!
//! Staff accounts manage the catalog, the org structure, and order
//! fulfilment; customer accounts browse, order, and track shipments.
//! The two account realms are disjoint and carry separate tokens.

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

pub use config::AppConfig;
pub use database::Database;
pub use error::AppError;
