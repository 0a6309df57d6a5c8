//! HTTP handlers, one module per resource.
//!
//! Handlers validate payloads, enforce the caller's realm through the
//! extractors in [`crate::middleware`], and delegate the data access to
//! the models.

pub mod auth;
pub mod branches;
pub mod categories;
pub mod customers;
pub mod departments;
pub mod discounts;
pub mod employees;
pub mod health;
pub mod orders;
pub mod products;
pub mod shipments;
pub mod stores;
pub mod supplies;
pub mod users;
