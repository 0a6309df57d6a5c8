//! Database row types and their query functions.
//!
//! Each model owns the SQL for its table and converts rows into the
//! response shapes the handlers return. Password hashes never leave
//! this layer.

pub mod branch;
pub mod category;
pub mod customer;
pub mod department;
pub mod discount;
pub mod employee;
pub mod order;
pub mod product;
pub mod shipment;
pub mod store;
pub mod supply;
pub mod user;

pub use branch::Branch;
pub use category::Category;
pub use customer::Customer;
pub use department::Department;
pub use discount::Discount;
pub use employee::Employee;
pub use order::{Order, OrderItemRow};
pub use product::{Product, ProductWithCategory};
pub use shipment::Shipment;
pub use store::Store;
pub use supply::Supply;
pub use user::User;
