pub mod crypto;
pub mod jwt;

pub use crypto::{hash_password, verify_password};
pub use jwt::{Claims, JwtService};
