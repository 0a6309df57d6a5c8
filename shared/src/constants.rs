// JWT configuration
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 60 * 8; // 8 hours
pub const JWT_CLOCK_SKEW_LEEWAY_SECS: u64 = 30;
pub const MIN_JWT_SECRET_LEN: usize = 32;

// Password hashing
pub const BCRYPT_COST: u32 = 12;

// Database connection pool
pub const DB_MAX_CONNECTIONS: u32 = 20;
pub const DB_MIN_CONNECTIONS: u32 = 5;

// Success messages
pub const SUCCESS_PASSWORD_CHANGED: &str = "Password changed successfully";

// Error messages
pub const ERROR_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const ERROR_USERNAME_ALREADY_EXISTS: &str = "Username already exists";
pub const ERROR_EMAIL_ALREADY_EXISTS: &str = "Email already exists";
pub const ERROR_CURRENT_PASSWORD_INCORRECT: &str = "Current password is incorrect";
pub const ERROR_NOT_AUTHENTICATED: &str = "Not authenticated";
pub const ERROR_INVALID_TOKEN: &str = "Invalid or expired token";
pub const ERROR_SHIPMENT_EXISTS: &str = "Shipment already exists for this order";
