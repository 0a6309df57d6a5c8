use sqlx::PgPool;

use acme_store_shared::constants::{ERROR_CURRENT_PASSWORD_INCORRECT, ERROR_INVALID_CREDENTIALS};
use acme_store_shared::dto::{ChangePasswordRequest, LoginRequest, TokenResponse};
use acme_store_shared::types::Realm;

use crate::error::AppError;
use crate::models::{Customer, User};
use crate::utils::crypto::{hash_password, verify_password};
use crate::utils::jwt::JwtService;

/// Login and password management for both account realms.
///
/// Staff accounts and customer accounts live in separate tables and get
/// tokens tagged with their realm, so a token from one realm never
/// grants access to the other.
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    jwt_service: JwtService,
    dummy_hash: String,
}

impl AuthService {
    pub fn new(pool: PgPool, jwt_service: JwtService) -> Result<Self, AppError> {
        // Hashed once at startup so logins with an unknown username still
        // pay a full bcrypt verification below.
        let dummy_hash = hash_password("not-a-real-password")?;

        Ok(Self {
            pool,
            jwt_service,
            dummy_hash,
        })
    }

    /// Authenticate a staff account and issue an admin-realm token
    pub async fn login_admin(&self, request: &LoginRequest) -> Result<TokenResponse, AppError> {
        let user = User::find_by_username(&self.pool, &request.username).await?;

        let verified = self.check_credentials(
            user.as_ref().map(|u| u.password_hash.as_str()),
            &request.password,
        )?;

        let user = match user {
            Some(user) if verified => user,
            _ => return Err(AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string())),
        };

        let access_token = self.jwt_service.issue_token(user.id, &user.role, Realm::Admin)?;

        tracing::info!(user_id = user.id, "staff login");

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            role: user.role.clone(),
            user_id: user.id,
            username: user.username,
        })
    }

    /// Authenticate a customer account and issue a customer-realm token
    pub async fn login_customer(&self, request: &LoginRequest) -> Result<TokenResponse, AppError> {
        let customer = Customer::find_by_username(&self.pool, &request.username).await?;

        let verified = self.check_credentials(
            customer.as_ref().map(|c| c.password_hash.as_str()),
            &request.password,
        )?;

        let customer = match customer {
            Some(customer) if verified => customer,
            _ => return Err(AppError::Authentication(ERROR_INVALID_CREDENTIALS.to_string())),
        };

        let access_token = self
            .jwt_service
            .issue_token(customer.id, "customer", Realm::Customer)?;

        tracing::info!(customer_id = customer.id, "customer login");

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            role: "customer".to_string(),
            user_id: customer.id,
            username: customer.username,
        })
    }

    /// Change a staff account's password after verifying the current one
    pub async fn change_user_password(
        &self,
        user_id: i32,
        request: &ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let user = User::find_by_id(&self.pool, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify_password(&request.current_password, &user.password_hash)? {
            return Err(AppError::Validation(
                ERROR_CURRENT_PASSWORD_INCORRECT.to_string(),
            ));
        }

        let password_hash = hash_password(&request.new_password)?;
        User::update_password(&self.pool, user_id, &password_hash).await?;

        Ok(())
    }

    /// Change a customer account's password after verifying the current one
    pub async fn change_customer_password(
        &self,
        customer_id: i32,
        request: &ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let customer = Customer::find_by_id(&self.pool, customer_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Customer not found".to_string()))?;

        if !verify_password(&request.current_password, &customer.password_hash)? {
            return Err(AppError::Validation(
                ERROR_CURRENT_PASSWORD_INCORRECT.to_string(),
            ));
        }

        let password_hash = hash_password(&request.new_password)?;
        Customer::update_password(&self.pool, customer_id, &password_hash).await?;

        Ok(())
    }

    /// Verify a password against the stored hash, or against the dummy
    /// hash when the account does not exist. Both paths run bcrypt, so
    /// response timing does not reveal which usernames are taken.
    fn check_credentials(
        &self,
        stored_hash: Option<&str>,
        password: &str,
    ) -> Result<bool, AppError> {
        match stored_hash {
            Some(hash) => verify_password(password, hash),
            None => {
                verify_password(password, &self.dummy_hash)?;
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;
    use std::time::{Duration, Instant};

    fn test_service() -> AuthService {
        // connect_lazy never opens a connection, which is all these
        // tests need since check_credentials is pure bcrypt.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/acme_store_test")
            .unwrap();
        let jwt_service = JwtService::new("test-secret-key-for-testing-only-1234", 480);
        AuthService::new(pool, jwt_service).unwrap()
    }

    #[tokio::test]
    async fn test_correct_password_is_accepted() {
        let service = test_service();
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(service
            .check_credentials(Some(&hash), "hunter2hunter2")
            .unwrap());
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let service = test_service();
        let hash = hash_password("hunter2hunter2").unwrap();
        assert!(!service.check_credentials(Some(&hash), "wrong").unwrap());
    }

    #[tokio::test]
    async fn test_unknown_account_is_rejected() {
        let service = test_service();
        assert!(!service.check_credentials(None, "anything").unwrap());
    }

    #[tokio::test]
    async fn test_unknown_account_still_pays_the_hash_cost() {
        let service = test_service();

        let start = Instant::now();
        let verified = service.check_credentials(None, "anything").unwrap();
        let elapsed = start.elapsed();

        assert!(!verified);
        // A bcrypt verification at cost 12 takes well over 10ms on any
        // hardware; an early return would finish in microseconds.
        assert!(elapsed > Duration::from_millis(10));
    }
}
