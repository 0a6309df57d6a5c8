use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use acme_store_shared::constants::JWT_CLOCK_SKEW_LEEWAY_SECS;
use acme_store_shared::types::Realm;

use crate::error::AppError;

/// Bearer token claims.
///
/// `sub` carries the principal id of the realm named by `type`: a staff
/// user id for the admin realm, a customer id for the customer realm.
/// The two id spaces overlap, so the realm tag is what keeps a customer
/// token from ever resolving to a staff account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    #[serde(rename = "type")]
    pub realm: Realm,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    pub fn principal_id(&self) -> Result<i32, AppError> {
        self.sub
            .parse::<i32>()
            .map_err(|_| AppError::Authentication("Invalid subject in token".to_string()))
    }
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, expire_minutes: i64) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub", "iat", "jti"]);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = JWT_CLOCK_SKEW_LEEWAY_SECS;

        Self {
            encoding_key,
            decoding_key,
            validation,
            token_ttl: Duration::minutes(expire_minutes),
        }
    }

    /// Issue a signed access token for one principal in one realm.
    pub fn issue_token(
        &self,
        principal_id: i32,
        role: &str,
        realm: Realm,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = now + self.token_ttl;

        let claims = Claims {
            sub: principal_id.to_string(),
            role: role.to_string(),
            realm,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to encode JWT: {}", e)))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Authentication("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AppError::Authentication("Invalid token".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::Authentication("Invalid token signature".to_string())
                }
                _ => AppError::Authentication(format!("Token validation failed: {}", e)),
            },
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-testing-only-1234";

    fn jwt_service() -> JwtService {
        JwtService::new(TEST_SECRET, 480)
    }

    #[test]
    fn test_token_round_trip() {
        let service = jwt_service();

        let token = service
            .issue_token(42, "admin", Realm::Admin)
            .expect("Failed to issue token");
        let claims = service
            .validate_token(&token)
            .expect("Failed to validate token");

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.principal_id().unwrap(), 42);
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.realm, Realm::Admin);
        assert!(!claims.jti.is_empty());
        assert_eq!(claims.exp - claims.iat, 480 * 60);
    }

    #[test]
    fn test_customer_tokens_carry_their_realm() {
        let service = jwt_service();

        let token = service
            .issue_token(7, "customer", Realm::Customer)
            .expect("Failed to issue token");
        let claims = service
            .validate_token(&token)
            .expect("Failed to validate token");

        assert_eq!(claims.realm, Realm::Customer);
        assert_eq!(claims.principal_id().unwrap(), 7);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = jwt_service();

        // Back-dated well past the 30 second clock skew leeway.
        let now = Utc::now();
        let claims = Claims {
            sub: "1".to_string(),
            role: "admin".to_string(),
            realm: Realm::Admin,
            exp: (now - Duration::minutes(5)).timestamp(),
            iat: (now - Duration::hours(1)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .expect("Failed to encode token");

        let result = service.validate_token(&token);
        assert!(
            matches!(result, Err(AppError::Authentication(ref msg)) if msg == "Token has expired")
        );
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let issuing = JwtService::new("another-secret-key-of-sufficient-len", 480);
        let validating = jwt_service();

        let token = issuing
            .issue_token(1, "admin", Realm::Admin)
            .expect("Failed to issue token");

        assert!(matches!(
            validating.validate_token(&token),
            Err(AppError::Authentication(_))
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let result = jwt_service().validate_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::Authentication(_))));
    }
}
