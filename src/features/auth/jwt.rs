use std::time::Duration;

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};

use super::model::TokenClaims;
use crate::core::error::AppError;

/// Local signature and expiry check of provider access tokens
pub struct JwtValidator {
    decoding_key: DecodingKey,
    audience: String,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(secret: &str, audience: String, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::HS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only HS256 is allowed",
                header.alg
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{issue_token, issue_token_with, TEST_AUDIENCE, TEST_JWT_SECRET};
    use uuid::Uuid;

    fn validator() -> JwtValidator {
        JwtValidator::new(TEST_JWT_SECRET, TEST_AUDIENCE.to_string(), Duration::from_secs(0))
    }

    #[test]
    fn test_accepts_token_signed_with_shared_secret() {
        let user_id = Uuid::new_v4();
        let claims = validator().validate_token(&issue_token(user_id)).unwrap();
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn test_rejects_expired_token() {
        let token = issue_token_with(Uuid::new_v4(), TEST_JWT_SECRET, TEST_AUDIENCE, -120);
        assert!(matches!(
            validator().validate_token(&token),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn test_rejects_foreign_signature() {
        let token = issue_token_with(Uuid::new_v4(), "another-secret", TEST_AUDIENCE, 3600);
        assert!(validator().validate_token(&token).is_err());
    }

    #[test]
    fn test_rejects_wrong_audience() {
        let token = issue_token_with(Uuid::new_v4(), TEST_JWT_SECRET, "anon", 3600);
        assert!(validator().validate_token(&token).is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(validator().validate_token("not-a-jwt").is_err());
    }
}
