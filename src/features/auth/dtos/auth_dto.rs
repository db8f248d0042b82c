use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::auth::model::{AdminSession, ProviderSession};
use crate::shared::validation::RECOVERY_CODE_REGEX;

/// Request DTO for operator login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Request DTO for token refresh
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RefreshTokenRequestDto {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Request DTO for starting a password recovery
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct PasswordRecoveryRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Request DTO for redeeming an emailed recovery code
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct VerifyRecoveryCodeDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(regex(path = *RECOVERY_CODE_REGEX, message = "Recovery code must be 6 digits"))]
    pub code: String,
}

/// Request DTO for setting a new password
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordDto {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Administrator identity attached to a gated session
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminSessionDto {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl From<AdminSession> for AdminSessionDto {
    fn from(s: AdminSession) -> Self {
        Self {
            user_id: s.user_id,
            email: s.email,
            full_name: s.full_name,
            expires_at: s.expires_at,
        }
    }
}

/// Response DTO for login, refresh and recovery
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    pub access_token: String,
    /// Token type (always "bearer")
    pub token_type: String,
    /// Token expiry time in seconds
    pub expires_in: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub admin: AdminSessionDto,
}

impl AuthResponseDto {
    pub fn new(issued: ProviderSession, admin: AdminSession) -> Self {
        Self {
            access_token: issued.access_token,
            token_type: issued.token_type,
            expires_in: issued.expires_in,
            refresh_token: issued.refresh_token,
            admin: admin.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_code_must_be_six_digits() {
        let dto = VerifyRecoveryCodeDto {
            email: "ops@example.com".to_string(),
            code: "12345".to_string(),
        };
        assert!(dto.validate().is_err());

        let dto = VerifyRecoveryCodeDto {
            email: "ops@example.com".to_string(),
            code: "123456".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_login_requires_email_format() {
        let dto = LoginRequestDto {
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
