use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::dtos::{
    AdminSessionDto, AuthResponseDto, LoginRequestDto, PasswordRecoveryRequestDto,
    RefreshTokenRequestDto, UpdatePasswordDto, VerifyRecoveryCodeDto,
};
use crate::features::auth::model::AdminSession;
use crate::features::auth::provider::AuthProvider;
use crate::features::auth::services::AdminGate;

/// Operator authentication flows layered over the provider and the admin gate
pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    gate: Arc<AdminGate>,
}

impl AuthService {
    pub fn new(provider: Arc<dyn AuthProvider>, gate: Arc<AdminGate>) -> Self {
        Self { provider, gate }
    }

    /// Login with email and password; only administrators get a session
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let issued = self
            .provider
            .sign_in_with_password(dto.email.trim(), &dto.password)
            .await?;

        let admin = self.gate.establish(&issued).await?;
        Ok(AuthResponseDto::new(issued, admin))
    }

    /// Exchange a refresh token, dropping the previous access token if one was presented
    pub async fn refresh(
        &self,
        dto: RefreshTokenRequestDto,
        previous_token: Option<&str>,
    ) -> Result<AuthResponseDto> {
        let issued = self.provider.refresh_session(&dto.refresh_token).await?;

        if let Some(previous) = previous_token {
            self.gate.sessions().invalidate(previous).await;
        }

        let admin = self.gate.establish(&issued).await?;
        Ok(AuthResponseDto::new(issued, admin))
    }

    pub async fn logout(&self, session: AdminSession) -> Result<()> {
        self.gate.end_session(&session.access_token).await;
        tracing::info!("Admin {} logged out", session.user_id);
        Ok(())
    }

    pub fn current(&self, session: AdminSession) -> AdminSessionDto {
        session.into()
    }

    pub async fn request_password_reset(&self, dto: PasswordRecoveryRequestDto) -> Result<()> {
        self.provider.request_password_reset(dto.email.trim()).await
    }

    /// Trade a recovery code for an admin session so the password can be changed
    pub async fn verify_recovery_code(&self, dto: VerifyRecoveryCodeDto) -> Result<AuthResponseDto> {
        let issued = self
            .provider
            .verify_recovery_code(dto.email.trim(), &dto.code)
            .await?;

        let admin = self.gate.establish(&issued).await?;
        Ok(AuthResponseDto::new(issued, admin))
    }

    pub async fn update_password(&self, session: &AdminSession, dto: UpdatePasswordDto) -> Result<()> {
        self.provider
            .update_password(&session.access_token, &dto.password)
            .await?;
        tracing::info!("Admin {} changed their password", session.user_id);
        Ok(())
    }
}
