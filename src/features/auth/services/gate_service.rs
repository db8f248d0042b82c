use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::jwt::JwtValidator;
use crate::features::auth::model::{AdminSession, ProviderSession, TokenClaims};
use crate::features::auth::provider::AuthProvider;
use crate::features::auth::session::SessionContext;
use crate::features::users::repositories::ProfileRepository;

/// Decides whether a bearer token belongs to an administrator
///
/// Every failure path fails closed and sends the caller back to the login
/// route. Tokens that pass local validation also have their provider session
/// ended on a best-effort basis.
pub struct AdminGate {
    validator: Arc<JwtValidator>,
    provider: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileRepository>,
    sessions: Arc<SessionContext>,
}

impl AdminGate {
    pub fn new(
        validator: Arc<JwtValidator>,
        provider: Arc<dyn AuthProvider>,
        profiles: Arc<dyn ProfileRepository>,
        sessions: Arc<SessionContext>,
    ) -> Self {
        Self {
            validator,
            provider,
            profiles,
            sessions,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionContext> {
        &self.sessions
    }

    /// Gate check for a request carrying `token`
    pub async fn authorize(&self, token: &str) -> Result<AdminSession> {
        let claims = match self.validator.validate_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                // Locally invalid tokens carry no live provider session
                self.sessions.invalidate(token).await;
                return Err(Self::rejection(&e));
            }
        };

        if let Some(session) = self.sessions.current(token).await {
            return Ok(session);
        }

        match self.verify_with_provider(token, &claims).await {
            Ok(session) => {
                self.sessions.init(token, session.clone()).await;
                Ok(session)
            }
            Err(e) => {
                self.end_session(token).await;
                Err(Self::rejection(&e))
            }
        }
    }

    /// Admit a freshly issued provider session (login, refresh, recovery)
    ///
    /// A non-admin account is signed out again and reported as forbidden.
    pub async fn establish(&self, issued: &ProviderSession) -> Result<AdminSession> {
        let token = issued.access_token.as_str();

        let result = match self.validator.validate_token(token) {
            Ok(claims) => {
                self.admin_session(token, issued.user.id, issued.user.email.clone(), &claims)
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(session) => {
                self.sessions.init(token, session.clone()).await;
                tracing::info!("Admin session established for {}", session.user_id);
                Ok(session)
            }
            Err(e) => {
                self.end_session(token).await;
                tracing::warn!("Refused admin session for {}: {}", issued.user.id, e);
                match e {
                    AppError::Forbidden(_) | AppError::Auth(_) => Err(e),
                    _ => Err(AppError::Forbidden(
                        "Unable to verify administrator access".to_string(),
                    )),
                }
            }
        }
    }

    /// Drop the cached session and end it at the provider, ignoring provider failures
    pub async fn end_session(&self, token: &str) {
        self.sessions.invalidate(token).await;
        if let Err(e) = self.provider.sign_out(token).await {
            tracing::warn!("Failed to sign out provider session: {}", e);
        }
    }

    async fn verify_with_provider(&self, token: &str, claims: &TokenClaims) -> Result<AdminSession> {
        let user = self.provider.get_user(token).await?;

        if user.id != claims.sub {
            return Err(AppError::Auth(
                "Token subject does not match the session user".to_string(),
            ));
        }

        let email = user.email.or_else(|| claims.email.clone());
        self.admin_session(token, user.id, email, claims).await
    }

    async fn admin_session(
        &self,
        token: &str,
        user_id: Uuid,
        email: Option<String>,
        claims: &TokenClaims,
    ) -> Result<AdminSession> {
        let profile = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Administrator access required".to_string()))?;

        if !profile.is_admin {
            return Err(AppError::Forbidden(
                "Administrator access required".to_string(),
            ));
        }

        Ok(AdminSession {
            user_id,
            email: email.or(profile.email),
            full_name: profile.full_name,
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now),
            access_token: token.to_string(),
        })
    }

    fn rejection(cause: &AppError) -> AppError {
        let reason = match cause {
            AppError::Auth(msg) | AppError::Forbidden(msg) => msg.clone(),
            other => {
                tracing::error!("Admin gate check failed: {}", other);
                "Unable to verify session".to_string()
            }
        };

        tracing::warn!("Admin gate rejected session: {}", reason);
        AppError::SessionRejected(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{
        issue_token, issue_token_with, InMemoryBackend, TEST_AUDIENCE, TEST_JWT_SECRET,
    };

    #[tokio::test]
    async fn test_admin_passes_and_is_cached() {
        let backend = InMemoryBackend::new();
        let admin = backend.add_admin("ops@example.com");
        let token = backend.start_session(admin.id);
        let gate = backend.gate();

        let session = gate.authorize(&token).await.unwrap();
        assert_eq!(session.user_id, admin.id);
        assert_eq!(backend.get_user_calls(), 1);

        // Second request is served from the session context
        gate.authorize(&token).await.unwrap();
        assert_eq!(backend.get_user_calls(), 1);
    }

    #[tokio::test]
    async fn test_non_admin_is_rejected_and_signed_out() {
        let backend = InMemoryBackend::new();
        let client = backend.add_profile(crate::features::users::models::UserRole::Client);
        let token = backend.start_session(client.id);
        let gate = backend.gate();

        let err = gate.authorize(&token).await.unwrap_err();
        assert!(matches!(err, AppError::SessionRejected(_)));
        assert!(backend.was_signed_out(&token));
    }

    #[tokio::test]
    async fn test_unknown_profile_is_rejected() {
        let backend = InMemoryBackend::new();
        let token = backend.start_session(Uuid::new_v4());

        let err = backend.gate().authorize(&token).await.unwrap_err();
        assert!(matches!(err, AppError::SessionRejected(_)));
    }

    #[tokio::test]
    async fn test_token_unknown_to_provider_is_rejected() {
        let backend = InMemoryBackend::new();
        let admin = backend.add_admin("ops@example.com");
        // Signed correctly but never issued by the provider
        let token = issue_token(admin.id);

        let err = backend.gate().authorize(&token).await.unwrap_err();
        assert!(matches!(err, AppError::SessionRejected(_)));
    }

    #[tokio::test]
    async fn test_invalid_token_never_reaches_provider() {
        let backend = InMemoryBackend::new();

        let err = backend.gate().authorize("garbage").await.unwrap_err();
        assert!(matches!(err, AppError::SessionRejected(_)));
        assert_eq!(backend.get_user_calls(), 0);
        assert!(!backend.was_signed_out("garbage"));
    }

    #[tokio::test]
    async fn test_expired_token_is_not_signed_out_at_provider() {
        let backend = InMemoryBackend::new();
        let admin = backend.add_admin("ops@example.com");
        let token = issue_token_with(admin.id, TEST_JWT_SECRET, TEST_AUDIENCE, -3600);

        let err = backend.gate().authorize(&token).await.unwrap_err();
        assert!(matches!(err, AppError::SessionRejected(_)));
        assert!(!backend.was_signed_out(&token));
    }

    #[tokio::test]
    async fn test_store_failure_fails_closed() {
        let backend = InMemoryBackend::new();
        let admin = backend.add_admin("ops@example.com");
        let token = backend.start_session(admin.id);
        backend.fail_reads(true);

        let err = backend.gate().authorize(&token).await.unwrap_err();
        assert!(matches!(err, AppError::SessionRejected(msg) if msg == "Unable to verify session"));
    }

    #[tokio::test]
    async fn test_revoked_admin_is_rejected_on_recheck() {
        let backend = InMemoryBackend::new();
        let admin = backend.add_admin("ops@example.com");
        let token = backend.start_session(admin.id);
        // Recheck on every request
        let gate = backend.gate_with_recheck(std::time::Duration::ZERO);

        gate.authorize(&token).await.unwrap();
        backend.set_admin(admin.id, false);

        assert!(gate.authorize(&token).await.is_err());
        assert_eq!(backend.sessions().len().await, 0);
    }

    #[tokio::test]
    async fn test_establish_refuses_non_admin() {
        let backend = InMemoryBackend::new();
        let provider = backend.add_profile(crate::features::users::models::UserRole::Provider);
        let token = backend.start_session(provider.id);
        let issued = backend.provider_session(&token, provider.id);

        let err = backend.gate().establish(&issued).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(backend.was_signed_out(&token));
    }
}
