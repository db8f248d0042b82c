//! Authorization guard for admin-only handlers.
//!
//! The admin gate middleware resolves the session once per request; handlers
//! behind it take `RequireAdmin` to receive the session it admitted.

use crate::core::error::AppError;
use crate::features::auth::model::AdminSession;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for handlers that must run on behalf of an administrator.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(session): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AdminSession);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<AdminSession>()
            .ok_or_else(|| AppError::SessionRejected("Admin session required".to_string()))?;

        Ok(RequireAdmin(session.clone()))
    }
}
