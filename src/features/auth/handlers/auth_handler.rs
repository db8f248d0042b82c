use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::core::middleware::bearer_token;
use crate::features::auth::dtos::{
    AdminSessionDto, AuthResponseDto, LoginRequestDto, PasswordRecoveryRequestDto,
    RefreshTokenRequestDto, UpdatePasswordDto, VerifyRecoveryCodeDto,
};
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account is not an administrator")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let auth_response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(auth_response), None, None)))
}

/// Refresh access token using refresh token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshTokenRequestDto,
    responses(
        (status = 200, description = "Token refreshed successfully", body = ApiResponse<AuthResponseDto>),
        (status = 401, description = "Invalid or expired refresh token"),
        (status = 403, description = "Account is no longer an administrator")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    State(service): State<Arc<AuthService>>,
    headers: HeaderMap,
    AppJson(dto): AppJson<RefreshTokenRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.refresh(dto, bearer_token(&headers)).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Send a password recovery code by email
#[utoipa::path(
    post,
    path = "/api/auth/password/recover",
    request_body = PasswordRecoveryRequestDto,
    responses(
        (status = 200, description = "Recovery code sent"),
        (status = 400, description = "Validation error")
    ),
    tag = "auth"
)]
pub async fn request_password_reset(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<PasswordRecoveryRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.request_password_reset(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Recovery code sent".to_string()),
        None,
    )))
}

/// Redeem a recovery code for an admin session
#[utoipa::path(
    post,
    path = "/api/auth/password/verify",
    request_body = VerifyRecoveryCodeDto,
    responses(
        (status = 200, description = "Code accepted", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid or expired code"),
        (status = 403, description = "Account is not an administrator")
    ),
    tag = "auth"
)]
pub async fn verify_recovery_code(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<VerifyRecoveryCodeDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.verify_recovery_code(dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Set a new password for the signed-in administrator
#[utoipa::path(
    put,
    path = "/api/auth/password",
    request_body = UpdatePasswordDto,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Session rejected")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_password(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<UpdatePasswordDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.update_password(&session, dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Password updated".to_string()),
        None,
    )))
}

/// Current admin session
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session is valid", body = ApiResponse<AdminSessionDto>),
        (status = 401, description = "Session rejected")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_session(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<AdminSessionDto>>> {
    Ok(Json(ApiResponse::success(
        Some(service.current(session)),
        None,
        None,
    )))
}

/// End the current admin session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Session rejected")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<()>>> {
    service.logout(session).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Logged out".to_string()),
        None,
    )))
}
