use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no session required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/refresh", post(handlers::refresh_token))
        .route(
            "/api/auth/password/recover",
            post(handlers::request_password_reset),
        )
        .route(
            "/api/auth/password/verify",
            post(handlers::verify_recovery_code),
        )
        .with_state(service)
}

/// Auth routes behind the admin gate
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/session", get(handlers::get_session))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/password", put(handlers::update_password))
        .with_state(service)
}
