use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::verification::handlers;
use crate::features::verification::services::VerificationService;

pub fn routes(verification_service: Arc<VerificationService>) -> Router {
    Router::new()
        .route(
            "/api/admin/verifications",
            get(handlers::list_pending_documents),
        )
        .route(
            "/api/admin/verifications/{id}",
            get(handlers::get_document_review),
        )
        .route(
            "/api/admin/verifications/{id}/decision",
            post(handlers::decide_document),
        )
        .with_state(verification_service)
}
