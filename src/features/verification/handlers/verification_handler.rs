use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::verification::dtos::{
    DecisionRequestDto, DecisionResultDto, DocumentReviewDto, PendingDocumentDto,
};
use crate::features::verification::services::VerificationService;
use crate::shared::types::{ApiResponse, Meta};

/// Pending identity documents, oldest first
#[utoipa::path(
    get,
    path = "/api/admin/verifications",
    responses(
        (status = 200, description = "Pending documents", body = ApiResponse<Vec<PendingDocumentDto>>),
        (status = 401, description = "Session rejected")
    ),
    tag = "verification",
    security(("bearer_auth" = []))
)]
pub async fn list_pending_documents(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<VerificationService>>,
) -> Result<Json<ApiResponse<Vec<PendingDocumentDto>>>> {
    let documents = service.list_pending().await?;
    let total = documents.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(documents),
        None,
        Some(Meta { total }),
    )))
}

/// Submission with signed image URLs
#[utoipa::path(
    get,
    path = "/api/admin/verifications/{id}",
    params(("id" = Uuid, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document review", body = ApiResponse<DocumentReviewDto>),
        (status = 401, description = "Session rejected"),
        (status = 404, description = "Document not found")
    ),
    tag = "verification",
    security(("bearer_auth" = []))
)]
pub async fn get_document_review(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<VerificationService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DocumentReviewDto>>> {
    let review = service.review(id).await?;
    Ok(Json(ApiResponse::success(Some(review), None, None)))
}

/// Approve or reject a submission
#[utoipa::path(
    post,
    path = "/api/admin/verifications/{id}/decision",
    params(("id" = Uuid, Path, description = "Document ID")),
    request_body = DecisionRequestDto,
    responses(
        (status = 200, description = "Decision recorded", body = ApiResponse<DecisionResultDto>),
        (status = 400, description = "Invalid decision"),
        (status = 401, description = "Session rejected"),
        (status = 404, description = "Document not found for profile")
    ),
    tag = "verification",
    security(("bearer_auth" = []))
)]
pub async fn decide_document(
    RequireAdmin(session): RequireAdmin,
    State(service): State<Arc<VerificationService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<DecisionRequestDto>,
) -> Result<Json<ApiResponse<DecisionResultDto>>> {
    tracing::info!("Admin {} deciding document {}", session.user_id, id);
    let result = service.decide(id, dto).await?;

    Ok(Json(ApiResponse::success(
        Some(result),
        Some("Decision recorded".to_string()),
        None,
    )))
}
