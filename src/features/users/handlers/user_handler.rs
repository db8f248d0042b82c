use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::users::dtos::{ListUsersQuery, ProfileDetailDto, UserSummaryDto};
use crate::features::users::services::UserDirectoryService;
use crate::shared::types::{ApiResponse, Meta};

/// List the most recent users, optionally by role
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Users retrieved", body = ApiResponse<Vec<UserSummaryDto>>),
        (status = 401, description = "Session rejected")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<UserDirectoryService>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ApiResponse<Vec<UserSummaryDto>>>> {
    let users = service.list(query.role, query.limit).await?;
    let total = users.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(users),
        None,
        Some(Meta { total }),
    )))
}

/// Get a single profile with display placeholders
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile ID")
    ),
    responses(
        (status = 200, description = "Profile found", body = ApiResponse<ProfileDetailDto>),
        (status = 401, description = "Session rejected"),
        (status = 404, description = "Profile not found")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<UserDirectoryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ProfileDetailDto>>> {
    let profile = service.detail(id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}
