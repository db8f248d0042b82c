use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::AppError;
use crate::features::auth::guards::RequireAdmin;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::services::StatsService;
use crate::features::users::dtos::UserSummaryDto;
use crate::shared::types::{ApiResponse, Meta};

/// Dashboard home in one call
#[utoipa::path(
    get,
    path = "/api/admin/stats/overview",
    tag = "stats",
    params(HistoryQueryParams),
    responses(
        (status = 200, description = "Dashboard overview", body = ApiResponse<DashboardOverviewDto>),
        (status = 400, description = "Invalid date range"),
        (status = 401, description = "Session rejected")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_overview(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<StatsService>>,
    Query(params): Query<HistoryQueryParams>,
) -> Result<Json<ApiResponse<DashboardOverviewDto>>, AppError> {
    let overview = service.overview(&params).await?;
    Ok(Json(ApiResponse::success(Some(overview), None, None)))
}

/// Client, provider, category and service counts
#[utoipa::path(
    get,
    path = "/api/admin/stats/counts",
    tag = "stats",
    responses(
        (status = 200, description = "Headline counts", body = ApiResponse<DashboardCountsDto>),
        (status = 401, description = "Session rejected")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_counts(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<StatsService>>,
) -> Result<Json<ApiResponse<DashboardCountsDto>>, AppError> {
    let counts = service.counts().await?;
    Ok(Json(ApiResponse::success(Some(counts), None, None)))
}

/// Daily client and provider registrations
#[utoipa::path(
    get,
    path = "/api/admin/stats/history",
    tag = "stats",
    params(HistoryQueryParams),
    responses(
        (status = 200, description = "Registration history", body = ApiResponse<RegistrationHistoryDto>),
        (status = 400, description = "Invalid date range"),
        (status = 401, description = "Session rejected")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_history(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<StatsService>>,
    Query(params): Query<HistoryQueryParams>,
) -> Result<Json<ApiResponse<RegistrationHistoryDto>>, AppError> {
    let history = service.history(&params).await?;
    Ok(Json(ApiResponse::success(Some(history), None, None)))
}

/// Newest profiles of any role
#[utoipa::path(
    get,
    path = "/api/admin/stats/recent-users",
    tag = "stats",
    params(RecentUsersQueryParams),
    responses(
        (status = 200, description = "Recent users", body = ApiResponse<Vec<UserSummaryDto>>),
        (status = 401, description = "Session rejected")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_recent_users(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<StatsService>>,
    Query(params): Query<RecentUsersQueryParams>,
) -> Result<Json<ApiResponse<Vec<UserSummaryDto>>>, AppError> {
    let users = service.recent_users(params.limit).await?;
    let total = users.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(users),
        None,
        Some(Meta { total }),
    )))
}

/// Services ranked by offers and bookings
#[utoipa::path(
    get,
    path = "/api/admin/stats/top-services",
    tag = "stats",
    responses(
        (status = 200, description = "Top services", body = ApiResponse<Vec<TopServiceDto>>),
        (status = 401, description = "Session rejected")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_top_services(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<StatsService>>,
) -> Result<Json<ApiResponse<Vec<TopServiceDto>>>, AppError> {
    let services = service.top_services().await?;
    Ok(Json(ApiResponse::success(Some(services), None, None)))
}
