use axum::{extract::Query, Json};

use crate::features::auth::guards::RequireAdmin;
use crate::features::navigation::dtos::{NavigationDto, NavigationQuery};
use crate::features::navigation::services::navigation;
use crate::shared::types::ApiResponse;

/// Sidebar navigation for the admin shell
#[utoipa::path(
    get,
    path = "/api/admin/navigation",
    params(NavigationQuery),
    responses(
        (status = 200, description = "Navigation tree", body = ApiResponse<NavigationDto>),
        (status = 401, description = "Session rejected")
    ),
    tag = "navigation",
    security(("bearer_auth" = []))
)]
pub async fn get_navigation(
    RequireAdmin(_session): RequireAdmin,
    Query(query): Query<NavigationQuery>,
) -> Json<ApiResponse<NavigationDto>> {
    let nav = navigation(query.path.as_deref());
    Json(ApiResponse::success(Some(nav), None, None))
}
