use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::map::dtos::ProviderMapDto;
use crate::features::map::services::MapService;
use crate::shared::types::{ApiResponse, Meta};

/// Provider markers with their coverage circles
#[utoipa::path(
    get,
    path = "/api/admin/map/providers",
    responses(
        (status = 200, description = "Provider map", body = ApiResponse<ProviderMapDto>),
        (status = 401, description = "Session rejected")
    ),
    tag = "map",
    security(("bearer_auth" = []))
)]
pub async fn get_provider_map(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<MapService>>,
) -> Result<Json<ApiResponse<ProviderMapDto>>> {
    let map = service.provider_map().await?;
    let total = map.markers.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(map),
        None,
        Some(Meta { total }),
    )))
}
