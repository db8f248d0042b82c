use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::catalog::dtos::{
    CatalogQuery, CatalogViewDto, CreateCategoryDto, CreateServiceDto, DeleteCatalogItemQuery,
    EditTargetDto,
};
use crate::features::catalog::models::EditTarget;
use crate::features::catalog::services::CatalogService;
use crate::shared::types::ApiResponse;

/// Categories plus the services of the selected category
#[utoipa::path(
    get,
    path = "/api/admin/catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Catalog view", body = ApiResponse<CatalogViewDto>),
        (status = 401, description = "Session rejected")
    ),
    tag = "catalog",
    security(("bearer_auth" = []))
)]
pub async fn get_catalog(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<CatalogService>>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<ApiResponse<CatalogViewDto>>> {
    let view = service.view(query.selected_category_id).await?;
    Ok(Json(ApiResponse::success(Some(view), None, None)))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/admin/catalog/categories",
    params(CatalogQuery),
    request_body = CreateCategoryDto,
    responses(
        (status = 201, description = "Category created", body = ApiResponse<CatalogViewDto>),
        (status = 400, description = "Name is required"),
        (status = 401, description = "Session rejected")
    ),
    tag = "catalog",
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<CatalogService>>,
    Query(query): Query<CatalogQuery>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<CatalogViewDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let view = service
        .create_category(dto, query.selected_category_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(view),
            Some("Category created".to_string()),
            None,
        )),
    ))
}

/// Create a service under a category
#[utoipa::path(
    post,
    path = "/api/admin/catalog/categories/{id}/services",
    params(
        ("id" = Uuid, Path, description = "Category ID")
    ),
    request_body = CreateServiceDto,
    responses(
        (status = 201, description = "Service created", body = ApiResponse<CatalogViewDto>),
        (status = 400, description = "Name is required"),
        (status = 401, description = "Session rejected"),
        (status = 404, description = "Category not found")
    ),
    tag = "catalog",
    security(("bearer_auth" = []))
)]
pub async fn create_service(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<CatalogService>>,
    Path(category_id): Path<Uuid>,
    AppJson(dto): AppJson<CreateServiceDto>,
) -> Result<(StatusCode, Json<ApiResponse<CatalogViewDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let view = service.create_service(category_id, dto).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(view),
            Some("Service created".to_string()),
            None,
        )),
    ))
}

/// Update the name and description of a category or service
#[utoipa::path(
    put,
    path = "/api/admin/catalog/items",
    params(CatalogQuery),
    request_body = EditTargetDto,
    responses(
        (status = 200, description = "Item updated", body = ApiResponse<CatalogViewDto>),
        (status = 400, description = "Name is required"),
        (status = 401, description = "Session rejected"),
        (status = 404, description = "Item not found")
    ),
    tag = "catalog",
    security(("bearer_auth" = []))
)]
pub async fn update_item(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<CatalogService>>,
    Query(query): Query<CatalogQuery>,
    AppJson(dto): AppJson<EditTargetDto>,
) -> Result<Json<ApiResponse<CatalogViewDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let target = EditTarget::from(dto);
    let view = service
        .update_item(target, query.selected_category_id)
        .await?;

    Ok(Json(ApiResponse::success(Some(view), None, None)))
}

/// Delete a category without services
#[utoipa::path(
    delete,
    path = "/api/admin/catalog/categories/{id}",
    params(
        ("id" = Uuid, Path, description = "Category ID"),
        DeleteCatalogItemQuery
    ),
    responses(
        (status = 200, description = "Category deleted", body = ApiResponse<CatalogViewDto>),
        (status = 400, description = "Deletion not confirmed"),
        (status = 401, description = "Session rejected"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still has services")
    ),
    tag = "catalog",
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteCatalogItemQuery>,
) -> Result<Json<ApiResponse<CatalogViewDto>>> {
    let view = service
        .delete_category(id, query.confirm, query.selected_category_id)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(view),
        Some("Category deleted".to_string()),
        None,
    )))
}

/// Delete a service
#[utoipa::path(
    delete,
    path = "/api/admin/catalog/services/{id}",
    params(
        ("id" = Uuid, Path, description = "Service ID"),
        DeleteCatalogItemQuery
    ),
    responses(
        (status = 200, description = "Service deleted", body = ApiResponse<CatalogViewDto>),
        (status = 400, description = "Deletion not confirmed"),
        (status = 401, description = "Session rejected"),
        (status = 404, description = "Service not found")
    ),
    tag = "catalog",
    security(("bearer_auth" = []))
)]
pub async fn delete_service(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
    Query(query): Query<DeleteCatalogItemQuery>,
) -> Result<Json<ApiResponse<CatalogViewDto>>> {
    let view = service
        .delete_service(id, query.confirm, query.selected_category_id)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(view),
        Some("Service deleted".to_string()),
        None,
    )))
}
