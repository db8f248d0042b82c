use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::catalog::handlers;
use crate::features::catalog::services::CatalogService;

pub fn routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/admin/catalog", get(handlers::get_catalog))
        .route(
            "/api/admin/catalog/categories",
            post(handlers::create_category),
        )
        .route(
            "/api/admin/catalog/categories/{id}",
            delete(handlers::delete_category),
        )
        .route(
            "/api/admin/catalog/categories/{id}/services",
            post(handlers::create_service),
        )
        .route(
            "/api/admin/catalog/services/{id}",
            delete(handlers::delete_service),
        )
        .route("/api/admin/catalog/items", put(handlers::update_item))
        .with_state(service)
}
