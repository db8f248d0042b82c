use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::map::handlers;
use crate::features::map::services::MapService;

pub fn routes(service: Arc<MapService>) -> Router {
    Router::new()
        .route("/api/admin/map/providers", get(handlers::get_provider_map))
        .with_state(service)
}
