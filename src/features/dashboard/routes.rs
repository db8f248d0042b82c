use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::StatsService;

/// Dashboard statistics routes
pub fn routes(stats_service: Arc<StatsService>) -> Router {
    Router::new()
        .route("/api/admin/stats/overview", get(handlers::get_overview))
        .route("/api/admin/stats/counts", get(handlers::get_counts))
        .route("/api/admin/stats/history", get(handlers::get_history))
        .route(
            "/api/admin/stats/recent-users",
            get(handlers::get_recent_users),
        )
        .route(
            "/api/admin/stats/top-services",
            get(handlers::get_top_services),
        )
        .with_state(stats_service)
}
