use axum::{routing::get, Router};

use crate::features::navigation::handlers;

pub fn routes() -> Router {
    Router::new().route("/api/admin/navigation", get(handlers::get_navigation))
}
