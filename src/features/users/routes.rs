use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::users::handlers;
use crate::features::users::services::UserDirectoryService;

pub fn routes(service: Arc<UserDirectoryService>) -> Router {
    Router::new()
        .route("/api/admin/users", get(handlers::list_users))
        .route("/api/admin/users/{id}", get(handlers::get_user))
        .with_state(service)
}
