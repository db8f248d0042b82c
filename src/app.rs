//! HTTP surface: public auth routes plus everything behind the admin gate.

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, Router};

use crate::core::middleware;
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::{AdminGate, AuthService};
use crate::features::catalog::{routes as catalog_routes, CatalogService};
use crate::features::dashboard::{routes as stats_routes, StatsService};
use crate::features::map::{routes as map_routes, MapService};
use crate::features::navigation::routes as navigation_routes;
use crate::features::users::{routes as users_routes, UserDirectoryService};
use crate::features::verification::{routes as verification_routes, VerificationService};

/// Services shared by the route handlers
#[derive(Clone)]
pub struct AppServices {
    pub gate: Arc<AdminGate>,
    pub auth: Arc<AuthService>,
    pub stats: Arc<StatsService>,
    pub catalog: Arc<CatalogService>,
    pub users: Arc<UserDirectoryService>,
    pub map: Arc<MapService>,
    pub verification: Arc<VerificationService>,
}

pub fn api_router(services: AppServices) -> Router {
    // Every route merged here passes the admin gate first
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&services.auth)))
        .merge(stats_routes::routes(services.stats))
        .merge(catalog_routes::routes(services.catalog))
        .merge(users_routes::routes(services.users))
        .merge(map_routes::routes(services.map))
        .merge(verification_routes::routes(services.verification))
        .merge(navigation_routes::routes())
        .route_layer(from_fn_with_state(
            services.gate,
            middleware::admin_gate_middleware,
        ));

    let public_routes = Router::new().merge(auth_routes::public_routes(services.auth));

    Router::new().merge(protected_routes).merge(public_routes)
}
