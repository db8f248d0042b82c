use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::catalog::{dtos as catalog_dtos, handlers as catalog_handlers};
use crate::features::dashboard::{dtos as stats_dtos, handlers as stats_handlers};
use crate::features::map::{dtos as map_dtos, handlers as map_handlers};
use crate::features::navigation::{dtos as navigation_dtos, handlers as navigation_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers, models as users_models};
use crate::features::verification::{
    dtos as verification_dtos, handlers as verification_handlers,
    models as verification_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::refresh_token,
        auth_handlers::request_password_reset,
        auth_handlers::verify_recovery_code,
        auth_handlers::update_password,
        auth_handlers::get_session,
        auth_handlers::logout,
        // Stats
        stats_handlers::get_overview,
        stats_handlers::get_counts,
        stats_handlers::get_history,
        stats_handlers::get_recent_users,
        stats_handlers::get_top_services,
        // Catalog
        catalog_handlers::get_catalog,
        catalog_handlers::create_category,
        catalog_handlers::create_service,
        catalog_handlers::update_item,
        catalog_handlers::delete_category,
        catalog_handlers::delete_service,
        // Users
        users_handlers::list_users,
        users_handlers::get_user,
        // Map
        map_handlers::get_provider_map,
        // Verification
        verification_handlers::list_pending_documents,
        verification_handlers::get_document_review,
        verification_handlers::decide_document,
        // Navigation
        navigation_handlers::get_navigation,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::RefreshTokenRequestDto,
            auth_dtos::PasswordRecoveryRequestDto,
            auth_dtos::VerifyRecoveryCodeDto,
            auth_dtos::UpdatePasswordDto,
            auth_dtos::AdminSessionDto,
            auth_dtos::AuthResponseDto,
            ApiResponse<auth_dtos::AuthResponseDto>,
            ApiResponse<auth_dtos::AdminSessionDto>,
            // Stats
            stats_dtos::DashboardCountsDto,
            stats_dtos::RegistrationPointDto,
            stats_dtos::RegistrationHistoryDto,
            stats_dtos::TopServiceDto,
            stats_dtos::DashboardOverviewDto,
            ApiResponse<stats_dtos::DashboardOverviewDto>,
            ApiResponse<stats_dtos::DashboardCountsDto>,
            ApiResponse<stats_dtos::RegistrationHistoryDto>,
            ApiResponse<Vec<stats_dtos::TopServiceDto>>,
            // Catalog
            catalog_dtos::CreateCategoryDto,
            catalog_dtos::CreateServiceDto,
            catalog_dtos::CatalogItemEditDto,
            catalog_dtos::EditTargetDto,
            catalog_dtos::CategoryDto,
            catalog_dtos::ServiceDto,
            catalog_dtos::CatalogViewDto,
            ApiResponse<catalog_dtos::CatalogViewDto>,
            // Users
            users_models::UserRole,
            users_models::VerificationStatus,
            users_dtos::UserSummaryDto,
            users_dtos::GeoPointDto,
            users_dtos::ProfileDetailDto,
            ApiResponse<Vec<users_dtos::UserSummaryDto>>,
            ApiResponse<users_dtos::ProfileDetailDto>,
            // Map
            map_dtos::LatLngDto,
            map_dtos::MapViewportDto,
            map_dtos::TileLayerDto,
            map_dtos::CoverageStyleDto,
            map_dtos::CoverageCircleDto,
            map_dtos::ProviderMarkerDto,
            map_dtos::ProviderMapDto,
            ApiResponse<map_dtos::ProviderMapDto>,
            // Verification
            verification_models::DecisionStatus,
            verification_dtos::PendingDocumentDto,
            verification_dtos::SignedDocumentUrls,
            verification_dtos::DocumentReviewDto,
            verification_dtos::DecisionRequestDto,
            verification_dtos::DecisionResultDto,
            ApiResponse<Vec<verification_dtos::PendingDocumentDto>>,
            ApiResponse<verification_dtos::DocumentReviewDto>,
            ApiResponse<verification_dtos::DecisionResultDto>,
            // Navigation
            navigation_dtos::NavigationItemDto,
            navigation_dtos::NavigationDto,
            ApiResponse<navigation_dtos::NavigationDto>,
        )
    ),
    tags(
        (name = "auth", description = "Operator login, password recovery and session"),
        (name = "stats", description = "Dashboard counts, registration history and rankings"),
        (name = "catalog", description = "Service categories and services"),
        (name = "users", description = "Client and provider directory"),
        (name = "map", description = "Provider locations and coverage"),
        (name = "verification", description = "Provider identity document review"),
        (name = "navigation", description = "Admin shell navigation"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Marketplace Admin API",
        version = "0.1.0",
        description = "Administrative API for the services marketplace",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
