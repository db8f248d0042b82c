use sqlx::FromRow;
use uuid::Uuid;

/// Row of the `admin_map_providers` projection
///
/// Exposes only public display fields and the provider's coordinates.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct MapProvider {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub lat: f64,
    pub lng: f64,
}
