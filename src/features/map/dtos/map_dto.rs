use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::map::models::MapProvider;
use crate::shared::constants::{
    COVERAGE_RADIUS_METERS, DEFAULT_MAP_CENTER, DEFAULT_MAP_ZOOM, MAP_TILE_ATTRIBUTION,
    MAP_TILE_URL, PROVIDER_MAP_ZOOM,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LatLngDto {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MapViewportDto {
    pub center: LatLngDto,
    pub zoom: u8,
}

impl MapViewportDto {
    /// First provider up close, or the continental overview when there is none
    pub fn for_providers(providers: &[MapProvider]) -> Self {
        match providers.first() {
            Some(first) => Self {
                center: LatLngDto {
                    lat: first.lat,
                    lng: first.lng,
                },
                zoom: PROVIDER_MAP_ZOOM,
            },
            None => Self {
                center: LatLngDto {
                    lat: DEFAULT_MAP_CENTER.0,
                    lng: DEFAULT_MAP_CENTER.1,
                },
                zoom: DEFAULT_MAP_ZOOM,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TileLayerDto {
    pub url: String,
    pub attribution: String,
}

impl Default for TileLayerDto {
    fn default() -> Self {
        Self {
            url: MAP_TILE_URL.to_string(),
            attribution: MAP_TILE_ATTRIBUTION.to_string(),
        }
    }
}

/// Drawing style of coverage circles
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoverageStyleDto {
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f32,
    pub weight: u8,
}

impl Default for CoverageStyleDto {
    fn default() -> Self {
        Self {
            color: "#2563eb".to_string(),
            fill_color: "#3b82f6".to_string(),
            fill_opacity: 0.1,
            weight: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoverageCircleDto {
    pub center: LatLngDto,
    pub radius_meters: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderMarkerDto {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    /// Letter shown when there is no avatar
    pub initial: String,
    pub position: LatLngDto,
    pub coverage: CoverageCircleDto,
}

impl From<MapProvider> for ProviderMarkerDto {
    fn from(p: MapProvider) -> Self {
        let initial = p
            .full_name
            .as_deref()
            .and_then(|name| name.trim().chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "P".to_string());
        let position = LatLngDto {
            lat: p.lat,
            lng: p.lng,
        };

        Self {
            id: p.id,
            full_name: p.full_name,
            username: p.username,
            avatar_url: p.avatar_url,
            initial,
            position,
            coverage: CoverageCircleDto {
                center: position,
                radius_meters: COVERAGE_RADIUS_METERS,
            },
        }
    }
}

/// Everything needed to draw the provider map
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProviderMapDto {
    pub viewport: MapViewportDto,
    pub tiles: TileLayerDto,
    pub coverage_style: CoverageStyleDto,
    pub markers: Vec<ProviderMarkerDto>,
}
