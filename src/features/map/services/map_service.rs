use std::sync::Arc;

use crate::core::error::Result;
use crate::features::map::dtos::{MapViewportDto, ProviderMapDto};
use crate::features::map::repositories::MapRepository;

/// Provider positions and coverage areas
pub struct MapService {
    repo: Arc<dyn MapRepository>,
}

impl MapService {
    pub fn new(repo: Arc<dyn MapRepository>) -> Self {
        Self { repo }
    }

    pub async fn provider_map(&self) -> Result<ProviderMapDto> {
        let providers = self.repo.list_providers().await?;

        Ok(ProviderMapDto {
            viewport: MapViewportDto::for_providers(&providers),
            tiles: Default::default(),
            coverage_style: Default::default(),
            markers: providers.into_iter().map(Into::into).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::UserRole;
    use crate::shared::test_helpers::InMemoryBackend;

    #[tokio::test]
    async fn test_only_located_providers_are_drawn() {
        let backend = InMemoryBackend::new();
        let located = backend.add_profile(UserRole::Provider);
        let mut hidden = backend.add_profile(UserRole::Provider);
        hidden.latitude = None;
        backend.replace_profile(hidden);
        backend.add_profile(UserRole::Client);

        let map = MapService::new(backend.map()).provider_map().await.unwrap();

        assert_eq!(map.markers.len(), 1);
        assert_eq!(map.markers[0].id, located.id);
        assert_eq!(map.viewport.zoom, 10);
    }

    #[tokio::test]
    async fn test_empty_map() {
        let backend = InMemoryBackend::new();
        let map = MapService::new(backend.map()).provider_map().await.unwrap();

        assert!(map.markers.is_empty());
        assert_eq!(map.viewport.zoom, 4);
    }
}
