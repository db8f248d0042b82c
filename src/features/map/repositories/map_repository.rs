use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::map::models::MapProvider;

#[async_trait]
pub trait MapRepository: Send + Sync {
    /// Every provider with a known position
    async fn list_providers(&self) -> Result<Vec<MapProvider>>;
}

pub struct PgMapRepository {
    pool: PgPool,
}

impl PgMapRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MapRepository for PgMapRepository {
    async fn list_providers(&self) -> Result<Vec<MapProvider>> {
        sqlx::query_as::<_, MapProvider>(
            r#"
            SELECT id, full_name, username, avatar_url, lat, lng
            FROM admin_map_providers
            WHERE lat IS NOT NULL AND lng IS NOT NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load map providers: {:?}", e);
            AppError::Database(e)
        })
    }
}
