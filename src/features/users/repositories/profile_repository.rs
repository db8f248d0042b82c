use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::models::{Profile, UserRole};

const PROFILE_COLUMNS: &str = r#"
    id, username, full_name, email, user_role, cpf_cnpj,
    COALESCE(is_admin, FALSE) AS is_admin,
    COALESCE(verification_status, 'pending') AS verification_status,
    avatar_url, created_at, latitude, longitude
"#;

/// Read access to marketplace profiles
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>>;

    /// Newest profiles first, optionally restricted to one role
    async fn list_recent(&self, role: Option<UserRole>, limit: i64) -> Result<Vec<Profile>>;

    async fn count_by_role(&self, role: UserRole) -> Result<i64>;
}

pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        let sql = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);

        sqlx::query_as::<_, Profile>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get profile {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn list_recent(&self, role: Option<UserRole>, limit: i64) -> Result<Vec<Profile>> {
        let sql = format!(
            r#"
            SELECT {}
            FROM profiles
            WHERE ($1::text IS NULL OR user_role = $1)
            ORDER BY created_at DESC
            LIMIT $2
            "#,
            PROFILE_COLUMNS
        );

        sqlx::query_as::<_, Profile>(&sql)
            .bind(role)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list profiles: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn count_by_role(&self, role: UserRole) -> Result<i64> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT COUNT(*) FROM profiles WHERE user_role = $1")
                .bind(role)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to count {} profiles: {:?}", role, e);
                    AppError::Database(e)
                })?;

        Ok(count.unwrap_or(0))
    }
}
