use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::core::error::{AppError, Result};

/// One day of `get_registrations_history`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RegistrationHistoryRow {
    pub registration_date: NaiveDate,
    pub provider_count: i64,
    pub client_count: i64,
}

/// One row of `get_top_services`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TopServiceRow {
    pub service_name: String,
    pub category_name: Option<String>,
    pub total_offers: i64,
    pub booked_count: i64,
}

/// Aggregations computed by stored procedures
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Daily sign-ups between two instants, both inclusive, ordered by day
    async fn registration_history(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RegistrationHistoryRow>>;

    async fn top_services(&self) -> Result<Vec<TopServiceRow>>;
}

pub struct PgStatsRepository {
    pool: PgPool,
}

impl PgStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn registration_history(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RegistrationHistoryRow>> {
        sqlx::query_as::<_, RegistrationHistoryRow>(
            r#"
            SELECT
                registration_date,
                COALESCE(provider_count, 0)::BIGINT AS provider_count,
                COALESCE(client_count, 0)::BIGINT AS client_count
            FROM get_registrations_history($1, $2)
            ORDER BY registration_date
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get registration history: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn top_services(&self) -> Result<Vec<TopServiceRow>> {
        sqlx::query_as::<_, TopServiceRow>(
            r#"
            SELECT
                service_name,
                category_name,
                COALESCE(total_offers, 0)::BIGINT AS total_offers,
                COALESCE(booked_count, 0)::BIGINT AS booked_count
            FROM get_top_services()
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get top services: {:?}", e);
            AppError::Database(e)
        })
    }
}
