use std::sync::Arc;

use chrono::Utc;

use crate::core::error::Result;
use crate::features::catalog::repositories::CatalogRepository;
use crate::features::dashboard::dtos::*;
use crate::features::dashboard::repositories::StatsRepository;
use crate::features::users::dtos::UserSummaryDto;
use crate::features::users::models::UserRole;
use crate::features::users::repositories::ProfileRepository;
use crate::shared::constants::{DEFAULT_RECENT_USERS_LIMIT, MAX_LIST_LIMIT};
use crate::shared::types::clamp_limit;

/// Read-only aggregations for the dashboard home
pub struct StatsService {
    profiles: Arc<dyn ProfileRepository>,
    catalog: Arc<dyn CatalogRepository>,
    stats: Arc<dyn StatsRepository>,
}

impl StatsService {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        catalog: Arc<dyn CatalogRepository>,
        stats: Arc<dyn StatsRepository>,
    ) -> Self {
        Self {
            profiles,
            catalog,
            stats,
        }
    }

    /// The four headline counts, fetched concurrently
    ///
    /// A single failed count fails the whole call.
    pub async fn counts(&self) -> Result<DashboardCountsDto> {
        let (clients, providers, categories, services) = tokio::try_join!(
            self.profiles.count_by_role(UserRole::Client),
            self.profiles.count_by_role(UserRole::Provider),
            self.catalog.count_categories(),
            self.catalog.count_services(),
        )?;

        Ok(DashboardCountsDto {
            clients,
            providers,
            categories,
            services,
        })
    }

    pub async fn history(&self, params: &HistoryQueryParams) -> Result<RegistrationHistoryDto> {
        let range = HistoryRange::from_query(params, Utc::now().date_naive())?;
        self.history_in(range).await
    }

    async fn history_in(&self, range: HistoryRange) -> Result<RegistrationHistoryDto> {
        let rows = self
            .stats
            .registration_history(range.start(), range.end())
            .await?;

        Ok(RegistrationHistoryDto {
            start: range.start_day,
            end: range.end_day,
            points: rows.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn recent_users(&self, limit: Option<i64>) -> Result<Vec<UserSummaryDto>> {
        let limit = clamp_limit(limit, DEFAULT_RECENT_USERS_LIMIT, MAX_LIST_LIMIT);
        let profiles = self.profiles.list_recent(None, limit).await?;
        Ok(profiles.into_iter().map(Into::into).collect())
    }

    pub async fn top_services(&self) -> Result<Vec<TopServiceDto>> {
        let rows = self.stats.top_services().await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Counts, history, recent users and top services joined concurrently
    pub async fn overview(&self, params: &HistoryQueryParams) -> Result<DashboardOverviewDto> {
        let range = HistoryRange::from_query(params, Utc::now().date_naive())?;

        let (counts, history, recent_users, top_services) = tokio::try_join!(
            self.counts(),
            self.history_in(range),
            self.recent_users(None),
            self.top_services(),
        )?;

        Ok(DashboardOverviewDto {
            counts,
            history,
            recent_users,
            top_services,
        })
    }
}
