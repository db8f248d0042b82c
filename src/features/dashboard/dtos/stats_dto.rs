use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::AppError;
use crate::features::dashboard::repositories::{RegistrationHistoryRow, TopServiceRow};
use crate::features::users::dtos::UserSummaryDto;
use crate::shared::constants::DEFAULT_HISTORY_DAYS;

// ============================================================================
// Counts
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DashboardCountsDto {
    pub clients: i64,
    pub providers: i64,
    pub categories: i64,
    pub services: i64,
}

// ============================================================================
// Registration History
// ============================================================================

/// Query params for the registration chart
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct HistoryQueryParams {
    /// First day, inclusive (default: 29 days before `end`)
    pub start: Option<NaiveDate>,
    /// Last day, inclusive (default: today)
    pub end: Option<NaiveDate>,
}

/// Calendar-day range widened to whole days: `start 00:00:00` to `end 23:59:59`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryRange {
    pub start_day: NaiveDate,
    pub end_day: NaiveDate,
}

impl HistoryRange {
    pub fn from_query(params: &HistoryQueryParams, today: NaiveDate) -> Result<Self, AppError> {
        let end_day = params.end.unwrap_or(today);
        let start_day = match params.start {
            Some(start) => start,
            None => end_day
                .checked_sub_days(Days::new(DEFAULT_HISTORY_DAYS as u64 - 1))
                .ok_or_else(|| AppError::Validation("End date is out of range".to_string()))?,
        };

        if start_day > end_day {
            return Err(AppError::Validation(
                "Start date must not be after end date".to_string(),
            ));
        }

        Ok(Self { start_day, end_day })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start_day.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn end(&self) -> DateTime<Utc> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        self.end_day.and_time(end_of_day).and_utc()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationPointDto {
    pub date: NaiveDate,
    pub provider_count: i64,
    pub client_count: i64,
}

impl From<RegistrationHistoryRow> for RegistrationPointDto {
    fn from(row: RegistrationHistoryRow) -> Self {
        Self {
            date: row.registration_date,
            provider_count: row.provider_count,
            client_count: row.client_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationHistoryDto {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub points: Vec<RegistrationPointDto>,
}

// ============================================================================
// Recent Users / Top Services
// ============================================================================

/// Query params for the recent users widget
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct RecentUsersQueryParams {
    /// Max rows (default 5, max 100)
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopServiceDto {
    pub service_name: String,
    pub category_name: Option<String>,
    pub total_offers: i64,
    pub booked_count: i64,
}

impl From<TopServiceRow> for TopServiceDto {
    fn from(row: TopServiceRow) -> Self {
        Self {
            service_name: row.service_name,
            category_name: row.category_name,
            total_offers: row.total_offers,
            booked_count: row.booked_count,
        }
    }
}

// ============================================================================
// Overview
// ============================================================================

/// Everything the dashboard home shows, loaded together
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardOverviewDto {
    pub counts: DashboardCountsDto,
    pub history: RegistrationHistoryDto,
    pub recent_users: Vec<UserSummaryDto>,
    pub top_services: Vec<TopServiceDto>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_is_inclusive_of_whole_days() {
        let range = HistoryRange::from_query(
            &HistoryQueryParams {
                start: Some(day(2024, 3, 1)),
                end: Some(day(2024, 3, 31)),
            },
            day(2024, 6, 1),
        )
        .unwrap();

        assert_eq!(range.start().to_rfc3339(), "2024-03-01T00:00:00+00:00");
        assert_eq!(range.end().to_rfc3339(), "2024-03-31T23:59:59+00:00");
    }

    #[test]
    fn test_default_range_is_last_30_days() {
        let range = HistoryRange::from_query(&HistoryQueryParams::default(), day(2024, 3, 30)).unwrap();
        assert_eq!(range.end_day, day(2024, 3, 30));
        assert_eq!(range.start_day, day(2024, 3, 1));
    }

    #[test]
    fn test_single_day_range_is_valid() {
        let range = HistoryRange::from_query(
            &HistoryQueryParams {
                start: Some(day(2024, 3, 1)),
                end: Some(day(2024, 3, 1)),
            },
            day(2024, 3, 1),
        );
        assert!(range.is_ok());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = HistoryRange::from_query(
            &HistoryQueryParams {
                start: Some(day(2024, 3, 2)),
                end: Some(day(2024, 3, 1)),
            },
            day(2024, 3, 30),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
