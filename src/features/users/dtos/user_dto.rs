use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::features::users::models::{Profile, UserRole, VerificationStatus};
use crate::shared::constants::{
    PLACEHOLDER_AVATAR_URL, PLACEHOLDER_EMAIL, PLACEHOLDER_FULL_NAME, PLACEHOLDER_LOCATION,
    PLACEHOLDER_TAX_ID, PLACEHOLDER_USERNAME,
};

/// Query params for the user directory
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    /// Restrict to one role; all roles when absent
    pub role: Option<UserRole>,
    /// Max rows (default 20, max 100)
    pub limit: Option<i64>,
}

/// Directory row
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserSummaryDto {
    pub id: Uuid,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub user_role: UserRole,
    pub avatar_url: String,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Profile> for UserSummaryDto {
    fn from(p: Profile) -> Self {
        Self {
            id: p.id,
            full_name: or_placeholder(p.full_name, PLACEHOLDER_FULL_NAME),
            username: or_placeholder(p.username, PLACEHOLDER_USERNAME),
            email: or_placeholder(p.email, PLACEHOLDER_EMAIL),
            user_role: p.user_role,
            avatar_url: or_placeholder(p.avatar_url, PLACEHOLDER_AVATAR_URL),
            verification_status: p.verification_status,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct GeoPointDto {
    pub latitude: f64,
    pub longitude: f64,
}

/// Full profile with every optional field resolved to a display value
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileDetailDto {
    pub id: Uuid,
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub user_role: UserRole,
    pub tax_id: String,
    pub is_admin: bool,
    pub verification_status: VerificationStatus,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
    pub location: Option<GeoPointDto>,
    /// "lat, lng" or the missing-location placeholder
    pub location_label: String,
}

impl From<Profile> for ProfileDetailDto {
    fn from(p: Profile) -> Self {
        let location = p.coordinates().map(|(latitude, longitude)| GeoPointDto {
            latitude,
            longitude,
        });
        let location_label = match location {
            Some(point) => format!("{:.6}, {:.6}", point.latitude, point.longitude),
            None => PLACEHOLDER_LOCATION.to_string(),
        };

        Self {
            id: p.id,
            full_name: or_placeholder(p.full_name, PLACEHOLDER_FULL_NAME),
            username: or_placeholder(p.username, PLACEHOLDER_USERNAME),
            email: or_placeholder(p.email, PLACEHOLDER_EMAIL),
            user_role: p.user_role,
            tax_id: or_placeholder(p.cpf_cnpj, PLACEHOLDER_TAX_ID),
            is_admin: p.is_admin,
            verification_status: p.verification_status,
            avatar_url: or_placeholder(p.avatar_url, PLACEHOLDER_AVATAR_URL),
            created_at: p.created_at,
            location,
            location_label,
        }
    }
}

/// Blank strings count as missing
pub(crate) fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}
