use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{ProfileDetailDto, UserSummaryDto};
use crate::features::users::models::UserRole;
use crate::features::users::repositories::ProfileRepository;
use crate::shared::constants::{DEFAULT_DIRECTORY_LIMIT, MAX_LIST_LIMIT};
use crate::shared::types::clamp_limit;

/// Read-only directory of clients and providers
pub struct UserDirectoryService {
    profiles: Arc<dyn ProfileRepository>,
}

impl UserDirectoryService {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Most recent profiles, newest first
    pub async fn list(&self, role: Option<UserRole>, limit: Option<i64>) -> Result<Vec<UserSummaryDto>> {
        let limit = clamp_limit(limit, DEFAULT_DIRECTORY_LIMIT, MAX_LIST_LIMIT);
        let profiles = self.profiles.list_recent(role, limit).await?;

        Ok(profiles.into_iter().map(UserSummaryDto::from).collect())
    }

    pub async fn detail(&self, id: Uuid) -> Result<ProfileDetailDto> {
        self.profiles
            .find_by_id(id)
            .await?
            .map(ProfileDetailDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", id)))
    }
}
