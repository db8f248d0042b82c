use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::dtos::user_dto::or_placeholder;
use crate::features::users::models::VerificationStatus;
use crate::features::verification::models::{DecisionStatus, VerificationDocument};
use crate::shared::constants::{PLACEHOLDER_FULL_NAME, PLACEHOLDER_TAX_ID, PLACEHOLDER_USERNAME};

/// Queue row for a pending submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PendingDocumentDto {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub full_name: String,
    pub username: String,
    pub tax_id: String,
    pub document_type: Option<String>,
    pub status: VerificationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<VerificationDocument> for PendingDocumentDto {
    fn from(doc: VerificationDocument) -> Self {
        Self {
            id: doc.id,
            profile_id: doc.profile_id,
            full_name: or_placeholder(doc.owner.full_name, PLACEHOLDER_FULL_NAME),
            username: or_placeholder(doc.owner.username, PLACEHOLDER_USERNAME),
            tax_id: or_placeholder(doc.owner.cpf_cnpj, PLACEHOLDER_TAX_ID),
            document_type: doc.document_type,
            status: doc.status,
            created_at: doc.created_at,
        }
    }
}

/// Temporary read URLs for the submitted images
///
/// Images that were never uploaded, or whose URL could not be issued, are
/// left out of the payload entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SignedDocumentUrls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub front: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selfie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holding: Option<String>,
    /// Seconds until the URLs stop working
    pub expires_in: u32,
}

/// Review view of a single submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentReviewDto {
    #[serde(flatten)]
    pub document: PendingDocumentDto,
    pub images: SignedDocumentUrls,
}

/// Operator decision on a submission
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DecisionRequestDto {
    /// Owner of the document; must match the stored owner
    pub profile_id: Uuid,
    pub status: DecisionStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DecisionResultDto {
    pub document_id: Uuid,
    pub profile_id: Uuid,
    pub status: VerificationStatus,
}
