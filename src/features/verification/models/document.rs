use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::users::models::VerificationStatus;

/// Terminal outcome an operator can give a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    Verified,
    Rejected,
}

impl DecisionStatus {
    /// Status written to both the document and its owner's profile
    pub fn verification_status(&self) -> VerificationStatus {
        match self {
            DecisionStatus::Verified => VerificationStatus::Verified,
            DecisionStatus::Rejected => VerificationStatus::Rejected,
        }
    }
}

impl std::fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.verification_status())
    }
}

/// The four images a provider can submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentImage {
    Front,
    Back,
    Selfie,
    /// Selfie holding the document
    Holding,
}

/// Owner fields shown next to a submission, read from `owner_*` aliases
#[derive(Debug, Clone, PartialEq, Default, FromRow)]
pub struct DocumentOwner {
    #[sqlx(rename = "owner_full_name")]
    pub full_name: Option<String>,
    #[sqlx(rename = "owner_cpf_cnpj")]
    pub cpf_cnpj: Option<String>,
    #[sqlx(rename = "owner_username")]
    pub username: Option<String>,
}

/// Database model for `provider_documents` joined with its owner's profile
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct VerificationDocument {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub document_type: Option<String>,
    pub doc_front_url: Option<String>,
    pub doc_back_url: Option<String>,
    pub selfie_url: Option<String>,
    pub holding_doc_url: Option<String>,
    pub status: VerificationStatus,
    pub created_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub owner: DocumentOwner,
}

impl VerificationDocument {
    /// Stored paths that are present, in display order
    pub fn image_paths(&self) -> Vec<(DocumentImage, &str)> {
        [
            (DocumentImage::Front, &self.doc_front_url),
            (DocumentImage::Back, &self.doc_back_url),
            (DocumentImage::Selfie, &self.selfie_url),
            (DocumentImage::Holding, &self.holding_doc_url),
        ]
        .into_iter()
        .filter_map(|(image, path)| {
            path.as_deref()
                .filter(|p| !p.trim().is_empty())
                .map(|p| (image, p))
        })
        .collect()
    }
}
