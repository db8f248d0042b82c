use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::models::VerificationStatus;
use crate::features::verification::models::{DecisionStatus, VerificationDocument};

const DOCUMENT_SELECT: &str = r#"
    SELECT
        d.id, d.profile_id, d.document_type,
        d.doc_front_url, d.doc_back_url, d.selfie_url, d.holding_doc_url,
        d.status, d.created_at,
        p.full_name AS owner_full_name,
        p.cpf_cnpj AS owner_cpf_cnpj,
        p.username AS owner_username
    FROM provider_documents d
    LEFT JOIN profiles p ON p.id = d.profile_id
"#;

/// Identity documents submitted by providers
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Pending documents, oldest first
    async fn list_pending(&self) -> Result<Vec<VerificationDocument>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationDocument>>;

    /// Write `decision` to the document and its owner's profile atomically
    ///
    /// `NotFound` when the document does not exist or belongs to another
    /// profile; nothing is written in that case.
    async fn apply_decision(
        &self,
        document_id: Uuid,
        profile_id: Uuid,
        decision: DecisionStatus,
    ) -> Result<()>;
}

pub struct PgDocumentRepository {
    pool: PgPool,
}

impl PgDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn list_pending(&self) -> Result<Vec<VerificationDocument>> {
        let sql = format!(
            "{} WHERE d.status = $1 ORDER BY d.created_at ASC",
            DOCUMENT_SELECT
        );

        sqlx::query_as::<_, VerificationDocument>(&sql)
            .bind(VerificationStatus::Pending)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list pending documents: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationDocument>> {
        let sql = format!("{} WHERE d.id = $1", DOCUMENT_SELECT);

        sqlx::query_as::<_, VerificationDocument>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get document {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn apply_decision(
        &self,
        document_id: Uuid,
        profile_id: Uuid,
        decision: DecisionStatus,
    ) -> Result<()> {
        let status = decision.verification_status();

        // Dropping the transaction without commit rolls both writes back
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to start decision transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let document = sqlx::query(
            "UPDATE provider_documents SET status = $3 WHERE id = $1 AND profile_id = $2",
        )
        .bind(document_id)
        .bind(profile_id)
        .bind(status)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update document {}: {:?}", document_id, e);
            AppError::Database(e)
        })?;

        if document.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Document {} not found for profile {}",
                document_id, profile_id
            )));
        }

        let profile = sqlx::query("UPDATE profiles SET verification_status = $2 WHERE id = $1")
            .bind(profile_id)
            .bind(status)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update profile {}: {:?}", profile_id, e);
                AppError::Database(e)
            })?;

        if profile.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Profile {} not found",
                profile_id
            )));
        }

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit decision for {}: {:?}", document_id, e);
            AppError::Database(e)
        })
    }
}
