use std::sync::Arc;

use futures::future::join_all;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::verification::dtos::{
    DecisionRequestDto, DecisionResultDto, DocumentReviewDto, PendingDocumentDto,
    SignedDocumentUrls,
};
use crate::features::verification::models::{DocumentImage, VerificationDocument};
use crate::features::verification::repositories::DocumentRepository;
use crate::modules::storage::SignedUrlIssuer;

/// Review queue for provider identity documents
pub struct VerificationService {
    documents: Arc<dyn DocumentRepository>,
    storage: Arc<dyn SignedUrlIssuer>,
    bucket: String,
    url_ttl_secs: u32,
}

impl VerificationService {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        storage: Arc<dyn SignedUrlIssuer>,
        bucket: impl Into<String>,
        url_ttl_secs: u32,
    ) -> Self {
        Self {
            documents,
            storage,
            bucket: bucket.into(),
            url_ttl_secs,
        }
    }

    pub async fn list_pending(&self) -> Result<Vec<PendingDocumentDto>> {
        let documents = self.documents.list_pending().await?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    /// Submission details with temporary URLs for its images
    pub async fn review(&self, id: Uuid) -> Result<DocumentReviewDto> {
        let document = self
            .documents
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Document {} not found", id)))?;

        let images = self.resolve_signed_urls(&document).await;

        Ok(DocumentReviewDto {
            document: document.into(),
            images,
        })
    }

    /// Issue all image URLs concurrently; failures are logged and dropped
    pub async fn resolve_signed_urls(&self, document: &VerificationDocument) -> SignedDocumentUrls {
        let requests = document.image_paths().into_iter().map(|(image, path)| async move {
            let signed = self
                .storage
                .create_signed_url(&self.bucket, path, self.url_ttl_secs)
                .await;
            (image, path, signed)
        });

        let mut urls = SignedDocumentUrls {
            expires_in: self.url_ttl_secs,
            ..Default::default()
        };

        for (image, path, signed) in join_all(requests).await {
            let url = match signed {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(
                        "Failed to sign {:?} image '{}' of document {}: {}",
                        image,
                        path,
                        document.id,
                        e
                    );
                    continue;
                }
            };

            match image {
                DocumentImage::Front => urls.front = Some(url),
                DocumentImage::Back => urls.back = Some(url),
                DocumentImage::Selfie => urls.selfie = Some(url),
                DocumentImage::Holding => urls.holding = Some(url),
            }
        }

        urls
    }

    /// Record the decision on the document and its owner's profile together
    pub async fn decide(&self, id: Uuid, dto: DecisionRequestDto) -> Result<DecisionResultDto> {
        self.documents
            .apply_decision(id, dto.profile_id, dto.status)
            .await?;

        tracing::info!(
            "Document {} of profile {} marked {}",
            id,
            dto.profile_id,
            dto.status
        );

        Ok(DecisionResultDto {
            document_id: id,
            profile_id: dto.profile_id,
            status: dto.status.verification_status(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::users::models::{UserRole, VerificationStatus};
    use crate::features::verification::models::DecisionStatus;
    use crate::shared::test_helpers::InMemoryBackend;

    fn service(backend: &InMemoryBackend) -> VerificationService {
        VerificationService::new(backend.documents(), backend.storage(), "verification-docs", 3600)
    }

    #[tokio::test]
    async fn test_pending_queue_is_oldest_first() {
        let backend = InMemoryBackend::new();
        let provider = backend.add_profile(UserRole::Provider);
        let first = backend.add_document(provider.id);
        let second = backend.add_document(provider.id);

        let queue = service(&backend).list_pending().await.unwrap();

        let ids: Vec<_> = queue.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(queue[0].username, provider.username.clone().unwrap());
    }

    #[tokio::test]
    async fn test_decisions_update_document_and_profile() {
        for decision in [DecisionStatus::Verified, DecisionStatus::Rejected] {
            let backend = InMemoryBackend::new();
            let provider = backend.add_profile(UserRole::Provider);
            let doc = backend.add_document(provider.id);
            let svc = service(&backend);

            let result = svc
                .decide(
                    doc.id,
                    DecisionRequestDto {
                        profile_id: provider.id,
                        status: decision,
                    },
                )
                .await
                .unwrap();

            let expected = decision.verification_status();
            assert_eq!(result.status, expected);
            assert_eq!(backend.document(doc.id).unwrap().status, expected);
            assert_eq!(backend.profile(provider.id).unwrap().verification_status, expected);
            assert!(svc.list_pending().await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_failed_decision_changes_nothing() {
        let backend = InMemoryBackend::new();
        let provider = backend.add_profile(UserRole::Provider);
        let doc = backend.add_document(provider.id);
        backend.fail_profile_updates(true);

        let result = service(&backend)
            .decide(
                doc.id,
                DecisionRequestDto {
                    profile_id: provider.id,
                    status: DecisionStatus::Verified,
                },
            )
            .await;

        assert!(result.is_err());
        assert_eq!(backend.document(doc.id).unwrap().status, VerificationStatus::Pending);
        assert_eq!(
            backend.profile(provider.id).unwrap().verification_status,
            VerificationStatus::Pending
        );
    }

    #[tokio::test]
    async fn test_decision_for_another_profile_is_not_found() {
        let backend = InMemoryBackend::new();
        let owner = backend.add_profile(UserRole::Provider);
        let other = backend.add_profile(UserRole::Provider);
        let doc = backend.add_document(owner.id);

        let err = service(&backend)
            .decide(
                doc.id,
                DecisionRequestDto {
                    profile_id: other.id,
                    status: DecisionStatus::Rejected,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(backend.document(doc.id).unwrap().status, VerificationStatus::Pending);
    }

    #[tokio::test]
    async fn test_review_omits_missing_and_failed_images() {
        let backend = InMemoryBackend::new();
        let provider = backend.add_profile(UserRole::Provider);
        let mut doc = backend.add_document(provider.id);
        doc.doc_back_url = None;
        backend.replace_document(doc.clone());
        backend.fail_signing_for(doc.selfie_url.clone().unwrap());

        let review = service(&backend).review(doc.id).await.unwrap();

        assert!(review.images.front.is_some());
        assert!(review.images.back.is_none());
        assert!(review.images.selfie.is_none());
        assert!(review.images.holding.is_some());
        assert_eq!(review.images.expires_in, 3600);

        let json = serde_json::to_value(&review).unwrap();
        assert!(json["images"].get("back").is_none());
        assert_eq!(json["id"], doc.id.to_string());
    }

    #[tokio::test]
    async fn test_review_unknown_document() {
        let backend = InMemoryBackend::new();
        let err = service(&backend).review(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
