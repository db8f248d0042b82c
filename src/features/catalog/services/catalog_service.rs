use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::catalog::dtos::{
    item_changes, CatalogViewDto, CreateCategoryDto, CreateServiceDto,
};
use crate::features::catalog::models::{
    CatalogSelection, Category, EditTarget, NewCategory, NewService,
};
use crate::features::catalog::repositories::CatalogRepository;

/// Category and service administration
///
/// Every mutation is followed by a fresh read of the affected lists, returned
/// as the catalog view for the caller's selection.
pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    pub async fn view(&self, selected_category_id: Option<Uuid>) -> Result<CatalogViewDto> {
        let categories = self.repo.list_categories().await?;
        let selection = CatalogSelection::resolve(selected_category_id, &categories);
        self.render(categories, selection).await
    }

    pub async fn create_category(
        &self,
        dto: CreateCategoryDto,
        selected_category_id: Option<Uuid>,
    ) -> Result<CatalogViewDto> {
        let changes = item_changes(&dto.name, dto.description.as_deref());

        let category = self
            .repo
            .insert_category(&NewCategory {
                name: changes.name,
                description: changes.description,
            })
            .await?;
        tracing::info!("Created category {} ({})", category.name, category.id);

        self.view(selected_category_id).await
    }

    /// Create a service under `category_id`, which becomes the selection
    pub async fn create_service(
        &self,
        category_id: Uuid,
        dto: CreateServiceDto,
    ) -> Result<CatalogViewDto> {
        let changes = item_changes(&dto.name, dto.description.as_deref());

        if self.repo.find_category(category_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Category {} not found",
                category_id
            )));
        }

        let service = self
            .repo
            .insert_service(&NewService {
                category_id,
                name: changes.name,
                description: changes.description,
            })
            .await?;
        tracing::info!(
            "Created service {} ({}) in category {}",
            service.name,
            service.id,
            category_id
        );

        self.view(Some(category_id)).await
    }

    pub async fn update_item(
        &self,
        target: EditTarget,
        selected_category_id: Option<Uuid>,
    ) -> Result<CatalogViewDto> {
        match target {
            EditTarget::Category { id, changes } => {
                self.repo
                    .update_category(id, &changes)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;
                tracing::info!("Updated category {}", id);
            }
            EditTarget::Service { id, changes } => {
                self.repo
                    .update_service(id, &changes)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))?;
                tracing::info!("Updated service {}", id);
            }
        }

        // Re-resolving the selection refreshes its display copy
        self.view(selected_category_id).await
    }

    pub async fn delete_category(
        &self,
        id: Uuid,
        confirmed: bool,
        selected_category_id: Option<Uuid>,
    ) -> Result<CatalogViewDto> {
        require_confirmation(confirmed)?;

        if !self.repo.delete_category(id).await? {
            return Err(AppError::NotFound(format!("Category {} not found", id)));
        }
        tracing::info!("Deleted category {}", id);

        let categories = self.repo.list_categories().await?;
        let selection = CatalogSelection::resolve(selected_category_id, &categories).after_delete(id);
        self.render(categories, selection).await
    }

    pub async fn delete_service(
        &self,
        id: Uuid,
        confirmed: bool,
        selected_category_id: Option<Uuid>,
    ) -> Result<CatalogViewDto> {
        require_confirmation(confirmed)?;

        if !self.repo.delete_service(id).await? {
            return Err(AppError::NotFound(format!("Service {} not found", id)));
        }
        tracing::info!("Deleted service {}", id);

        self.view(selected_category_id).await
    }

    async fn render(
        &self,
        categories: Vec<Category>,
        selection: CatalogSelection,
    ) -> Result<CatalogViewDto> {
        let services = match selection.category_id() {
            Some(category_id) => self.repo.list_services(category_id).await?,
            None => Vec::new(),
        };

        let selected_category = match selection {
            CatalogSelection::Category(c) => Some(c.into()),
            CatalogSelection::None => None,
        };

        Ok(CatalogViewDto {
            categories: categories.into_iter().map(Into::into).collect(),
            selected_category,
            total_services: services.len(),
            services: services.into_iter().map(Into::into).collect(),
        })
    }
}

fn require_confirmation(confirmed: bool) -> Result<()> {
    if confirmed {
        Ok(())
    } else {
        Err(AppError::Validation("Deletion must be confirmed".to_string()))
    }
}
