use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{is_foreign_key_violation, AppError, Result};
use crate::features::catalog::models::{
    CatalogItemChanges, Category, NewCategory, NewService, Service,
};

/// Categories and their services
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All categories ordered by name
    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>>;

    async fn insert_category(&self, new: &NewCategory) -> Result<Category>;

    async fn update_category(&self, id: Uuid, changes: &CatalogItemChanges) -> Result<Option<Category>>;

    /// `Conflict` when services still reference the category; `false` when it does not exist
    async fn delete_category(&self, id: Uuid) -> Result<bool>;

    /// Services of one category ordered by name
    async fn list_services(&self, category_id: Uuid) -> Result<Vec<Service>>;

    async fn insert_service(&self, new: &NewService) -> Result<Service>;

    async fn update_service(&self, id: Uuid, changes: &CatalogItemChanges) -> Result<Option<Service>>;

    async fn delete_service(&self, id: Uuid) -> Result<bool>;

    async fn count_categories(&self) -> Result<i64>;

    async fn count_services(&self) -> Result<i64>;
}

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn count(&self, table: &str) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: Option<i64> = sqlx::query_scalar(&sql)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count {}: {:?}", table, e);
                AppError::Database(e)
            })?;

        Ok(count.unwrap_or(0))
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM service_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_category(&self, id: Uuid) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM service_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get category {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn insert_category(&self, new: &NewCategory) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO service_categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update_category(&self, id: Uuid, changes: &CatalogItemChanges) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE service_categories
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update category {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM service_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    return AppError::Conflict(
                        "Category still has services and cannot be deleted".to_string(),
                    );
                }
                tracing::error!("Failed to delete category {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_services(&self, category_id: Uuid) -> Result<Vec<Service>> {
        sqlx::query_as::<_, Service>(
            r#"
            SELECT id, name, description, category_id
            FROM services
            WHERE category_id = $1
            ORDER BY name
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list services of {}: {:?}", category_id, e);
            AppError::Database(e)
        })
    }

    async fn insert_service(&self, new: &NewService) -> Result<Service> {
        sqlx::query_as::<_, Service>(
            r#"
            INSERT INTO services (name, description, category_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, category_id
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return AppError::NotFound(format!("Category {} not found", new.category_id));
            }
            tracing::error!("Failed to create service: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update_service(&self, id: Uuid, changes: &CatalogItemChanges) -> Result<Option<Service>> {
        sqlx::query_as::<_, Service>(
            r#"
            UPDATE services
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING id, name, description, category_id
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update service {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn delete_service(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    return AppError::Conflict(
                        "Service is still offered by providers and cannot be deleted".to_string(),
                    );
                }
                tracing::error!("Failed to delete service {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_categories(&self) -> Result<i64> {
        self.count("service_categories").await
    }

    async fn count_services(&self) -> Result<i64> {
        self.count("services").await
    }
}
