use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a service category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Database model for a service offered under a category
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewService {
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Editable fields shared by categories and services
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItemChanges {
    pub name: String,
    pub description: Option<String>,
}
