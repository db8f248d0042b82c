use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::features::catalog::models::{CatalogItemChanges, Category, EditTarget, Service};
use crate::shared::validation::{not_blank, optional_text};

/// Query params carrying the operator's current selection
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CatalogQuery {
    pub selected_category_id: Option<Uuid>,
}

/// Query params for destructive catalog operations
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DeleteCatalogItemQuery {
    /// Must be `true`; deletes are never implicit
    #[serde(default)]
    pub confirm: bool,
    pub selected_category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(
        length(min = 1, message = "Name is required"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateServiceDto {
    #[validate(
        length(min = 1, message = "Name is required"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name: String,
    pub description: Option<String>,
}

/// New name and description for an existing item
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CatalogItemEditDto {
    pub id: Uuid,
    #[validate(
        length(min = 1, message = "Name is required"),
        custom(function = "not_blank", message = "Name is required")
    )]
    pub name: String,
    pub description: Option<String>,
}

/// Item being edited: `{"type": "category" | "service", "data": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum EditTargetDto {
    Category(CatalogItemEditDto),
    Service(CatalogItemEditDto),
}

impl Validate for EditTargetDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            EditTargetDto::Category(item) | EditTargetDto::Service(item) => item.validate(),
        }
    }
}

impl From<EditTargetDto> for EditTarget {
    fn from(dto: EditTargetDto) -> Self {
        match dto {
            EditTargetDto::Category(item) => EditTarget::Category {
                id: item.id,
                changes: item_changes(&item.name, item.description.as_deref()),
            },
            EditTargetDto::Service(item) => EditTarget::Service {
                id: item.id,
                changes: item_changes(&item.name, item.description.as_deref()),
            },
        }
    }
}

/// Trimmed name and description of a validated request
pub fn item_changes(name: &str, description: Option<&str>) -> CatalogItemChanges {
    CatalogItemChanges {
        name: name.trim().to_string(),
        description: optional_text(description),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
}

impl From<Service> for ServiceDto {
    fn from(s: Service) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            category_id: s.category_id,
        }
    }
}

/// Everything the catalog screen shows for one selection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogViewDto {
    pub categories: Vec<CategoryDto>,
    /// Currently selected category, `null` when none
    pub selected_category: Option<CategoryDto>,
    /// Services of the selected category, empty without a selection
    pub services: Vec<ServiceDto>,
    pub total_services: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_target_parses_tagged_payload() {
        let id = Uuid::new_v4();
        let dto: EditTargetDto = serde_json::from_value(serde_json::json!({
            "type": "service",
            "data": {"id": id, "name": " Troca de tomada ", "description": ""}
        }))
        .unwrap();

        let target = EditTarget::from(dto);
        assert_eq!(
            target,
            EditTarget::Service {
                id,
                changes: CatalogItemChanges {
                    name: "Troca de tomada".to_string(),
                    description: None,
                },
            }
        );
    }

    #[test]
    fn test_edit_target_rejects_unknown_type() {
        let parsed = serde_json::from_value::<EditTargetDto>(serde_json::json!({
            "type": "provider",
            "data": {"id": Uuid::new_v4(), "name": "x"}
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_blank_names_fail_validation() {
        let category = CreateCategoryDto {
            name: "   ".to_string(),
            description: Some("desc".to_string()),
        };
        assert!(category.validate().is_err());

        let service = CreateServiceDto {
            name: String::new(),
            description: None,
        };
        assert!(service.validate().is_err());

        let edit = EditTargetDto::Category(CatalogItemEditDto {
            id: Uuid::new_v4(),
            name: "\t".to_string(),
            description: None,
        });
        assert!(edit.validate().is_err());
    }

    #[test]
    fn test_named_item_passes_validation() {
        let dto = CreateCategoryDto {
            name: " Elétrica ".to_string(),
            description: None,
        };
        assert!(dto.validate().is_ok());
        assert_eq!(item_changes(&dto.name, None).name, "Elétrica");
    }
}
