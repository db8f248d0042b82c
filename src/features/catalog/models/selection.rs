use uuid::Uuid;

use super::catalog::{CatalogItemChanges, Category};

/// Which category the operator is looking at
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogSelection {
    #[default]
    None,
    Category(Category),
}

impl CatalogSelection {
    /// Resolve a requested id against the current category list
    ///
    /// An id that no longer exists resolves to no selection.
    pub fn resolve(selected_id: Option<Uuid>, categories: &[Category]) -> Self {
        selected_id
            .and_then(|id| categories.iter().find(|c| c.id == id))
            .cloned()
            .map(CatalogSelection::Category)
            .unwrap_or_default()
    }

    pub fn category_id(&self) -> Option<Uuid> {
        match self {
            CatalogSelection::None => None,
            CatalogSelection::Category(c) => Some(c.id),
        }
    }

    /// Selection left behind after `deleted` is removed
    pub fn after_delete(self, deleted: Uuid) -> Self {
        match self {
            CatalogSelection::Category(c) if c.id == deleted => CatalogSelection::None,
            other => other,
        }
    }
}

/// The single item an edit applies to
#[derive(Debug, Clone, PartialEq)]
pub enum EditTarget {
    Category { id: Uuid, changes: CatalogItemChanges },
    Service { id: Uuid, changes: CatalogItemChanges },
}
