use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct NavigationQuery {
    /// Route currently shown by the client; `/` when absent
    pub path: Option<String>,
}

/// Sidebar entry; groups carry children instead of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NavigationItemDto {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub active: bool,
    /// Draws the attention marker next to the entry
    #[serde(default)]
    pub badge: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schema(no_recursion)]
    pub children: Vec<NavigationItemDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NavigationDto {
    pub current_path: String,
    pub items: Vec<NavigationItemDto>,
}
