pub mod catalog;
pub mod selection;

pub use catalog::{CatalogItemChanges, Category, NewCategory, NewService, Service};
pub use selection::{CatalogSelection, EditTarget};
