//! User directory.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/users?role&limit` | Most recent profiles, optionally by role |
//! | GET | `/api/admin/users/{id}` | Profile detail with display placeholders |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::UserDirectoryService;
