pub mod user_directory_service;

pub use user_directory_service::UserDirectoryService;
