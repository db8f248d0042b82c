pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod map;
pub mod navigation;
pub mod users;
pub mod verification;
