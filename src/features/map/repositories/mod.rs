pub mod map_repository;

pub use map_repository::{MapRepository, PgMapRepository};
