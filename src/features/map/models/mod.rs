pub mod map_provider;

pub use map_provider::MapProvider;
