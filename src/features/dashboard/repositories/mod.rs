pub mod stats_repository;

pub use stats_repository::{
    PgStatsRepository, RegistrationHistoryRow, StatsRepository, TopServiceRow,
};
