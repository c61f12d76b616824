use core::fmt::{Debug, Display};

use digest_rota_config::ConfigError;
use digest_rota_database::DatabaseError;

#[derive(thiserror::Error)]
pub enum ScheduleError {
    #[error("unknown day {0:?}")]
    UnknownDay(String),
    #[error("unknown time of day {0:?}")]
    UnknownTimeOfDay(String),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
}

impl Debug for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
