//! Core domain logic for the bingo task list.
//! This crate is the single source of truth for backlog and grid invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;

pub use config::{BingoConfig, ConfigError, DEFAULT_DUE_SOON_THRESHOLD_MS};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::container::{AdvancedTask, Completable, SimpleTask, TaskContainer};
pub use model::grid::{BingoTask, GridError, GridSizePolicy};
pub use model::task::{Task, TaskId, TaskState, TaskValidationError};
pub use service::bingo_manager::BingoManager;
pub use service::board::{BoardEntry, BoardEntryId, SubtaskRemoval, TaskBoard};
pub use service::events::{BacklogEvent, SubscriptionId};
pub use service::shared::SharedBingoManager;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
