//! Core logic for the school study companion.
//! Curriculum note matching and practice streak tracking live here; UI and
//! model-provider clients sit outside this crate.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::note::{ClassificationQuery, CurriculumNote, NoteExcerpt};
pub use model::progress::ProgressRecord;
pub use repo::catalog_repo::{CatalogRepository, RepoError, RepoResult, SqliteCatalogRepository};
pub use repo::progress_store::{
    MemoryProgressStore, ProgressStore, SqliteProgressStore, StoreError, StoreResult,
    PROGRESS_KEY,
};
pub use repo::static_catalog::{sample_notes, StaticCatalog};
pub use service::clock::{Clock, FixedClock, LocalClock};
pub use service::curriculum_qa::{
    AnswerGenerator, Classifier, CurriculumAnswer, CurriculumQa, GeneratedAnswer, QaError,
    UpstreamError,
};
pub use service::note_matcher::{note_matches, NoteMatcher};
pub use service::sample_prompts::{sample_prompts, SamplePrompt};
pub use service::streak_tracker::{
    compute_streak, trailing_week, PersistOutcome, StreakDay, StreakTracker,
};

/// Minimal health-check API for host integration.
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
