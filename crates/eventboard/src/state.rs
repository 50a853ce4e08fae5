//! Application state with repository-based storage.
//!
//! The shared state handed to every request handler. Storage backends are
//! selected via mutually exclusive cargo features, mirroring how the
//! binary is deployed either self-contained (SQLite) or for tests and dev
//! (in-memory).

use std::sync::Arc;

use eventboard_core::storage::{EventRepository, OccurrenceRepository, SubscriberRepository};

use crate::config::Config;
use crate::mailer::Mailer;

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub event_repo: Arc<dyn EventRepository>,
    pub occurrence_repo: Arc<dyn OccurrenceRepository>,
    pub subscriber_repo: Arc<dyn SubscriberRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub config: Arc<Config>,
}

impl AppState {
    fn build(
        event_repo: Arc<dyn EventRepository>,
        occurrence_repo: Arc<dyn OccurrenceRepository>,
        subscriber_repo: Arc<dyn SubscriberRepository>,
        config: Config,
    ) -> Self {
        let mailer = crate::mailer::from_config(&config);
        Self {
            event_repo,
            occurrence_repo,
            subscriber_repo,
            mailer,
            config: Arc::new(config),
        }
    }

    /// Creates state backed by the in-memory repository.
    #[cfg(feature = "inmemory")]
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        use crate::storage::inmemory::InMemoryRepository;

        let repo = Arc::new(InMemoryRepository::new());
        tracing::info!("Using in-memory storage backend");
        Ok(Self::build(repo.clone(), repo.clone(), repo, config))
    }

    /// Creates state backed by the SQLite repository.
    #[cfg(feature = "sqlite")]
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        use crate::storage::sqlite::SqliteRepository;

        let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
        tracing::info!(path = %config.sqlite_path, "Using SQLite storage backend");
        Ok(Self::build(repo.clone(), repo.clone(), repo, config))
    }
}

// Tests build state straight on the in-memory backend.
#[cfg(all(test, feature = "inmemory"))]
impl Default for AppState {
    fn default() -> Self {
        use crate::storage::inmemory::InMemoryRepository;

        let repo = Arc::new(InMemoryRepository::new());
        Self::build(repo.clone(), repo.clone(), repo, Config::default())
    }
}
