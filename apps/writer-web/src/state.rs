//! Application state - shared across all handlers.

use std::sync::Arc;

use writer_core::ports::PostRepository;
use writer_infra::{FallbackPostRepository, InMemoryPostRepository};

use crate::config::{AppConfig, BackendConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<FallbackPostRepository>,
    /// Name of the configured primary backend, for health reporting.
    pub backend: &'static str,
    pub default_author: String,
}

impl AppState {
    /// Build the application state, connecting the configured primary backend.
    ///
    /// A backend that cannot be set up is logged and left out; the in-memory
    /// store then serves every request.
    pub async fn new(config: &AppConfig) -> Self {
        let store = if config.seed_fixtures {
            InMemoryPostRepository::with_fixtures()
        } else {
            InMemoryPostRepository::new()
        };

        let primary = connect_primary(&config.backend).await;
        let backend = if primary.is_some() {
            config.backend.name()
        } else {
            BackendConfig::Memory.name()
        };

        tracing::info!(backend, "Application state initialized");

        Self {
            posts: Arc::new(FallbackPostRepository::new(primary, Arc::new(store))),
            backend,
            default_author: config.default_author.clone(),
        }
    }

    /// State over an in-memory store only.
    #[cfg(test)]
    pub fn in_memory(store: InMemoryPostRepository, default_author: impl Into<String>) -> Self {
        Self {
            posts: Arc::new(FallbackPostRepository::memory_only(Arc::new(store))),
            backend: BackendConfig::Memory.name(),
            default_author: default_author.into(),
        }
    }
}

async fn connect_primary(backend: &BackendConfig) -> Option<Arc<dyn PostRepository>> {
    match backend {
        #[cfg(feature = "rest")]
        BackendConfig::Rest(config) => {
            match writer_infra::RestPostRepository::new(config) {
                Ok(repo) => Some(Arc::new(repo) as Arc<dyn PostRepository>),
                Err(e) => {
                    tracing::error!(
                        "Failed to set up hosted table client: {}. Using in-memory fallback.",
                        e
                    );
                    None
                }
            }
        }
        #[cfg(not(feature = "rest"))]
        BackendConfig::Rest(_) => {
            tracing::warn!("POSTS_API_URL set but built without rest feature - using in-memory store");
            None
        }
        #[cfg(feature = "postgres")]
        BackendConfig::Postgres(config) => {
            match writer_infra::DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let repo = writer_infra::PostgresPostRepository::new(connections.main);
                    Some(Arc::new(repo) as Arc<dyn PostRepository>)
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    None
                }
            }
        }
        #[cfg(not(feature = "postgres"))]
        BackendConfig::Postgres(_) => {
            tracing::warn!("DATABASE_URL set but built without postgres feature - using in-memory store");
            None
        }
        BackendConfig::Memory => {
            tracing::warn!("No primary backend configured. Running in in-memory mode.");
            None
        }
    }
}
