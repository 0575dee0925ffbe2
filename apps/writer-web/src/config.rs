//! Application configuration loaded from environment variables.

use std::env;

use writer_infra::{DatabaseConfig, RestConfig};

/// Where posts are stored when the primary store is reachable.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// Hosted table over REST (`POSTS_API_URL`).
    Rest(RestConfig),
    /// Direct PostgreSQL connection (`DATABASE_URL`).
    Postgres(DatabaseConfig),
    /// No primary store; the in-memory store is authoritative.
    Memory,
}

impl BackendConfig {
    pub fn name(&self) -> &'static str {
        match self {
            BackendConfig::Rest(_) => "rest",
            BackendConfig::Postgres(_) => "postgres",
            BackendConfig::Memory => "memory",
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub backend: BackendConfig,
    /// Author recorded on posts created without a user id.
    pub default_author: String,
    /// Seed the in-memory store with the development posts.
    pub seed_fixtures: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let backend = if let Some(rest) = RestConfig::from_env() {
            BackendConfig::Rest(rest)
        } else if let Some(database) = DatabaseConfig::from_env() {
            BackendConfig::Postgres(database)
        } else {
            BackendConfig::Memory
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            backend,
            default_author: env::var("DEFAULT_AUTHOR_ID")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| "user-1".to_string()),
            seed_fixtures: env::var("SEED_FIXTURES")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }
}
