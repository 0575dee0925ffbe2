use std::time::Duration;

/// Connection settings for the hosted table backend.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project URL, e.g. `https://xyzcompany.example.co`.
    pub url: String,
    /// Anonymous / service key sent as `apikey` and bearer token.
    pub api_key: String,
    /// Table holding the posts.
    pub table: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RestConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            table: "posts".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Returns `None` when `POSTS_API_URL` is not set.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var("POSTS_API_URL").ok()?;

        Some(Self {
            url,
            api_key: std::env::var("POSTS_API_KEY").unwrap_or_default(),
            table: std::env::var("POSTS_TABLE").unwrap_or_else(|_| "posts".to_string()),
            timeout: Duration::from_secs(
                std::env::var("POSTS_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        })
    }
}
