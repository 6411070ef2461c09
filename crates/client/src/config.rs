use std::env;

/// Client configuration loaded from environment variables.
///
/// The server URL and simulated latency are clap arguments with their
/// own env fallbacks; only settings without a CLI flag live here.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum number of query cache entries (default: 64)
    pub cache_max_entries: usize,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TODOSYNC_CACHE_MAX_ENTRIES` - Maximum cache entries (default: 64)
    pub fn from_env() -> Self {
        Self {
            cache_max_entries: env::var("TODOSYNC_CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(64),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
