//! Client configuration loaded from environment variables.
//!
//! All settings have defaults so the client starts with zero configuration
//! during development.

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend this client talks to.
    /// Env: `VOXA_SERVER_URL`
    /// Default: `http://localhost:5000`
    pub server_url: String,

    /// Capacity of the feed event channel between the backend adapter and
    /// the bridge task.
    /// Env: `VOXA_FEED_BUFFER`
    /// Default: `64`
    pub feed_buffer: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            feed_buffer: 64,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("VOXA_SERVER_URL") {
            if !url.trim().is_empty() {
                config.server_url = url;
            }
        }

        if let Ok(val) = std::env::var("VOXA_FEED_BUFFER") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.feed_buffer = n,
                _ => {
                    tracing::warn!(value = %val, "Invalid VOXA_FEED_BUFFER, using default");
                }
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}
