//! Connection settings for the directory API.

use dblapi_error::{ConfigError, DblResult};

/// Directory API root.
pub const DEFAULT_BASE_URL: &str = "https://discordbots.org/api";

/// Settings for [`DirectoryClient`](crate::DirectoryClient).
#[derive(Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// API root, e.g. "https://discordbots.org/api"
    pub base_url: String,
    /// Directory token sent as the `Authorization` header
    pub token: String,
}

impl DirectoryConfig {
    /// Create a configuration for the public directory.
    ///
    /// Fails when the token is empty.
    #[track_caller]
    pub fn new(token: impl Into<String>) -> DblResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::new("Missing required parameter: token").into());
        }
        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token,
        })
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `DBL_TOKEN` (required)
    /// - `DBL_BASE_URL` (default: "https://discordbots.org/api")
    pub fn from_env() -> DblResult<Self> {
        let token = std::env::var("DBL_TOKEN")
            .map_err(|_| ConfigError::new("DBL_TOKEN not set"))?;
        let config = Self::new(token)?;
        Ok(match std::env::var("DBL_BASE_URL") {
            Ok(base_url) => config.with_base_url(base_url),
            Err(_) => config,
        })
    }

    /// Point the client at another API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}
