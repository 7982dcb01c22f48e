//! Construction-time settings.

use config::{Config, Environment, File};
use dblapi_client::DEFAULT_BASE_URL;
use dblapi_error::{ConfigError, DblError, DblResult};
use dblapi_lock::VoteLockConfig;
use dblapi_stats::DEFAULT_POST_INTERVAL_MS;
use dblapi_webhook::{DEFAULT_VOTE_PATH, VoteEmbedConfig};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Everything [`DblApi`](crate::DblApi) reads when it is built.
///
/// # Example
///
/// ```
/// use dblapi::DblApiOptions;
///
/// let options = DblApiOptions::builder()
///     .bot_id("264811613708746752")
///     .port(5000u16)
///     .auth("secret")
///     .build()
///     .unwrap();
/// assert_eq!(*options.delay_ms(), 1_800_000);
/// assert_eq!(options.path(), "vote");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[serde(default)]
#[setters(prefix = "with_")]
#[builder(default, setter(into))]
pub struct DblApiOptions {
    /// Listing id stats are posted for
    #[builder(setter(into, strip_option))]
    bot_id: Option<String>,

    /// Milliseconds between automatic stats posts, `0` for manual only
    delay_ms: u64,

    /// Port of the vote webhook, none to disable it
    #[builder(setter(into, strip_option))]
    port: Option<u16>,

    /// Shared secret the directory sends with every vote
    #[builder(setter(into, strip_option))]
    auth: Option<String>,

    /// Path of the vote webhook
    path: String,

    /// Announce votes as chat embeds
    #[builder(setter(into, strip_option))]
    vote_embed: Option<VoteEmbedConfig>,

    /// Track recent voters
    vote_lock: VoteLockConfig,

    /// Directory API root
    base_url: String,
}

impl Default for DblApiOptions {
    fn default() -> Self {
        Self {
            bot_id: None,
            delay_ms: DEFAULT_POST_INTERVAL_MS,
            port: None,
            auth: None,
            path: DEFAULT_VOTE_PATH.to_string(),
            vote_embed: None,
            vote_lock: VoteLockConfig::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl DblApiOptions {
    /// Creates a new options builder.
    pub fn builder() -> DblApiOptionsBuilder {
        DblApiOptionsBuilder::default()
    }

    /// Load options from a TOML file, then `DBLAPI_*` environment variables.
    ///
    /// Nested keys use a double underscore, e.g. `DBLAPI_VOTE_LOCK__ON=true`.
    /// Environment values stay strings until deserialized, so a numeric
    /// secret such as `DBLAPI_AUTH=007` keeps its leading zeros.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> DblResult<Self> {
        debug!("Loading options from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("DBLAPI")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| {
                DblError::from(ConfigError::new(format!(
                    "Failed to read options from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                DblError::from(ConfigError::new(format!("Failed to parse options: {}", e)))
            })
    }
}
