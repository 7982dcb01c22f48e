//! # dblapi
//!
//! Stats posting, directory lookups and vote webhooks for the
//! discordbots.org bot listing.
//!
//! ```rust,no_run
//! use dblapi::{DblApiBuilder, DblApiOptions};
//!
//! # async fn run(platform: std::sync::Arc<dyn dblapi::PlatformClient>) -> dblapi::DblResult<()> {
//! let options = DblApiOptions::builder()
//!     .bot_id("264811613708746752")
//!     .port(5000u16)
//!     .auth("webhook-secret")
//!     .build()
//!     .map_err(|e| dblapi::ConfigError::new(e.to_string()))?;
//!
//! let api = DblApiBuilder::new("directory-token")
//!     .options(options)
//!     .client(platform)
//!     .on_vote(|vote| {
//!         println!("{} voted", vote.user);
//!         Ok(())
//!     })
//!     .build()
//!     .await?;
//!
//! let bot = api.get_bot("264811613708746752").await?;
//! println!("{} has {} votes", bot.username, bot.points);
//! # Ok(())
//! # }
//! ```
//!
//! The crates behind the facade can be used on their own:
//!
//! - `dblapi_client`: directory REST client and widget urls
//! - `dblapi_stats`: server count reporting
//! - `dblapi_webhook`: vote endpoint and vote embeds
//! - `dblapi_lock`: recent voter tracking

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod logging;
mod options;

#[cfg(feature = "discord")]
mod discord;

pub use api::{DblApi, DblApiBuilder};
pub use logging::{LoggingConfig, init_logging};
pub use options::{DblApiOptions, DblApiOptionsBuilder};

#[cfg(feature = "discord")]
pub use discord::{SerenityPlatform, SerenityWebhook};

pub use dblapi_client::{
    DEFAULT_BASE_URL, DirectoryClient, DirectoryConfig, DiscordWebhook, parse_webhook_url,
    widget_url,
};
pub use dblapi_core::{
    Bot, BotStats, BotsPage, BotsQuery, BotsQueryBuilder, Embed, EmbedAuthor, EmbedField,
    EmbedThumbnail, FieldTemplate, Social, User, Vote, VoteCheck, VoteType, Voter,
    WidgetOptions, WidgetOptionsBuilder,
};
pub use dblapi_error::{
    ConfigError, DblError, DblErrorKind, DblResult, DirectoryError, DirectoryErrorKind,
    PlatformError, VoteLockError, VoteLockErrorKind, WebhookError, WebhookErrorKind,
};
pub use dblapi_interface::{
    ListenerError, ListenerResult, Listeners, PlatformClient, StatsSink, VoterProfiles,
    WebhookHandle,
};
pub use dblapi_lock::{VoteLockConfig, VoteLockStore};
pub use dblapi_stats::{MIN_POST_INTERVAL_MS, StatsReporter, StatsSchedule};
pub use dblapi_webhook::{VoteEmbedConfig, VoteEmbedDispatcher, VoteReceiver, WebhookServer};
