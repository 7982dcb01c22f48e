//! Vote embed settings and rendering.

use dblapi_client::parse_webhook_url;
use dblapi_core::{DEFAULT_AVATAR_URL, Embed, EmbedAuthor, EmbedThumbnail, FieldTemplate, User};
use dblapi_error::{ConfigError, DblResult};
use derive_getters::Getters;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Title used when none is configured.
pub const DEFAULT_VOTE_TITLE: &str = "New Vote!";

const FALLBACK_AUTHOR: &str = "New Vote";

/// How vote embeds look and where they go.
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
#[setters(prefix = "with_")]
#[builder(setter(into))]
pub struct VoteEmbedConfig {
    /// Outgoing webhook url, ending in `{id}/{token}`
    url: String,

    /// Field templates; `{user}` and `{id}` are filled per vote
    #[serde(default)]
    #[builder(default, setter(strip_option))]
    fields: Option<Vec<FieldTemplate>>,

    /// Embed title
    #[serde(default = "default_title")]
    #[builder(default = "default_title()")]
    title: String,

    /// Sidebar colour as hex, random when absent
    #[serde(default)]
    #[builder(default, setter(strip_option))]
    color: Option<String>,

    /// Thumbnail image url
    #[serde(default)]
    #[builder(default, setter(strip_option))]
    thumbnail: Option<String>,
}

fn default_title() -> String {
    DEFAULT_VOTE_TITLE.to_string()
}

impl VoteEmbedConfig {
    /// Config posting to `url` with default look.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            fields: None,
            title: default_title(),
            color: None,
            thumbnail: None,
        }
    }

    /// Creates a new config builder.
    pub fn builder() -> VoteEmbedConfigBuilder {
        VoteEmbedConfigBuilder::default()
    }

    /// Webhook `(id, token)` taken from the url.
    pub fn webhook_parts(&self) -> DblResult<(String, String)> {
        parse_webhook_url(&self.url)
    }

    /// Reject configs that could never render.
    ///
    /// The url must end in `{id}/{token}`. When templates are given there
    /// must be at least one, each with a non-empty name and value.
    #[track_caller]
    pub fn validate(&self) -> DblResult<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::new("Webhook url must be provided when using voteEmbed").into());
        }
        if parse_webhook_url(&self.url).is_err() {
            return Err(ConfigError::new(format!("Invalid vote embed webhook url: {}", self.url)).into());
        }
        if let Some(fields) = &self.fields {
            if fields.is_empty() {
                return Err(ConfigError::new("Vote embed fields must contain at least one entry").into());
            }
            if let Some(index) = fields
                .iter()
                .position(|f| f.name.is_empty() || f.value.is_empty())
            {
                return Err(ConfigError::new(format!(
                    "Vote embed field {} does not have a name or value",
                    index
                ))
                .into());
            }
        }
        Ok(())
    }
}

/// Parse a hex colour such as `ff0000`, `#ff0000` or `0xff0000`.
///
/// ```
/// use dblapi_webhook::parse_color;
///
/// assert_eq!(parse_color("#00ff00"), Some(0x00ff00));
/// assert_eq!(parse_color("fff"), Some(0xfff));
/// assert_eq!(parse_color("red"), None);
/// assert_eq!(parse_color("1000000"), None);
/// ```
pub fn parse_color(hex: &str) -> Option<u32> {
    let hex = hex.trim();
    let digits = hex
        .strip_prefix('#')
        .or_else(|| hex.strip_prefix("0x"))
        .unwrap_or(hex);
    u32::from_str_radix(digits, 16)
        .ok()
        .filter(|color| *color <= 0xFF_FFFF)
}

/// Render the embed announcing a vote by `voter_id`.
pub fn build_embed(config: &VoteEmbedConfig, voter: &User, voter_id: &str) -> Embed {
    let icon_url = match voter.avatar.as_deref() {
        Some(hash) if !hash.is_empty() => {
            format!("https://cdn.discordapp.com/avatars/{}/{}.png", voter_id, hash)
        }
        _ => DEFAULT_AVATAR_URL.to_string(),
    };
    let name = if voter.username.is_empty() {
        FALLBACK_AUTHOR.to_string()
    } else {
        voter.username.clone()
    };
    let title = if config.title.is_empty() {
        default_title()
    } else {
        config.title.clone()
    };
    let color = config
        .color
        .as_deref()
        .and_then(parse_color)
        .unwrap_or_else(|| rand::thread_rng().gen_range(0..=0xFF_FFFF));
    let fields = config
        .fields
        .iter()
        .flatten()
        .map(|template| template.render(&voter.username, voter_id))
        .collect();

    Embed {
        author: EmbedAuthor { name, icon_url },
        title,
        color,
        thumbnail: EmbedThumbnail {
            url: config.thumbnail.clone().unwrap_or_default(),
        },
        fields,
    }
}
