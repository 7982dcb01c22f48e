//! Posting embeds to a Discord webhook over plain HTTPS.

use async_trait::async_trait;
use dblapi_core::Embed;
use dblapi_error::{ConfigError, DblResult, WebhookError, WebhookErrorKind};
use dblapi_interface::WebhookHandle;
use serde_json::json;
use tracing::instrument;

/// Discord REST root used for webhook execution.
pub const DISCORD_API_URL: &str = "https://discord.com/api";

/// Split a webhook url into its `(id, token)` pair.
///
/// The id and token are the last two path segments.
///
/// ```
/// use dblapi_client::parse_webhook_url;
///
/// let (id, token) =
///     parse_webhook_url("https://discord.com/api/webhooks/1234/abcd").unwrap();
/// assert_eq!((id.as_str(), token.as_str()), ("1234", "abcd"));
/// assert!(parse_webhook_url("abcd").is_err());
/// ```
#[track_caller]
pub fn parse_webhook_url(url: &str) -> DblResult<(String, String)> {
    let mut segments = url.trim().trim_end_matches('/').rsplit('/');
    match (segments.next(), segments.next()) {
        (Some(token), Some(id)) if !token.is_empty() && !id.is_empty() && !id.contains(':') => {
            Ok((id.to_string(), token.to_string()))
        }
        _ => Err(WebhookError::new(WebhookErrorKind::InvalidUrl(url.to_string())).into()),
    }
}

/// A Discord webhook executed through the public REST API.
#[derive(Clone)]
pub struct DiscordWebhook {
    id: String,
    token: String,
    api_url: String,
    client: reqwest::Client,
}

impl DiscordWebhook {
    /// Create a handle from an id and token.
    #[track_caller]
    pub fn new(id: impl Into<String>, token: impl Into<String>) -> DblResult<Self> {
        let (id, token) = (id.into(), token.into());
        if id.is_empty() || token.is_empty() {
            return Err(ConfigError::new("Webhook id and token must not be empty").into());
        }
        Ok(Self {
            id,
            token,
            api_url: DISCORD_API_URL.to_string(),
            client: reqwest::Client::new(),
        })
    }

    /// Create a handle from a full webhook url.
    pub fn from_url(url: &str) -> DblResult<Self> {
        let (id, token) = parse_webhook_url(url)?;
        Self::new(id, token)
    }

    /// Send through another API root.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    fn execute_url(&self) -> String {
        format!(
            "{}/webhooks/{}/{}",
            self.api_url.trim_end_matches('/'),
            self.id,
            self.token
        )
    }
}

#[async_trait]
impl WebhookHandle for DiscordWebhook {
    fn id(&self) -> &str {
        &self.id
    }

    #[instrument(skip(self, embed), fields(webhook_id = %self.id))]
    async fn send_embed(&self, embed: &Embed) -> DblResult<()> {
        let response = self
            .client
            .post(self.execute_url())
            .json(&json!({ "embeds": [embed] }))
            .send()
            .await
            .map_err(|e| WebhookError::new(WebhookErrorKind::Dispatch(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "Webhook rejected embed");
            return Err(
                WebhookError::new(WebhookErrorKind::Dispatch(format!("status {}", status))).into(),
            );
        }

        tracing::debug!("Embed sent");
        Ok(())
    }
}

impl std::fmt::Debug for DiscordWebhook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordWebhook")
            .field("id", &self.id)
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}
