//! [`PlatformClient`] over serenity.

use async_trait::async_trait;
use dblapi_core::Embed;
use dblapi_error::{DblResult, PlatformError, WebhookError, WebhookErrorKind};
use dblapi_interface::{PlatformClient, WebhookHandle};
use serenity::builder::{CreateEmbed, CreateEmbedAuthor, ExecuteWebhook};
use serenity::cache::Cache;
use serenity::http::Http;
use serenity::model::id::WebhookId;
use serenity::model::webhook::Webhook;
use std::sync::Arc;
use tracing::instrument;

/// Guild counts from serenity's cache and webhooks through its HTTP client.
///
/// Serenity keeps every shard of a process in one cache, so the local count
/// already covers all shards and [`shard_guild_counts`](PlatformClient::shard_guild_counts)
/// returns `None`.
#[derive(Clone)]
pub struct SerenityPlatform {
    cache: Arc<Cache>,
    http: Arc<Http>,
}

impl SerenityPlatform {
    /// Wrap a cache and HTTP client.
    pub fn new(cache: Arc<Cache>, http: Arc<Http>) -> Self {
        Self { cache, http }
    }

    /// Take the cache and HTTP client from an event context.
    pub fn from_context(ctx: &serenity::client::Context) -> Self {
        Self::new(ctx.cache.clone(), ctx.http.clone())
    }
}

#[async_trait]
impl PlatformClient for SerenityPlatform {
    async fn current_guild_count(&self) -> DblResult<u64> {
        Ok(self.cache.guild_count() as u64)
    }

    async fn shard_guild_counts(&self) -> DblResult<Option<Vec<u64>>> {
        Ok(None)
    }

    #[instrument(skip(self, token))]
    async fn fetch_outgoing_webhook(
        &self,
        id: &str,
        token: &str,
    ) -> DblResult<Arc<dyn WebhookHandle>> {
        let webhook_id = id
            .parse::<u64>()
            .ok()
            .filter(|id| *id != 0)
            .ok_or_else(|| WebhookError::new(WebhookErrorKind::InvalidUrl(id.to_string())))?;
        let webhook = self
            .http
            .get_webhook_with_token(WebhookId::new(webhook_id), token)
            .await
            .map_err(|e| PlatformError::new(format!("Failed to fetch webhook {}: {}", id, e)))?;
        Ok(Arc::new(SerenityWebhook {
            id: id.to_string(),
            http: self.http.clone(),
            webhook,
        }))
    }
}

/// A webhook executed through serenity.
pub struct SerenityWebhook {
    id: String,
    http: Arc<Http>,
    webhook: Webhook,
}

#[async_trait]
impl WebhookHandle for SerenityWebhook {
    fn id(&self) -> &str {
        &self.id
    }

    async fn send_embed(&self, embed: &Embed) -> DblResult<()> {
        let message = ExecuteWebhook::new().embed(to_create_embed(embed));
        self.webhook
            .execute(self.http.as_ref(), false, message)
            .await
            .map_err(|e| WebhookError::new(WebhookErrorKind::Dispatch(e.to_string())))?;
        Ok(())
    }
}

fn to_create_embed(embed: &Embed) -> CreateEmbed {
    let mut create = CreateEmbed::new()
        .title(&embed.title)
        .colour(embed.color)
        .author(CreateEmbedAuthor::new(&embed.author.name).icon_url(&embed.author.icon_url));
    if !embed.thumbnail.url.is_empty() {
        create = create.thumbnail(&embed.thumbnail.url);
    }
    create.fields(
        embed
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone(), false)),
    )
}
