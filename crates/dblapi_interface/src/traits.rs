//! Capability traits supplied by the host application.

use async_trait::async_trait;
use dblapi_core::{Embed, User};
use dblapi_error::DblResult;
use std::sync::Arc;

/// What the SDK needs from the host's chat-platform client.
///
/// Implement this over whatever library the bot runs on. Sharded bots
/// return per-shard counts from [`shard_guild_counts`](Self::shard_guild_counts);
/// single-process bots return `None` there and answer
/// [`current_guild_count`](Self::current_guild_count) directly.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    /// Guild count visible to this process.
    async fn current_guild_count(&self) -> DblResult<u64>;

    /// Guild count of every shard, or `None` when the bot is not sharded
    /// across processes.
    async fn shard_guild_counts(&self) -> DblResult<Option<Vec<u64>>>;

    /// Resolve an outgoing webhook from its id and token.
    async fn fetch_outgoing_webhook(
        &self,
        id: &str,
        token: &str,
    ) -> DblResult<Arc<dyn WebhookHandle>>;
}

/// An outgoing chat webhook able to post embeds.
#[async_trait]
pub trait WebhookHandle: Send + Sync {
    /// Webhook id.
    fn id(&self) -> &str;

    /// Post a single embed.
    async fn send_embed(&self, embed: &Embed) -> DblResult<()>;
}

/// Lookup of a voter's public profile.
#[async_trait]
pub trait VoterProfiles: Send + Sync {
    /// Fetch the profile of `user_id`.
    async fn voter_profile(&self, user_id: &str) -> DblResult<User>;
}

/// Destination of server count reports.
#[async_trait]
pub trait StatsSink: Send + Sync {
    /// Report `server_count` for `bot_id`.
    async fn post_server_count(&self, bot_id: &str, server_count: u64) -> DblResult<()>;
}
