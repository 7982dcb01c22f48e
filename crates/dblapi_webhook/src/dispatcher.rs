use crate::{VoteEmbedConfig, build_embed};
use dblapi_core::{Embed, Vote};
use dblapi_error::DblResult;
use dblapi_interface::{PlatformClient, VoterProfiles, WebhookHandle};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Sends an embed to the outgoing webhook for every vote.
pub struct VoteEmbedDispatcher {
    profiles: Arc<dyn VoterProfiles>,
    hook: Arc<dyn WebhookHandle>,
    config: VoteEmbedConfig,
}

impl VoteEmbedDispatcher {
    /// Dispatcher over an already resolved webhook.
    pub fn new(
        profiles: Arc<dyn VoterProfiles>,
        hook: Arc<dyn WebhookHandle>,
        config: VoteEmbedConfig,
    ) -> DblResult<Self> {
        config.validate()?;
        Ok(Self {
            profiles,
            hook,
            config,
        })
    }

    /// Resolve the webhook named by `config.url` through the platform client.
    #[instrument(skip_all)]
    pub async fn connect(
        profiles: Arc<dyn VoterProfiles>,
        platform: &dyn PlatformClient,
        config: VoteEmbedConfig,
    ) -> DblResult<Self> {
        config.validate()?;
        let (id, token) = config.webhook_parts()?;
        let hook = platform.fetch_outgoing_webhook(&id, &token).await?;
        info!(webhook_id = hook.id(), "Vote embed working on webhook");
        Self::new(profiles, hook, config)
    }

    /// Embed settings.
    pub fn config(&self) -> &VoteEmbedConfig {
        &self.config
    }

    /// Look up the voter and render their embed.
    pub async fn render(&self, voter_id: &str) -> DblResult<Embed> {
        let voter = self.profiles.voter_profile(voter_id).await?;
        Ok(build_embed(&self.config, &voter, voter_id))
    }

    /// Render and send the embed for `vote`.
    #[instrument(skip(self, vote), fields(voter = %vote.user))]
    pub async fn dispatch(&self, vote: &Vote) -> DblResult<()> {
        let embed = self.render(&vote.user).await?;
        self.hook.send_embed(&embed).await?;
        info!(webhook_id = self.hook.id(), "Sent vote embed");
        Ok(())
    }

    /// [`dispatch`](Self::dispatch), logging failures instead of returning them.
    pub async fn dispatch_logged(&self, vote: &Vote) {
        if let Err(e) = self.dispatch(vote).await {
            warn!(voter = %vote.user, error = %e, "Failed to send vote embed");
        }
    }
}

impl std::fmt::Debug for VoteEmbedDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoteEmbedDispatcher")
            .field("webhook_id", &self.hook.id())
            .field("title", self.config.title())
            .finish_non_exhaustive()
    }
}
