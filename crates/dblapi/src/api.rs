//! The SDK entry point.

use crate::DblApiOptions;
use dblapi_client::{DirectoryClient, DirectoryConfig};
use dblapi_core::{Bot, BotStats, BotsPage, BotsQuery, User, Vote, Voter, WidgetOptions};
use dblapi_error::{ConfigError, DblResult, VoteLockError, VoteLockErrorKind};
use dblapi_interface::{ListenerResult, Listeners, PlatformClient, WebhookHandle};
use dblapi_lock::VoteLockStore;
use dblapi_stats::{StatsReporter, StatsSchedule};
use dblapi_webhook::{VoteEmbedDispatcher, VoteReceiver, WebhookServer, create_router};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

/// Collects settings and listeners, then starts a [`DblApi`].
pub struct DblApiBuilder {
    token: String,
    options: DblApiOptions,
    platform: Option<Arc<dyn PlatformClient>>,
    webhook: Option<Arc<dyn WebhookHandle>>,
    votes: Arc<Listeners<Vote>>,
    posted: Arc<Listeners<u64>>,
}

impl DblApiBuilder {
    /// Start with the directory token and default options.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            options: DblApiOptions::default(),
            platform: None,
            webhook: None,
            votes: Arc::new(Listeners::new("vote")),
            posted: Arc::new(Listeners::new("posted")),
        }
    }

    /// Replace the options.
    pub fn options(mut self, options: DblApiOptions) -> Self {
        self.options = options;
        self
    }

    /// The bot's chat-platform client. Needed for stats posting and for
    /// resolving the vote embed webhook.
    pub fn client(mut self, platform: Arc<dyn PlatformClient>) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Send vote embeds through `webhook` instead of resolving the configured
    /// url through the platform client.
    pub fn webhook(mut self, webhook: Arc<dyn WebhookHandle>) -> Self {
        self.webhook = Some(webhook);
        self
    }

    /// Register a vote listener before the webhook starts.
    pub fn on_vote<F>(self, handler: F) -> Self
    where
        F: Fn(&Vote) -> ListenerResult + Send + Sync + 'static,
    {
        self.votes.register(handler);
        self
    }

    /// Register a listener for posted server counts.
    pub fn on_stats_posted<F>(self, handler: F) -> Self
    where
        F: Fn(&u64) -> ListenerResult + Send + Sync + 'static,
    {
        self.posted.register(handler);
        self
    }

    /// Validate the settings and start every configured background task.
    ///
    /// # Errors
    ///
    /// - empty token
    /// - a port without `auth`
    /// - a delay between 0 and 15 minutes
    /// - automatic stats posting without a bot id
    /// - a vote embed without a platform client or webhook, or with bad templates
    /// - a port that cannot be bound
    #[instrument(skip(self))]
    pub async fn build(self) -> DblResult<DblApi> {
        let Self {
            token,
            options,
            platform,
            webhook,
            votes,
            posted,
        } = self;

        let directory = DirectoryClient::new(
            DirectoryConfig::new(token)?.with_base_url(options.base_url().clone()),
        )?;
        let schedule = StatsSchedule::from_millis(*options.delay_ms())?;

        let auth = match (options.port(), options.auth().as_deref()) {
            (Some(_), None | Some("")) => {
                return Err(ConfigError::new("No auth provided with port").into());
            }
            (_, auth) => auth.map(str::to_string),
        };

        let dispatcher = match options.vote_embed() {
            Some(embed) => {
                let profiles = Arc::new(directory.clone());
                let dispatcher = match (&webhook, &platform) {
                    (Some(hook), _) => {
                        VoteEmbedDispatcher::new(profiles, hook.clone(), embed.clone())?
                    }
                    (None, Some(platform)) => {
                        VoteEmbedDispatcher::connect(profiles, platform.as_ref(), embed.clone())
                            .await?
                    }
                    (None, None) => {
                        return Err(ConfigError::new(
                            "You must provide a client to use the voteEmbed feature",
                        )
                        .into());
                    }
                };
                if options.port().is_none() {
                    warn!("Vote embed configured without a port, no votes will arrive");
                }
                Some(Arc::new(dispatcher))
            }
            None => None,
        };

        let reporter = match (&platform, options.bot_id()) {
            (Some(platform), Some(bot_id)) => Some(Arc::new(StatsReporter::new(
                Arc::new(directory.clone()),
                platform.clone(),
                bot_id.clone(),
                posted.clone(),
            )?)),
            (Some(_), None) if schedule != StatsSchedule::Manual => {
                return Err(ConfigError::new(
                    "Missing required parameter: bot_id for automatic stats posting",
                )
                .into());
            }
            _ => None,
        };

        let lock = if *options.vote_lock().on() {
            options.vote_lock().validate()?;
            Some(Arc::new(VoteLockStore::new(options.vote_lock().lock_duration())))
        } else {
            None
        };

        let server = match (options.port(), auth) {
            (Some(port), Some(auth)) => {
                let mut receiver = VoteReceiver::new(auth, votes.clone())?;
                if let Some(lock) = &lock {
                    receiver = receiver.with_lock(lock.clone());
                }
                if let Some(dispatcher) = &dispatcher {
                    receiver = receiver.with_dispatcher(dispatcher.clone());
                }
                let router = create_router(Arc::new(receiver), options.path())?;
                let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, *port));
                Some(WebhookServer::bind(addr, router).await?)
            }
            _ => None,
        };

        let mut tasks = Vec::new();
        if let Some(lock) = &lock {
            tasks.push(lock.spawn_sweeper(options.vote_lock().sweep_interval()));
        }
        if let Some(reporter) = &reporter
            && let Some(handle) = reporter.clone().spawn(schedule)
        {
            tasks.push(handle);
        }

        Ok(DblApi {
            options,
            directory,
            votes,
            posted,
            reporter,
            lock,
            server,
            tasks,
        })
    }
}

impl std::fmt::Debug for DblApiBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DblApiBuilder")
            .field("options", &self.options)
            .field("client", &self.platform.is_some())
            .field("webhook", &self.webhook.is_some())
            .finish_non_exhaustive()
    }
}

/// A running SDK instance.
///
/// Owns its webhook listener and timers. Dropping it stops them;
/// [`shutdown`](Self::shutdown) additionally lets in-flight vote requests
/// finish.
pub struct DblApi {
    options: DblApiOptions,
    directory: DirectoryClient,
    votes: Arc<Listeners<Vote>>,
    posted: Arc<Listeners<u64>>,
    reporter: Option<Arc<StatsReporter>>,
    lock: Option<Arc<VoteLockStore>>,
    server: Option<WebhookServer>,
    tasks: Vec<JoinHandle<()>>,
}

impl DblApi {
    /// Shorthand for [`DblApiBuilder::new`].
    pub fn builder(token: impl Into<String>) -> DblApiBuilder {
        DblApiBuilder::new(token)
    }

    /// Options the instance was built with.
    pub fn options(&self) -> &DblApiOptions {
        &self.options
    }

    /// The directory client.
    pub fn directory(&self) -> &DirectoryClient {
        &self.directory
    }

    /// Register a vote listener.
    pub fn on_vote<F>(&self, handler: F)
    where
        F: Fn(&Vote) -> ListenerResult + Send + Sync + 'static,
    {
        self.votes.register(handler);
    }

    /// Register a listener for posted server counts.
    pub fn on_stats_posted<F>(&self, handler: F)
    where
        F: Fn(&u64) -> ListenerResult + Send + Sync + 'static,
    {
        self.posted.register(handler);
    }

    /// Post the server count now.
    pub async fn post_stats(&self) -> DblResult<u64> {
        match &self.reporter {
            Some(reporter) => reporter.report_now().await,
            None => Err(ConfigError::new("No client or bot_id provided in constructor").into()),
        }
    }

    /// Fetch a user profile.
    pub async fn get_user(&self, id: &str) -> DblResult<User> {
        self.directory.get_user(id).await
    }

    /// Fetch a bot listing.
    pub async fn get_bot(&self, id: &str) -> DblResult<Bot> {
        self.directory.get_bot(id).await
    }

    /// Fetch the last 1000 voters of a bot.
    pub async fn get_votes(&self, id: &str) -> DblResult<Vec<Voter>> {
        self.directory.get_votes(id).await
    }

    /// Search the listing.
    pub async fn get_bots(&self, query: &BotsQuery) -> DblResult<BotsPage> {
        self.directory.get_bots(query).await
    }

    /// Whether `user_id` voted for `bot_id` in the last 12 hours.
    pub async fn check_vote(&self, bot_id: &str, user_id: &str) -> DblResult<bool> {
        self.directory.check_vote(bot_id, user_id).await
    }

    /// Fetch a bot's posted stats.
    pub async fn get_stats(&self, id: &str) -> DblResult<BotStats> {
        self.directory.get_stats(id).await
    }

    /// Link to a bot's listing widget.
    pub fn widget_url(&self, id: &str, options: &WidgetOptions) -> DblResult<String> {
        self.directory.widget_url(id, options)
    }

    /// The vote lock store.
    #[track_caller]
    pub fn vote_lock(&self) -> DblResult<&Arc<VoteLockStore>> {
        self.lock
            .as_ref()
            .ok_or_else(|| VoteLockError::new(VoteLockErrorKind::Disabled).into())
    }

    /// Whether `user_id` voted within the configured lock timeout.
    pub fn is_locked(&self, user_id: &str) -> DblResult<bool> {
        let lock = self.vote_lock()?;
        Ok(lock.is_locked(user_id, lock.lock_duration()))
    }

    /// Ids of every voter currently tracked.
    pub fn locked_voters(&self) -> DblResult<Vec<String>> {
        Ok(self.vote_lock()?.list())
    }

    /// Address the vote webhook is bound to.
    pub fn webhook_addr(&self) -> Option<SocketAddr> {
        self.server.as_ref().map(WebhookServer::local_addr)
    }

    /// Stop the timers and the vote webhook.
    pub async fn shutdown(mut self) -> DblResult<()> {
        for task in self.tasks.drain(..) {
            task.abort();
        }
        if let Some(server) = self.server.take() {
            server.shutdown().await?;
        }
        info!("dblapi stopped");
        Ok(())
    }
}

impl Drop for DblApi {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl std::fmt::Debug for DblApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DblApi")
            .field("options", &self.options)
            .field("directory", &self.directory)
            .field("webhook_addr", &self.webhook_addr())
            .field("tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}
