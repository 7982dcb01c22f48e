use crate::StatsSchedule;
use dblapi_error::{ConfigError, DblResult};
use dblapi_interface::{Listeners, PlatformClient, StatsSink};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info, instrument, warn};

/// Posts the bot's server count.
pub struct StatsReporter {
    sink: Arc<dyn StatsSink>,
    platform: Arc<dyn PlatformClient>,
    bot_id: String,
    posted: Arc<Listeners<u64>>,
}

impl StatsReporter {
    /// Creates a reporter for `bot_id`.
    ///
    /// `posted` receives every count that was accepted by the sink.
    #[track_caller]
    pub fn new(
        sink: Arc<dyn StatsSink>,
        platform: Arc<dyn PlatformClient>,
        bot_id: impl Into<String>,
        posted: Arc<Listeners<u64>>,
    ) -> DblResult<Self> {
        let bot_id = bot_id.into();
        if bot_id.trim().is_empty() {
            return Err(ConfigError::new("Missing required parameter: bot id").into());
        }
        Ok(Self {
            sink,
            platform,
            bot_id,
            posted,
        })
    }

    /// Bot the counts are posted for.
    pub fn bot_id(&self) -> &str {
        &self.bot_id
    }

    /// Current guild count, summed across shards when the bot is sharded.
    pub async fn server_count(&self) -> DblResult<u64> {
        match self.platform.shard_guild_counts().await? {
            Some(counts) => {
                debug!(shards = counts.len(), "Summing shard guild counts");
                Ok(counts.iter().fold(0u64, |total, c| total.saturating_add(*c)))
            }
            None => self.platform.current_guild_count().await,
        }
    }

    /// Read and post the server count once.
    ///
    /// Returns the posted count. Listeners are notified only after the sink
    /// accepted it.
    #[instrument(skip(self), fields(bot_id = %self.bot_id))]
    pub async fn report_now(&self) -> DblResult<u64> {
        let count = self.server_count().await?;
        self.sink.post_server_count(&self.bot_id, count).await?;
        info!(server_count = count, "Reported server count");
        self.posted.emit(&count);
        Ok(count)
    }

    /// Post on `schedule` in a background task.
    ///
    /// The first post happens right away. A rejected token stops the task;
    /// any other failure waits for the next tick. Returns `None` for
    /// [`StatsSchedule::Manual`] and for a zero period.
    pub fn spawn(self: Arc<Self>, schedule: StatsSchedule) -> Option<JoinHandle<()>> {
        let period = schedule.period()?;
        if period.is_zero() {
            warn!(bot_id = %self.bot_id, "Zero stats period, not starting timer");
            return None;
        }
        info!(bot_id = %self.bot_id, period_secs = period.as_secs(), "Starting stats timer");

        Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match self.report_now().await {
                    Ok(_) => {}
                    Err(e) if e.is_unauthorized() => {
                        error!(error = %e, "Directory rejected the token, stopping stats timer");
                        break;
                    }
                    Err(e) => warn!(error = %e, "Failed to post stats, retrying next tick"),
                }
            }
        }))
    }
}

impl std::fmt::Debug for StatsReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsReporter")
            .field("bot_id", &self.bot_id)
            .field("posted", &self.posted)
            .finish_non_exhaustive()
    }
}
