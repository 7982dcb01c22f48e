//! Vote notification handling.

use crate::VoteEmbedDispatcher;
use axum::http::StatusCode;
use chrono::Utc;
use dblapi_core::Vote;
use dblapi_error::{ConfigError, DblResult};
use dblapi_interface::Listeners;
use dblapi_lock::VoteLockStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of handling one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// Listeners notified; the count is how many succeeded.
    Accepted(usize),
    /// Wrong or missing shared secret. Nothing happened.
    Unauthorized,
    /// Body was not a vote payload.
    Malformed(String),
}

impl VoteOutcome {
    /// HTTP status to answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Accepted(_) => StatusCode::OK,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Malformed(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Plain text response body.
    pub fn message(&self) -> &str {
        match self {
            Self::Accepted(_) => "OK",
            Self::Unauthorized => "Unauthorized",
            Self::Malformed(reason) => reason,
        }
    }
}

/// Authenticates vote notifications and fans them out.
///
/// The steps run in a fixed order: secret check, vote listeners, lock
/// upsert, then the embed dispatch as a detached task. Nothing after the
/// secret check runs for a request that fails it.
pub struct VoteReceiver {
    auth: String,
    votes: Arc<Listeners<Vote>>,
    lock: Option<Arc<VoteLockStore>>,
    dispatcher: Option<Arc<VoteEmbedDispatcher>>,
}

impl VoteReceiver {
    /// Receiver accepting requests whose `Authorization` header equals `auth`.
    #[track_caller]
    pub fn new(auth: impl Into<String>, votes: Arc<Listeners<Vote>>) -> DblResult<Self> {
        let auth = auth.into();
        if auth.is_empty() {
            return Err(ConfigError::new("No auth provided with port").into());
        }
        Ok(Self {
            auth,
            votes,
            lock: None,
            dispatcher: None,
        })
    }

    /// Record every accepted vote in `store`.
    pub fn with_lock(mut self, store: Arc<VoteLockStore>) -> Self {
        self.lock = Some(store);
        self
    }

    /// Announce every accepted vote through `dispatcher`.
    pub fn with_dispatcher(mut self, dispatcher: Arc<VoteEmbedDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Vote listeners.
    pub fn votes(&self) -> &Arc<Listeners<Vote>> {
        &self.votes
    }

    /// Whether `header` carries the shared secret, byte for byte.
    pub fn authorize(&self, header: Option<&[u8]>) -> bool {
        header == Some(self.auth.as_bytes())
    }

    /// Handle one notification.
    ///
    /// Listener and lock side effects are complete when this returns. The
    /// embed dispatch is spawned on the current Tokio runtime and may still
    /// be running; outside a runtime it is skipped with a warning.
    pub fn handle_vote_notification(
        &self,
        auth_header: Option<&[u8]>,
        body: &[u8],
    ) -> VoteOutcome {
        if !self.authorize(auth_header) {
            warn!("Rejected vote notification with bad authorization");
            return VoteOutcome::Unauthorized;
        }

        let vote: Vote = match serde_json::from_slice(body) {
            Ok(vote) => vote,
            Err(e) => {
                warn!(error = %e, "Rejected malformed vote notification");
                return VoteOutcome::Malformed(format!("Invalid vote payload: {}", e));
            }
        };
        if vote.user.trim().is_empty() {
            warn!("Rejected vote notification without a voter id");
            return VoteOutcome::Malformed("Missing voter id".to_string());
        }

        info!(voter = %vote.user, bot = %vote.bot, kind = ?vote.kind, "Received vote");
        let notified = self.votes.emit(&vote);

        if let Some(lock) = &self.lock {
            lock.upsert(&vote.user, Utc::now());
        }

        if let Some(dispatcher) = &self.dispatcher {
            match tokio::runtime::Handle::try_current() {
                Ok(runtime) => {
                    let dispatcher = Arc::clone(dispatcher);
                    runtime.spawn(async move { dispatcher.dispatch_logged(&vote).await });
                }
                Err(_) => warn!("No async runtime, skipping vote embed"),
            }
        } else {
            debug!("No vote embed configured");
        }

        VoteOutcome::Accepted(notified)
    }
}

impl std::fmt::Debug for VoteReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoteReceiver")
            .field("auth", &"<redacted>")
            .field("votes", &self.votes)
            .field("lock", &self.lock.is_some())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
