//! Expiring voter set.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Shortest interval the background sweeper runs at.
pub const MIN_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(1);

/// Voters mapped to the time of their latest vote.
///
/// One entry per voter; a repeat vote overwrites the timestamp.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use dblapi_lock::VoteLockStore;
///
/// let store = VoteLockStore::new(Duration::hours(12));
/// let now = Utc::now();
/// store.upsert("42", now - Duration::hours(13));
/// store.upsert("43", now - Duration::hours(1));
///
/// assert!(!store.is_locked_at("42", store.lock_duration(), now));
/// assert!(store.is_locked_at("43", store.lock_duration(), now));
///
/// assert_eq!(store.sweep(now, store.lock_duration()), 1);
/// assert_eq!(store.list(), vec!["43".to_string()]);
/// ```
#[derive(Debug)]
pub struct VoteLockStore {
    lock_duration: Duration,
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl VoteLockStore {
    /// Create an empty store whose sweeper expires entries after `lock_duration`.
    pub fn new(lock_duration: Duration) -> Self {
        tracing::debug!(lock_secs = lock_duration.num_seconds(), "Creating vote lock store");
        Self {
            lock_duration,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Lock duration used by the background sweeper.
    pub fn lock_duration(&self) -> Duration {
        self.lock_duration
    }

    /// Record a vote; last write wins.
    pub fn upsert(&self, voter_id: &str, at: DateTime<Utc>) {
        let previous = self.entries.write().insert(voter_id.to_string(), at);
        tracing::debug!(voter_id, repeat = previous.is_some(), "Recorded vote lock");
    }

    /// Time of the voter's latest recorded vote.
    pub fn last_vote(&self, voter_id: &str) -> Option<DateTime<Utc>> {
        self.entries.read().get(voter_id).copied()
    }

    /// Whether the voter voted within `lock_duration` of now.
    pub fn is_locked(&self, voter_id: &str, lock_duration: Duration) -> bool {
        self.is_locked_at(voter_id, lock_duration, Utc::now())
    }

    /// Whether the voter voted within `lock_duration` of `now`.
    pub fn is_locked_at(&self, voter_id: &str, lock_duration: Duration, now: DateTime<Utc>) -> bool {
        self.last_vote(voter_id)
            .is_some_and(|at| now.signed_duration_since(at) <= lock_duration)
    }

    /// Ids of every tracked voter, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Remove every entry older than `lock_duration` at `now`.
    ///
    /// Returns the number of removed entries.
    pub fn sweep(&self, now: DateTime<Utc>, lock_duration: Duration) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, at| now.signed_duration_since(*at) <= lock_duration);
        let removed = before - entries.len();

        if removed > 0 {
            tracing::info!(removed, remaining = entries.len(), "Swept expired vote locks");
        }
        removed
    }

    /// Number of tracked voters.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when no voter is tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Sweep every `every` on the current runtime.
    ///
    /// The first sweep runs one interval after the call. The task ends on
    /// its own once the store is dropped. A zero interval is raised to
    /// [`MIN_SWEEP_INTERVAL`].
    pub fn spawn_sweeper(self: &Arc<Self>, every: std::time::Duration) -> JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);
        let every = if every.is_zero() {
            tracing::warn!(
                every_secs = MIN_SWEEP_INTERVAL.as_secs(),
                "Zero sweep interval, using minimum"
            );
            MIN_SWEEP_INTERVAL
        } else {
            every
        };
        tracing::info!(every_secs = every.as_secs(), "Starting vote lock sweeper");

        tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    tracing::debug!("Vote lock store dropped, stopping sweeper");
                    break;
                };
                store.sweep(Utc::now(), store.lock_duration);
            }
        })
    }
}
