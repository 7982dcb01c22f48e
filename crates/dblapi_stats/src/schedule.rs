//! Posting schedule validation.

use dblapi_error::{ConfigError, DblResult};
use std::time::Duration;

/// Shortest interval the directory accepts between automatic posts.
pub const MIN_POST_INTERVAL_MS: u64 = 900_000;

/// Interval used when none is configured.
pub const DEFAULT_POST_INTERVAL_MS: u64 = 1_800_000;

/// When server counts are posted automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsSchedule {
    /// Only on explicit request.
    Manual,
    /// Immediately, then once per period.
    Every(Duration),
}

impl StatsSchedule {
    /// Validate a delay in milliseconds.
    ///
    /// `0` means manual posting only. Anything else must be at least
    /// [`MIN_POST_INTERVAL_MS`].
    ///
    /// ```
    /// use dblapi_stats::StatsSchedule;
    /// use std::time::Duration;
    ///
    /// assert_eq!(StatsSchedule::from_millis(0).unwrap(), StatsSchedule::Manual);
    /// assert!(StatsSchedule::from_millis(60_000).is_err());
    /// assert_eq!(
    ///     StatsSchedule::from_millis(900_000).unwrap().period(),
    ///     Some(Duration::from_secs(900))
    /// );
    /// ```
    #[track_caller]
    pub fn from_millis(delay_ms: u64) -> DblResult<Self> {
        match delay_ms {
            0 => Ok(Self::Manual),
            ms if ms < MIN_POST_INTERVAL_MS => Err(ConfigError::new(format!(
                "Delay must be at least {} ms (15 minutes) or 0 to disable, got {}",
                MIN_POST_INTERVAL_MS, ms
            ))
            .into()),
            ms => Ok(Self::Every(Duration::from_millis(ms))),
        }
    }

    /// Period between automatic posts, `None` when manual.
    pub fn period(&self) -> Option<Duration> {
        match self {
            Self::Manual => None,
            Self::Every(period) => Some(*period),
        }
    }
}

impl Default for StatsSchedule {
    fn default() -> Self {
        Self::Every(Duration::from_millis(DEFAULT_POST_INTERVAL_MS))
    }
}
