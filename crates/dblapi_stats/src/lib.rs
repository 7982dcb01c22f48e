//! Server count reporting.
//!
//! [`StatsReporter`] reads the guild count from the host's
//! [`PlatformClient`](dblapi_interface::PlatformClient) and posts it to a
//! [`StatsSink`](dblapi_interface::StatsSink), once on demand or on a
//! recurring [`StatsSchedule`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod reporter;
mod schedule;

pub use reporter::StatsReporter;
pub use schedule::{DEFAULT_POST_INTERVAL_MS, MIN_POST_INTERVAL_MS, StatsSchedule};
