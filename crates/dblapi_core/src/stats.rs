//! Bot server statistics.

use serde::{Deserialize, Serialize};

/// Stats as returned by `GET /bots/{id}/stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotStats {
    /// Total server count
    pub server_count: Option<u64>,
    /// Per-shard server counts
    pub shards: Vec<u64>,
    /// Number of shards
    pub shard_count: Option<u64>,
}

/// Body of `POST /bots/{id}/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsPost {
    /// Server count to report
    pub server_count: u64,
}
