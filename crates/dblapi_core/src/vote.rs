//! Vote notifications and vote checks.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Kind of vote notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    /// A real vote
    #[default]
    Upvote,
    /// Sent by the "test" button on the listing's edit page
    Test,
    /// Anything the directory adds later
    #[serde(other)]
    Unknown,
}

/// Body of an inbound vote notification.
///
/// Unrecognised fields are kept in [`Vote::extra`] so listeners see the full
/// payload the directory sent.
///
/// ```
/// use dblapi_core::{Vote, VoteType};
///
/// let vote: Vote = serde_json::from_str(
///     r#"{"bot":"1","user":"42","type":"test","isWeekend":true,"source":"web"}"#,
/// ).unwrap();
/// assert_eq!(vote.user, "42");
/// assert_eq!(vote.kind, VoteType::Test);
/// assert!(vote.is_weekend);
/// assert_eq!(vote.extra["source"], "web");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    /// Id of the voter
    pub user: String,
    /// Id of the bot voted for
    #[serde(default)]
    pub bot: String,
    /// Vote kind
    #[serde(rename = "type", default)]
    pub kind: VoteType,
    /// Weekend votes count double
    #[serde(rename = "isWeekend", default)]
    pub is_weekend: bool,
    /// Query string of the vote page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Remaining payload fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `GET /bots/{id}/check`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCheck {
    /// Whether the user voted in the last 12 hours
    #[serde(deserialize_with = "bool_or_int")]
    pub voted: bool,
}

// The directory has answered with both `1`/`0` and `true`/`false`.
fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}
