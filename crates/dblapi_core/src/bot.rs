//! Directory bot listings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A bot listing as returned by `GET /bots/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bot {
    /// Snowflake id
    pub id: String,
    /// Bot username
    pub username: String,
    /// Legacy four digit discriminator
    pub discriminator: String,
    /// Avatar hash
    pub avatar: Option<String>,
    /// Default avatar hash
    #[serde(rename = "defAvatar")]
    pub def_avatar: Option<String>,
    /// Library the bot is written with
    pub lib: String,
    /// Command prefix
    pub prefix: String,
    /// Short description
    pub shortdesc: String,
    /// Long description, may contain markdown or HTML
    pub longdesc: Option<String>,
    /// Listing tags
    pub tags: Vec<String>,
    /// Website url
    pub website: Option<String>,
    /// Support server invite code
    pub support: Option<String>,
    /// Source repository url
    pub github: Option<String>,
    /// Owner ids, main owner first
    pub owners: Vec<String>,
    /// Featured guild ids
    pub guilds: Vec<String>,
    /// Custom invite url
    pub invite: Option<String>,
    /// Listing date
    pub date: Option<String>,
    /// Certified by the directory
    #[serde(rename = "certifiedBot")]
    pub certified_bot: bool,
    /// Vanity url slug
    pub vanity: Option<String>,
    /// All-time vote count
    pub points: u64,
    /// Votes this month
    #[serde(rename = "monthlyPoints")]
    pub monthly_points: u64,
    /// Last posted server count
    pub server_count: Option<u64>,
    /// Last posted shard count
    pub shard_count: Option<u64>,
}

/// A page of bots returned by `GET /bots`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotsPage {
    /// Matching bots
    pub results: Vec<Bot>,
    /// Page size used
    pub limit: u64,
    /// Offset used
    pub offset: u64,
    /// Number of results on this page
    pub count: u64,
    /// Total matching bots
    pub total: u64,
}

/// A user who voted for a bot, from `GET /bots/{id}/votes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Voter {
    /// Snowflake id
    pub id: String,
    /// Username
    pub username: String,
    /// Legacy four digit discriminator
    pub discriminator: String,
    /// Avatar hash
    pub avatar: Option<String>,
}

/// Query parameters for `GET /bots`.
///
/// # Examples
///
/// ```
/// use dblapi_core::BotsQuery;
///
/// let query = BotsQuery::builder()
///     .limit(10u32)
///     .search("lib:serenity")
///     .fields(vec!["id".to_string(), "username".to_string()])
///     .build()
///     .unwrap();
///
/// let pairs = query.to_query_pairs();
/// assert_eq!(pairs[0], ("limit", "10".to_string()));
/// assert_eq!(pairs[2], ("fields", "id,username".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(default, setter(into, strip_option))]
pub struct BotsQuery {
    /// Page size
    limit: Option<u32>,
    /// Number of bots to skip
    offset: Option<u32>,
    /// Search expression, e.g. `lib:serenity`
    search: Option<String>,
    /// Field to sort by, prefix `-` for descending
    sort: Option<String>,
    /// Fields to include in each result
    fields: Option<Vec<String>>,
}

impl BotsQuery {
    /// Creates a new query builder.
    pub fn builder() -> BotsQueryBuilder {
        BotsQueryBuilder::default()
    }

    /// Supplied parameters in a stable order; absent ones are omitted.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(fields) = &self.fields
            && !fields.is_empty()
        {
            pairs.push(("fields", fields.join(",")));
        }
        pairs
    }
}
