use crate::{DirectoryConfig, widget};
use async_trait::async_trait;
use dblapi_core::{
    Bot, BotStats, BotsPage, BotsQuery, StatsPost, User, VoteCheck, Voter, WidgetOptions,
};
use dblapi_error::{ConfigError, DblResult, DirectoryError, DirectoryErrorKind};
use dblapi_interface::{StatsSink, VoterProfiles};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

/// Client for the bot-listing directory API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    config: DirectoryConfig,
    base: Url,
    client: reqwest::Client,
}

impl DirectoryClient {
    /// Create a new directory client.
    ///
    /// Fails when `config.base_url` is not an absolute URL.
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: DirectoryConfig) -> DblResult<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            ConfigError::new(format!("Invalid base url {}: {}", config.base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::new(format!("Invalid base url {}", config.base_url)).into());
        }
        tracing::debug!("Creating directory client");
        Ok(Self {
            config,
            base,
            client: reqwest::Client::new(),
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// GET `path` (relative to the API root) and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> DblResult<T> {
        self.get_with_query(path, &[]).await
    }

    /// POST a JSON body to `path` and decode the JSON response.
    pub async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &[&str],
        body: &B,
    ) -> DblResult<T> {
        let url = self.endpoint(path, &[]);
        let (status, bytes) = self.execute(Method::POST, &url, Some(body)).await?;
        decode(status, &bytes, &url)
    }

    /// Fetch a user profile.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> DblResult<User> {
        let id = require_id(id, "user id")?;
        self.get(&["users", id]).await
    }

    /// Fetch a bot listing.
    #[instrument(skip(self))]
    pub async fn get_bot(&self, id: &str) -> DblResult<Bot> {
        let id = require_id(id, "bot id")?;
        self.get(&["bots", id]).await
    }

    /// Fetch the last 1000 voters of a bot.
    #[instrument(skip(self))]
    pub async fn get_votes(&self, id: &str) -> DblResult<Vec<Voter>> {
        let id = require_id(id, "bot id")?;
        self.get(&["bots", id, "votes"]).await
    }

    /// Search bot listings.
    #[instrument(skip(self))]
    pub async fn get_bots(&self, query: &BotsQuery) -> DblResult<BotsPage> {
        self.get_with_query(&["bots"], &query.to_query_pairs()).await
    }

    /// Whether `user_id` voted for `bot_id` in the last 12 hours.
    #[instrument(skip(self))]
    pub async fn check_vote(&self, bot_id: &str, user_id: &str) -> DblResult<bool> {
        let bot_id = require_id(bot_id, "bot id")?;
        let user_id = require_id(user_id, "user id")?;
        let check: VoteCheck = self
            .get_with_query(&["bots", bot_id, "check"], &[("userId", user_id.to_string())])
            .await?;
        Ok(check.voted)
    }

    /// Fetch a bot's posted stats.
    #[instrument(skip(self))]
    pub async fn get_stats(&self, id: &str) -> DblResult<BotStats> {
        let id = require_id(id, "bot id")?;
        self.get(&["bots", id, "stats"]).await
    }

    /// Report a bot's server count.
    ///
    /// Unlike reads, an empty success body is accepted here and returned as
    /// `Value::Null`.
    #[instrument(skip(self))]
    pub async fn post_stats(&self, bot_id: &str, server_count: u64) -> DblResult<serde_json::Value> {
        let bot_id = require_id(bot_id, "bot id")?;
        let url = self.endpoint(&["bots", bot_id, "stats"], &[]);
        let body = StatsPost { server_count };
        let (status, bytes) = self.execute(Method::POST, &url, Some(&body)).await?;

        tracing::info!(status, server_count, "Posted stats");
        if is_blank(&bytes) {
            return Ok(serde_json::Value::Null);
        }
        decode(status, &bytes, &url)
    }

    /// Link to the listing widget of `id`, relative to this client's API root.
    pub fn widget_url(&self, id: &str, options: &WidgetOptions) -> DblResult<String> {
        widget::build(self.base.as_str(), id, options)
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: &[(&str, String)],
    ) -> DblResult<T> {
        let url = self.endpoint(path, query);
        let (status, bytes) = self.execute::<()>(Method::GET, &url, None).await?;
        decode(status, &bytes, &url)
    }

    fn endpoint(&self, path: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`, so the segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url
    }

    async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&B>,
    ) -> DblResult<(u16, Vec<u8>)> {
        tracing::debug!(%method, path = url.path(), "Sending directory request");

        let mut request = self
            .client
            .request(method, url.clone())
            .header(AUTHORIZATION, &self.config.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(path = url.path(), "Request failed: {}", e);
            DirectoryError::new(DirectoryErrorKind::Transport(e.to_string()))
        })?;

        let status = response.status().as_u16();
        if let Some(err) = DirectoryError::from_status(status, url.path()) {
            if *err.kind() == DirectoryErrorKind::Unauthorized {
                tracing::error!(path = url.path(), "Unauthorized, invalid directory token");
            } else {
                tracing::warn!(status, path = url.path(), "Directory returned an error");
            }
            return Err(err.into());
        }

        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(path = url.path(), "Failed to read response: {}", e);
            DirectoryError::new(DirectoryErrorKind::Transport(e.to_string()))
        })?;

        Ok((status, bytes.to_vec()))
    }
}

#[async_trait]
impl VoterProfiles for DirectoryClient {
    async fn voter_profile(&self, user_id: &str) -> DblResult<User> {
        self.get_user(user_id).await
    }
}

#[async_trait]
impl StatsSink for DirectoryClient {
    async fn post_server_count(&self, bot_id: &str, server_count: u64) -> DblResult<()> {
        self.post_stats(bot_id, server_count).await.map(|_| ())
    }
}

#[track_caller]
fn require_id<'a>(id: &'a str, what: &str) -> DblResult<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DirectoryError::new(DirectoryErrorKind::MissingId(what.to_string())).into());
    }
    Ok(id)
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

fn decode<T: DeserializeOwned>(status: u16, bytes: &[u8], url: &Url) -> DblResult<T> {
    if is_blank(bytes) {
        tracing::warn!(status, path = url.path(), "Directory returned an empty body");
        return Err(DirectoryError::new(DirectoryErrorKind::EmptyResponse(status)).into());
    }
    serde_json::from_slice(bytes).map_err(|e| {
        tracing::error!(path = url.path(), "Failed to parse response: {}", e);
        DirectoryError::new(DirectoryErrorKind::Deserialization(e.to_string())).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> DirectoryClient {
        DirectoryClient::new(DirectoryConfig::new("token").unwrap().with_base_url(base)).unwrap()
    }

    #[test]
    fn endpoint_joins_segments() {
        let c = client("https://discordbots.org/api");
        let url = c.endpoint(&["bots", "1", "check"], &[("userId", "42".to_string())]);
        assert_eq!(url.as_str(), "https://discordbots.org/api/bots/1/check?userId=42");
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let c = client("http://127.0.0.1:9000/api/");
        assert_eq!(c.endpoint(&["users", "7"], &[]).path(), "/api/users/7");
    }

    #[test]
    fn endpoint_escapes_segments() {
        let c = client("https://discordbots.org/api");
        assert_eq!(c.endpoint(&["users", "a/b"], &[]).path(), "/api/users/a%2Fb");
    }

    #[test]
    fn rejects_relative_base() {
        let config = DirectoryConfig::new("token").unwrap().with_base_url("discordbots.org");
        assert!(DirectoryClient::new(config).is_err());
    }

    #[test]
    fn require_id_rejects_blank() {
        assert!(require_id("  ", "user id").is_err());
        assert_eq!(require_id(" 42 ", "user id").unwrap(), "42");
    }
}
