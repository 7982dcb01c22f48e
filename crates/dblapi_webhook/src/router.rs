//! HTTP routing for the vote endpoint.

use crate::VoteReceiver;
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, header::AUTHORIZATION},
    response::IntoResponse,
    routing::post,
};
use dblapi_error::{ConfigError, DblResult};
use std::sync::Arc;

/// Path the endpoint listens on when none is configured.
pub const DEFAULT_VOTE_PATH: &str = "vote";

/// Turn a configured path into a route, e.g. `vote` into `/vote`.
///
/// ```
/// use dblapi_webhook::normalize_path;
///
/// assert_eq!(normalize_path("/vote/").unwrap(), "/vote");
/// assert_eq!(normalize_path("hooks/dbl").unwrap(), "/hooks/dbl");
/// assert_eq!(normalize_path("").unwrap(), "/");
/// assert!(normalize_path("votes/:id").is_err());
/// ```
#[track_caller]
pub fn normalize_path(path: &str) -> DblResult<String> {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.contains([':', '*', '{', '}', '?', '#']) {
        return Err(ConfigError::new(format!("Invalid webhook path: {}", path)).into());
    }
    Ok(format!("/{}", trimmed))
}

/// Router serving `POST /{path}` and `POST /{path}/`.
pub fn create_router(receiver: Arc<VoteReceiver>, path: &str) -> DblResult<Router> {
    let route = normalize_path(path)?;
    let mut router = Router::new().route(&route, post(handle_vote));
    if route != "/" {
        router = router.route(&format!("{}/", route), post(handle_vote));
    }
    Ok(router.with_state(receiver))
}

async fn handle_vote(
    State(receiver): State<Arc<VoteReceiver>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let auth = headers.get(AUTHORIZATION).map(HeaderValue::as_bytes);
    let outcome = receiver.handle_vote_notification(auth, &body);
    (outcome.status(), outcome.message().to_string())
}
