use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Request, StatusCode};
use dblapi_core::{Embed, FieldTemplate, User, Vote};
use dblapi_error::{DblResult, DirectoryError, DirectoryErrorKind};
use dblapi_interface::{Listeners, VoterProfiles, WebhookHandle};
use dblapi_lock::VoteLockStore;
use dblapi_webhook::{
    VoteEmbedConfig, VoteEmbedDispatcher, VoteOutcome, VoteReceiver, WebhookServer, create_router,
};
use http_body_util::BodyExt;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt;

const SECRET: &str = "hunter2";
const VOTE: &str = r#"{"bot":"1","user":"42","type":"upvote","isWeekend":false}"#;

struct Profiles(Option<User>);

#[async_trait]
impl VoterProfiles for Profiles {
    async fn voter_profile(&self, user_id: &str) -> DblResult<User> {
        self.0
            .clone()
            .ok_or_else(|| DirectoryError::new(DirectoryErrorKind::NotFound(user_id.into())).into())
    }
}

#[derive(Default)]
struct RecordingHook {
    sent: Mutex<Vec<Embed>>,
}

#[async_trait]
impl WebhookHandle for RecordingHook {
    fn id(&self) -> &str {
        "1234"
    }

    async fn send_embed(&self, embed: &Embed) -> DblResult<()> {
        self.sent.lock().push(embed.clone());
        Ok(())
    }
}

struct Fixture {
    receiver: Arc<VoteReceiver>,
    emitted: Arc<AtomicUsize>,
    lock: Arc<VoteLockStore>,
}

fn fixture() -> Fixture {
    let votes = Arc::new(Listeners::<Vote>::new("vote"));
    let emitted = Arc::new(AtomicUsize::new(0));
    let counter = emitted.clone();
    votes.register(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let lock = Arc::new(VoteLockStore::new(chrono::Duration::hours(12)));
    let receiver = VoteReceiver::new(SECRET, votes).unwrap().with_lock(lock.clone());
    Fixture {
        receiver: Arc::new(receiver),
        emitted,
        lock,
    }
}

fn post(uri: &str, auth: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(receiver: Arc<VoteReceiver>, request: Request<Body>) -> (StatusCode, String) {
    let app = create_router(receiver, "vote").unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[test]
fn test_empty_secret_rejected() {
    let votes = Arc::new(Listeners::<Vote>::new("vote"));
    assert!(VoteReceiver::new("", votes).is_err());
}

#[tokio::test]
async fn test_wrong_secret_has_no_side_effects() {
    let f = fixture();
    for auth in [None, Some("wrong"), Some("hunter2 "), Some("HUNTER2")] {
        let (status, body) = send(f.receiver.clone(), post("/vote/", auth, VOTE)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, "Unauthorized");
    }
    assert_eq!(f.emitted.load(Ordering::SeqCst), 0);
    assert!(f.lock.is_empty());
}

#[tokio::test]
async fn test_valid_vote_emits_once_and_locks() {
    let f = fixture();
    let (status, _) = send(f.receiver.clone(), post("/vote/", Some(SECRET), VOTE)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(f.emitted.load(Ordering::SeqCst), 1);
    assert_eq!(f.lock.list(), vec!["42".to_string()]);
}

#[tokio::test]
async fn test_path_with_and_without_trailing_slash() {
    let f = fixture();
    let (with_slash, _) = send(f.receiver.clone(), post("/vote/", Some(SECRET), VOTE)).await;
    let (without, _) = send(f.receiver.clone(), post("/vote", Some(SECRET), VOTE)).await;
    let (other, _) = send(f.receiver.clone(), post("/other", Some(SECRET), VOTE)).await;

    assert_eq!(with_slash, StatusCode::OK);
    assert_eq!(without, StatusCode::OK);
    assert_eq!(other, StatusCode::NOT_FOUND);
    assert_eq!(f.emitted.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let f = fixture();
    for body in ["not json", r#"{"bot":"1"}"#, r#"{"user":"  "}"#] {
        let (status, _) = send(f.receiver.clone(), post("/vote/", Some(SECRET), body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
    }
    assert_eq!(f.emitted.load(Ordering::SeqCst), 0);
    assert!(f.lock.is_empty());
}

#[tokio::test]
async fn test_repeat_votes_keep_one_lock_entry() {
    let f = fixture();
    for _ in 0..3 {
        send(f.receiver.clone(), post("/vote/", Some(SECRET), VOTE)).await;
    }
    assert_eq!(f.emitted.load(Ordering::SeqCst), 3);
    assert_eq!(f.lock.len(), 1);
    assert!(f.lock.is_locked("42", chrono::Duration::hours(12)));
}

#[test]
fn test_failing_listener_does_not_block_lock() {
    let votes = Arc::new(Listeners::<Vote>::new("vote"));
    votes.register(|_| panic!("listener bug"));
    votes.register(|_| Err("listener error".into()));
    let lock = Arc::new(VoteLockStore::new(chrono::Duration::hours(12)));
    let receiver = VoteReceiver::new(SECRET, votes).unwrap().with_lock(lock.clone());

    let outcome = receiver.handle_vote_notification(Some(SECRET.as_bytes()), VOTE.as_bytes());
    assert_eq!(outcome, VoteOutcome::Accepted(0));
    assert_eq!(outcome.status(), StatusCode::OK);
    assert_eq!(lock.len(), 1);
}

#[tokio::test]
async fn test_vote_embed_dispatched_after_response() {
    let hook = Arc::new(RecordingHook::default());
    let user = User {
        id: "42".into(),
        username: "Ann".into(),
        ..Default::default()
    };
    let config = VoteEmbedConfig::new("https://discord.com/api/webhooks/1234/abcd")
        .with_fields(Some(vec![FieldTemplate::new("{user}", "voted for {id}!")]));
    let dispatcher =
        VoteEmbedDispatcher::new(Arc::new(Profiles(Some(user))), hook.clone(), config).unwrap();

    let votes = Arc::new(Listeners::<Vote>::new("vote"));
    let receiver = Arc::new(
        VoteReceiver::new(SECRET, votes)
            .unwrap()
            .with_dispatcher(Arc::new(dispatcher)),
    );

    let (status, _) = send(receiver, post("/vote/", Some(SECRET), VOTE)).await;
    assert_eq!(status, StatusCode::OK);

    for _ in 0..100 {
        if !hook.sent.lock().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let sent = hook.sent.lock();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].fields[0].name, "Ann");
    assert_eq!(sent[0].fields[0].value, "voted for 42!");
}

#[tokio::test]
async fn test_failed_profile_lookup_still_accepts_vote() {
    let hook = Arc::new(RecordingHook::default());
    let dispatcher = VoteEmbedDispatcher::new(
        Arc::new(Profiles(None)),
        hook.clone(),
        VoteEmbedConfig::new("https://discord.com/api/webhooks/1234/abcd"),
    )
    .unwrap();

    let f = fixture();
    let votes = f.receiver.votes().clone();
    let receiver = Arc::new(
        VoteReceiver::new(SECRET, votes)
            .unwrap()
            .with_dispatcher(Arc::new(dispatcher)),
    );

    let (status, _) = send(receiver, post("/vote/", Some(SECRET), VOTE)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(f.emitted.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(hook.sent.lock().is_empty());
}

#[tokio::test]
async fn test_server_serves_and_shuts_down() {
    let f = fixture();
    let router = create_router(f.receiver.clone(), "/hooks/dbl/").unwrap();
    let server = WebhookServer::bind("127.0.0.1:0".parse().unwrap(), router)
        .await
        .unwrap();
    let addr = server.local_addr();
    assert_ne!(addr.port(), 0);

    let client = reqwest::Client::new();
    let url = format!("http://{}/hooks/dbl/", addr);
    let denied = client.post(&url).body(VOTE).send().await.unwrap();
    assert_eq!(denied.status().as_u16(), 401);

    let accepted = client
        .post(&url)
        .header("Authorization", SECRET)
        .header("Content-Type", "application/json")
        .body(VOTE)
        .send()
        .await
        .unwrap();
    assert_eq!(accepted.status().as_u16(), 200);
    assert_eq!(f.emitted.load(Ordering::SeqCst), 1);

    server.shutdown().await.unwrap();
    assert!(client.post(&url).body(VOTE).send().await.is_err());
}

#[tokio::test]
async fn test_bind_conflict_is_reported() {
    let f = fixture();
    let first = WebhookServer::bind(
        "127.0.0.1:0".parse().unwrap(),
        create_router(f.receiver.clone(), "vote").unwrap(),
    )
    .await
    .unwrap();

    let second = WebhookServer::bind(
        first.local_addr(),
        create_router(f.receiver.clone(), "vote").unwrap(),
    )
    .await;
    assert!(second.is_err());
}

#[tokio::test]
async fn test_non_ascii_secret_matches_identical_header_bytes() {
    let secret = "pässwort";
    let votes = Arc::new(Listeners::<Vote>::new("vote"));
    let emitted = Arc::new(AtomicUsize::new(0));
    let counter = emitted.clone();
    votes.register(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let receiver = Arc::new(VoteReceiver::new(secret, votes).unwrap());

    let mut request = post("/vote/", None, VOTE);
    request.headers_mut().insert(
        "authorization",
        HeaderValue::from_bytes(secret.as_bytes()).unwrap(),
    );
    let (status, _) = send(receiver.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(emitted.load(Ordering::SeqCst), 1);

    let mut wrong = post("/vote/", None, VOTE);
    wrong.headers_mut().insert(
        "authorization",
        HeaderValue::from_bytes("passwort".as_bytes()).unwrap(),
    );
    let (status, _) = send(receiver, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(emitted.load(Ordering::SeqCst), 1);
}
