use async_trait::async_trait;
use dblapi_core::{DEFAULT_AVATAR_URL, Embed, EmbedField, FieldTemplate, User, Vote};
use dblapi_error::{DblResult, DirectoryError, DirectoryErrorKind, WebhookError, WebhookErrorKind};
use dblapi_interface::{PlatformClient, VoterProfiles, WebhookHandle};
use dblapi_webhook::{VoteEmbedConfig, VoteEmbedDispatcher, build_embed, parse_color};
use parking_lot::Mutex;
use std::sync::Arc;

const HOOK_URL: &str = "https://discord.com/api/webhooks/1234/abcd";

fn ann() -> User {
    User {
        id: "42".into(),
        username: "Ann".into(),
        avatar: Some("a1b2".into()),
        ..Default::default()
    }
}

fn vote(user: &str) -> Vote {
    serde_json::from_value(serde_json::json!({"bot": "1", "user": user})).unwrap()
}

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
    fail: bool,
    sent: Mutex<Vec<Embed>>,
}

#[async_trait]
impl WebhookHandle for RecordingHook {
    fn id(&self) -> &str {
        "1234"
    }

    async fn send_embed(&self, embed: &Embed) -> DblResult<()> {
        if self.fail {
            return Err(WebhookError::new(WebhookErrorKind::Dispatch("boom".into())).into());
        }
        self.sent.lock().push(embed.clone());
        Ok(())
    }
}

struct HookPlatform {
    hook: Arc<RecordingHook>,
    requested: Mutex<Option<(String, String)>>,
}

#[async_trait]
impl PlatformClient for HookPlatform {
    async fn current_guild_count(&self) -> DblResult<u64> {
        Ok(0)
    }

    async fn shard_guild_counts(&self) -> DblResult<Option<Vec<u64>>> {
        Ok(None)
    }

    async fn fetch_outgoing_webhook(
        &self,
        id: &str,
        token: &str,
    ) -> DblResult<Arc<dyn WebhookHandle>> {
        *self.requested.lock() = Some((id.to_string(), token.to_string()));
        Ok(self.hook.clone())
    }
}

#[test]
fn test_fields_render_with_voter() {
    let config = VoteEmbedConfig::new(HOOK_URL)
        .with_fields(Some(vec![FieldTemplate::new("{user}", "voted for {id}!")]));
    let embed = build_embed(&config, &ann(), "42");
    assert_eq!(
        embed.fields,
        vec![EmbedField {
            name: "Ann".into(),
            value: "voted for 42!".into()
        }]
    );
}

#[test]
fn test_embed_defaults() {
    let config = VoteEmbedConfig::new(HOOK_URL);
    let embed = build_embed(&config, &ann(), "42");

    assert_eq!(embed.author.name, "Ann");
    assert_eq!(
        embed.author.icon_url,
        "https://cdn.discordapp.com/avatars/42/a1b2.png"
    );
    assert_eq!(embed.title, "New Vote!");
    assert!(embed.color <= 0xFF_FFFF);
    assert_eq!(embed.thumbnail.url, "");
    assert!(embed.fields.is_empty());
}

#[test]
fn test_embed_without_profile_details() {
    let config = VoteEmbedConfig::new(HOOK_URL)
        .with_title("Thanks!".to_string())
        .with_color(Some("#ff8800".into()))
        .with_thumbnail(Some("https://example.com/t.png".into()));
    let embed = build_embed(&config, &User::default(), "42");

    assert_eq!(embed.author.name, "New Vote");
    assert_eq!(embed.author.icon_url, DEFAULT_AVATAR_URL);
    assert_eq!(embed.title, "Thanks!");
    assert_eq!(embed.color, 0xff8800);
    assert_eq!(embed.thumbnail.url, "https://example.com/t.png");
}

#[test]
fn test_parse_color() {
    assert_eq!(parse_color("ff0000"), Some(0xff0000));
    assert_eq!(parse_color("0x00ff00"), Some(0x00ff00));
    assert_eq!(parse_color(""), None);
    assert_eq!(parse_color("zz"), None);
}

#[test]
fn test_config_validation() {
    assert!(VoteEmbedConfig::new(HOOK_URL).validate().is_ok());
    assert!(VoteEmbedConfig::new("").validate().is_err());
    assert!(VoteEmbedConfig::new("abcd").validate().is_err());
    assert!(
        VoteEmbedConfig::new(HOOK_URL)
            .with_fields(Some(vec![]))
            .validate()
            .is_err()
    );
    assert!(
        VoteEmbedConfig::new(HOOK_URL)
            .with_fields(Some(vec![FieldTemplate::new("", "x")]))
            .validate()
            .is_err()
    );
}

#[test]
fn test_config_from_json_defaults() {
    let config: VoteEmbedConfig = serde_json::from_str(&format!(r#"{{"url":"{}"}}"#, HOOK_URL)).unwrap();
    assert_eq!(config.title(), "New Vote!");
    assert!(config.fields().is_none());
    assert_eq!(
        config.webhook_parts().unwrap(),
        ("1234".to_string(), "abcd".to_string())
    );
}

#[tokio::test]
async fn test_connect_resolves_webhook_from_url() {
    let hook = Arc::new(RecordingHook::default());
    let platform = HookPlatform {
        hook: hook.clone(),
        requested: Mutex::new(None),
    };

    let dispatcher = VoteEmbedDispatcher::connect(
        Arc::new(Profiles(Some(ann()))),
        &platform,
        VoteEmbedConfig::new(HOOK_URL),
    )
    .await
    .unwrap();

    assert_eq!(
        *platform.requested.lock(),
        Some(("1234".to_string(), "abcd".to_string()))
    );

    dispatcher.dispatch(&vote("42")).await.unwrap();
    assert_eq!(hook.sent.lock().len(), 1);
}

#[tokio::test]
async fn test_dispatch_errors_are_reported() {
    let hook = Arc::new(RecordingHook {
        fail: true,
        ..Default::default()
    });
    let dispatcher =
        VoteEmbedDispatcher::new(Arc::new(Profiles(Some(ann()))), hook, VoteEmbedConfig::new(HOOK_URL))
            .unwrap();
    assert!(dispatcher.dispatch(&vote("42")).await.is_err());

    // Logged variant never fails.
    dispatcher.dispatch_logged(&vote("42")).await;
}

#[tokio::test]
async fn test_profile_failure_sends_nothing() {
    let hook = Arc::new(RecordingHook::default());
    let dispatcher =
        VoteEmbedDispatcher::new(Arc::new(Profiles(None)), hook.clone(), VoteEmbedConfig::new(HOOK_URL))
            .unwrap();
    assert!(dispatcher.dispatch(&vote("42")).await.is_err());
    assert!(hook.sent.lock().is_empty());
}
