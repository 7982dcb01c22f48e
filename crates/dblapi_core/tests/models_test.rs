use dblapi_core::{
    Bot, BotsQuery, FieldTemplate, StatsPost, User, Vote, VoteCheck, VoteType, WidgetOptions,
};
use serde_json::json;

#[test]
fn test_user_deserializes_directory_shape() {
    let user: User = serde_json::from_value(json!({
        "id": "42",
        "username": "Ann",
        "discriminator": "0001",
        "defAvatar": "6debd47ed13483642cf09e832ed0bc1b",
        "certifiedDev": true,
        "mod": true,
        "webMod": false,
        "social": { "github": "ann" }
    }))
    .unwrap();

    assert_eq!(user.username, "Ann");
    assert!(user.avatar.is_none());
    assert!(user.certified_dev);
    assert!(user.moderator);
    assert!(!user.admin);
    assert_eq!(user.social.github.as_deref(), Some("ann"));
}

#[test]
fn test_bot_mixed_case_fields() {
    let bot: Bot = serde_json::from_value(json!({
        "id": "1",
        "username": "Helper",
        "certifiedBot": true,
        "monthlyPoints": 12,
        "points": 300,
        "server_count": 1500,
        "owners": ["42"]
    }))
    .unwrap();

    assert!(bot.certified_bot);
    assert_eq!(bot.monthly_points, 12);
    assert_eq!(bot.server_count, Some(1500));
    assert_eq!(bot.owners, vec!["42".to_string()]);
}

#[test]
fn test_vote_check_accepts_int_and_bool() {
    let check: VoteCheck = serde_json::from_str(r#"{"voted":1}"#).unwrap();
    assert!(check.voted);
    let check: VoteCheck = serde_json::from_str(r#"{"voted":0}"#).unwrap();
    assert!(!check.voted);
    let check: VoteCheck = serde_json::from_str(r#"{"voted":true}"#).unwrap();
    assert!(check.voted);
}

#[test]
fn test_vote_requires_user() {
    let result: Result<Vote, _> = serde_json::from_str(r#"{"bot":"1","type":"upvote"}"#);
    assert!(result.is_err());
}

#[test]
fn test_vote_defaults_and_unknown_type() {
    let vote: Vote = serde_json::from_str(r#"{"user":"42","type":"superVote"}"#).unwrap();
    assert_eq!(vote.kind, VoteType::Unknown);
    assert!(!vote.is_weekend);
    assert!(vote.bot.is_empty());
    assert!(vote.extra.is_empty());
}

#[test]
fn test_stats_post_body() {
    let body = serde_json::to_value(StatsPost { server_count: 7 }).unwrap();
    assert_eq!(body, json!({ "server_count": 7 }));
}

#[test]
fn test_field_template_replaces_every_occurrence() {
    let field = FieldTemplate::new("{user} ({id})", "{user} {user} {id}").render("Ann", "42");
    assert_eq!(field.name, "Ann (42)");
    assert_eq!(field.value, "Ann Ann 42");
}

#[test]
fn test_widget_pairs_only_supplied() {
    let opts = WidgetOptions::builder()
        .highlightcolor("000")
        .topcolor("fff")
        .build()
        .unwrap();
    assert_eq!(
        opts.to_query_pairs(),
        vec![("topcolor", "fff"), ("highlightcolor", "000")]
    );
    assert!(WidgetOptions::default().to_query_pairs().is_empty());
}

#[test]
fn test_bots_query_omits_absent() {
    let query = BotsQuery::builder().offset(20u32).sort("-points").build().unwrap();
    assert_eq!(
        query.to_query_pairs(),
        vec![("offset", "20".to_string()), ("sort", "-points".to_string())]
    );
}
