use chrono::{Duration, TimeZone, Utc};
use dblapi_lock::{MIN_SWEEP_INTERVAL, VoteLockConfig, VoteLockStore};
use std::sync::Arc;

fn at(secs: i64) -> chrono::DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

#[test]
fn test_repeat_votes_overwrite() {
    let store = VoteLockStore::new(Duration::hours(12));
    for i in 0..5 {
        store.upsert("42", at(i * 60));
    }
    assert_eq!(store.len(), 1);
    assert_eq!(store.last_vote("42"), Some(at(4 * 60)));
}

#[test]
fn test_last_write_wins_even_if_older() {
    let store = VoteLockStore::new(Duration::hours(12));
    store.upsert("42", at(100));
    store.upsert("42", at(50));
    assert_eq!(store.last_vote("42"), Some(at(50)));
}

#[test]
fn test_is_locked_boundary() {
    let store = VoteLockStore::new(Duration::seconds(100));
    store.upsert("42", at(0));
    assert!(store.is_locked_at("42", Duration::seconds(100), at(100)));
    assert!(!store.is_locked_at("42", Duration::seconds(100), at(101)));
    assert!(!store.is_locked_at("unknown", Duration::seconds(100), at(0)));
}

#[test]
fn test_sweep_partitions_by_age() {
    let store = VoteLockStore::new(Duration::seconds(100));
    store.upsert("old", at(0));
    store.upsert("edge", at(50));
    store.upsert("fresh", at(140));

    let now = at(150);
    let lock = Duration::seconds(100);
    assert_eq!(store.sweep(now, lock), 1);

    for id in store.list() {
        let age = now.signed_duration_since(store.last_vote(&id).unwrap());
        assert!(age <= lock, "{} survived with age {}", id, age);
    }
    assert_eq!(store.list(), vec!["edge".to_string(), "fresh".to_string()]);
    assert!(store.last_vote("old").is_none());
}

#[test]
fn test_config_defaults_and_validation() {
    let config = VoteLockConfig::default();
    assert!(!config.on());
    assert_eq!(*config.timeout_secs(), 43_200);
    assert_eq!(config.sweep_interval(), std::time::Duration::from_secs(300));
    assert!(config.validate().is_ok());

    assert!(VoteLockConfig::enabled().with_timeout_secs(0).validate().is_err());
    assert!(VoteLockConfig::enabled().with_sweep_interval_secs(0).validate().is_err());
    assert_eq!(
        VoteLockConfig::enabled().with_timeout_secs(90).lock_duration(),
        Duration::seconds(90)
    );
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_prunes_on_interval() {
    let store = Arc::new(VoteLockStore::new(Duration::seconds(1)));
    store.upsert("42", Utc::now() - Duration::hours(1));
    store.upsert("43", Utc::now() + Duration::hours(1));

    let handle = store.spawn_sweeper(std::time::Duration::from_secs(300));

    tokio::time::sleep(std::time::Duration::from_secs(299)).await;
    assert_eq!(store.len(), 2);

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    assert_eq!(store.list(), vec!["43".to_string()]);

    handle.abort();
}

#[tokio::test(start_paused = true)]
async fn test_sweeper_stops_when_store_dropped() {
    let store = Arc::new(VoteLockStore::new(Duration::seconds(1)));
    let handle = store.spawn_sweeper(std::time::Duration::from_secs(10));
    drop(store);

    tokio::time::sleep(std::time::Duration::from_secs(11)).await;
    tokio::task::yield_now().await;
    assert!(handle.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_zero_sweep_interval_uses_minimum() {
    let store = Arc::new(VoteLockStore::new(Duration::seconds(1)));
    store.upsert("42", Utc::now() - Duration::hours(1));

    let handle = store.spawn_sweeper(std::time::Duration::ZERO);
    tokio::task::yield_now().await;
    assert_eq!(store.len(), 1);

    tokio::time::sleep(MIN_SWEEP_INTERVAL + std::time::Duration::from_millis(10)).await;
    assert!(store.is_empty());
    assert!(!handle.is_finished());

    handle.abort();
}
