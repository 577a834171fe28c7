//! Bucket stores: SQLite on disk, background writer, in-memory.

use std::path::Path;

use climateguard_core::config::StorageConfig;
use climateguard_core::constants::buckets;
use climateguard_core::traits::IOffsetStore;
use climateguard_storage::{open_store, BackgroundStore, MemoryOffsetStore, SqliteOffsetStore};
use serde_json::json;

// ── SQLite ──

#[test]
fn values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("offsets.db");
    {
        let store = SqliteOffsetStore::open(&path).unwrap();
        store
            .save(buckets::CARBON_STATS, &json!({"totalCarbonKg": 42.0}))
            .unwrap();
    }
    let store = SqliteOffsetStore::open(&path).unwrap();
    assert_eq!(
        store.load(buckets::CARBON_STATS).unwrap(),
        Some(json!({"totalCarbonKg": 42.0}))
    );
    assert_eq!(store.load(buckets::RECENT_OFFSETS).unwrap(), None);
    let health = store.health_check().unwrap();
    assert!(health.connected);
    assert!(health.wal_mode);
}

#[test]
fn unopenable_path_is_an_error() {
    assert!(SqliteOffsetStore::open(Path::new("/nonexistent-dir/sub/offsets.db")).is_err());
}

// ── Background writer ──

#[test]
fn background_writes_are_visible_after_flush() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bg.db");
    let store = BackgroundStore::spawn(SqliteOffsetStore::open(&path).unwrap()).unwrap();

    for i in 0..10 {
        store.save(buckets::AUTO_OFFSET_ENABLED, &json!(i % 2 == 0)).unwrap();
    }
    store.flush().unwrap();
    assert_eq!(store.load(buckets::AUTO_OFFSET_ENABLED).unwrap(), Some(json!(false)));
}

#[test]
fn background_writes_committed_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drop.db");
    {
        let store = BackgroundStore::spawn(SqliteOffsetStore::open(&path).unwrap()).unwrap();
        store.save(buckets::RECENT_OFFSETS, &json!([])).unwrap();
    }
    let store = SqliteOffsetStore::open(&path).unwrap();
    assert_eq!(store.load(buckets::RECENT_OFFSETS).unwrap(), Some(json!([])));
}

// ── Selection ──

#[test]
fn open_store_without_path_is_in_memory() {
    let store = open_store(&StorageConfig::default()).unwrap();
    store.save("x", &json!(1)).unwrap();
    assert_eq!(store.load("x").unwrap(), Some(json!(1)));
    assert!(!store.health_check().unwrap().wal_mode);
}

#[test]
fn open_store_with_path_uses_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        db_path: Some(dir.path().join("cfg.db").display().to_string()),
        background_writes: true,
    };
    let store = open_store(&config).unwrap();
    store.save(buckets::CARBON_STATS, &json!({})).unwrap();
    assert_eq!(store.load(buckets::CARBON_STATS).unwrap(), Some(json!({})));
    assert!(store.health_check().unwrap().wal_mode);
}

#[test]
fn memory_store_round_trip() {
    let store = MemoryOffsetStore::new();
    assert!(store.is_empty());
    store.save("a", &json!("b")).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.load("a").unwrap(), Some(json!("b")));
}
