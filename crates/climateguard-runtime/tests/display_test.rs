//! Display sync: push + poll never double-count.

mod common;

use std::time::Duration;

use chrono::TimeDelta;
use climateguard_core::config::LedgerConfig;
use climateguard_ledger::LedgerMirror;
use climateguard_runtime::{spawn_display_sync, OffsetRequest, Request};
use common::{start, FakeRemote};

fn offset(kg: f64, used_api: bool) -> Request {
    Request::ManualOffset(OffsetRequest {
        carbon_amount: kg,
        site_name: "target".into(),
        product_name: None,
        used_api,
    })
}

#[tokio::test(start_paused = true)]
async fn mirror_sees_each_offset_once() {
    let h = start(FakeRemote::down(), LedgerConfig::default());
    let display = spawn_display_sync(
        h.authority.clone(),
        h.broadcaster.subscribe(),
        LedgerMirror::new(20, TimeDelta::minutes(5)),
        Duration::from_secs(2),
    );

    h.authority.request(offset(30.0, true)).await.unwrap();
    h.authority.request(offset(12.0, false)).await.unwrap();

    // Several poll rounds on top of the pushed notifications.
    tokio::time::sleep(Duration::from_secs(7)).await;

    let (count, activity, total) = display
        .with_mirror(|m| (m.stats().total_offset_count, m.activity().len(), m.stats().total_carbon_kg))
        .unwrap();
    assert_eq!(count, 2);
    assert_eq!(activity, 2);
    assert_eq!(total, 42.0);

    let summary = display.with_mirror(|m| m.live_summary(chrono::Utc::now())).unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.remote_sourced, 1);

    display.stop().await;
}

#[tokio::test(start_paused = true)]
async fn late_subscriber_seeds_from_snapshot() {
    let h = start(FakeRemote::down(), LedgerConfig::default());
    h.authority.request(offset(15.0, false)).await.unwrap();

    // Subscribed after the record: the snapshot already counts it.
    let display = spawn_display_sync(
        h.authority.clone(),
        h.broadcaster.subscribe(),
        LedgerMirror::new(20, TimeDelta::minutes(5)),
        Duration::from_secs(2),
    );
    tokio::time::sleep(Duration::from_secs(3)).await;

    let (activity, count) = display
        .with_mirror(|m| (m.activity().len(), m.stats().total_offset_count))
        .unwrap();
    assert_eq!(activity, 1);
    assert_eq!(count, 1);

    display.stop().await;
}
