//! Scan surface: shopping-site gate, stale scans, manual and auto offsets.

mod common;

use std::time::Duration;

use climateguard_core::config::LedgerConfig;
use climateguard_core::PageSignal;
use climateguard_runtime::{Request, Response, ScanSurface};
use common::{start, FakeRemote};

fn iphone() -> PageSignal {
    PageSignal::new("www.amazon.com", vec!["iPhone 15 Pro".into()], vec![])
}

#[tokio::test]
async fn pages_without_shopping_content_are_skipped() {
    let h = start(FakeRemote::answering(50.0), LedgerConfig::default());
    let surface = ScanSurface::new(h.authority.clone());
    let page = PageSignal::new("news.example.org", vec![], vec![]);
    assert!(surface.scan(page).await.unwrap().is_none());
    assert!(surface.current().is_none());
}

#[tokio::test]
async fn unknown_store_with_products_is_scanned() {
    let h = start(FakeRemote::down(), LedgerConfig::default());
    let surface = ScanSurface::new(h.authority.clone());
    let page = PageSignal::new("shop.mybrand.co", vec!["MacBook Air".into()], vec![999.0]);
    let outcome = surface.scan(page).await.unwrap().unwrap();
    assert!(!outcome.estimate.sourced_from_remote);
    assert!(outcome.estimate.carbon_kg >= 5.0);
    assert_eq!(surface.current().unwrap().ticket, outcome.ticket);
}

#[tokio::test]
async fn unknown_store_with_prices_only_is_scanned() {
    let h = start(FakeRemote::down(), LedgerConfig::default());
    let surface = ScanSurface::new(h.authority.clone());
    let page = PageSignal::new("boutique.example", vec![], vec![42.0]);
    assert!(surface.scan(page).await.unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn superseded_scan_is_dropped() {
    let mut remote = FakeRemote::answering(50.0);
    remote.delay = Duration::from_secs(5);
    remote.delay_above_usd = 100.0;
    let h = start(remote, LedgerConfig::default());
    let surface = ScanSurface::new(h.authority.clone());

    let slow = PageSignal::new("bestbuy.com", vec!["OLED TV".into()], vec![999.0]);
    let fast = PageSignal::new("bestbuy.com", vec!["USB cable".into()], vec![9.0]);
    let (first, second) = tokio::join!(surface.scan(slow), surface.scan(fast));

    assert!(first.unwrap().is_none());
    let second = second.unwrap().unwrap();
    assert_eq!(second.signal.products, vec!["USB cable"]);
    assert_eq!(surface.current().unwrap().ticket, second.ticket);
}

#[tokio::test]
async fn manual_offset_uses_current_scan() {
    let h = start(FakeRemote::answering(64.0), LedgerConfig::default());
    let surface = ScanSurface::new(h.authority.clone());
    assert!(surface.offset_now().await.unwrap().is_none());

    let outcome = surface.scan(iphone()).await.unwrap().unwrap();
    assert_eq!(outcome.estimate.carbon_kg, 64.0);
    let stats = surface.offset_now().await.unwrap().unwrap();
    assert_eq!(stats.total_offset_count, 1);

    match h.authority.request(Request::GetRecentOffsets).await.unwrap() {
        Response::RecentOffsets { offsets } => {
            assert_eq!(offsets[0].site_host, "amazon");
            assert_eq!(offsets[0].product_label, "iPhone 15 Pro");
            assert!(offsets[0].sourced_from_remote);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn checkout_offsets_only_when_enabled() {
    let h = start(FakeRemote::down(), LedgerConfig::default());
    let surface = ScanSurface::new(h.authority.clone());
    surface.scan(iphone()).await.unwrap().unwrap();

    assert!(!surface.sync_settings().await.unwrap());
    assert!(surface.checkout().await.unwrap().is_none());

    surface.set_auto_offset(true).await.unwrap();
    let stats = surface.checkout().await.unwrap().unwrap();
    assert_eq!(stats.total_offset_count, 1);

    let other_surface = ScanSurface::new(h.authority.clone());
    assert!(other_surface.sync_settings().await.unwrap());
}
