//! LedgerMirror: the display surface's eventually-consistent copy.
//!
//! Events arrive twice in the normal case, once pushed as `offsetCompleted`
//! and once in the next `getRecentOffsets` poll. Ids already applied are
//! skipped so nothing is double-counted.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, TimeDelta, Utc};
use climateguard_core::config::{LedgerConfig, RuntimeConfig};
use climateguard_core::{AggregateStats, OffsetEvent, OffsetId};
use serde::Serialize;
use tracing::trace;

use crate::window;

/// Live-activity figures for the recent window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSummary {
    pub count: usize,
    pub total_carbon_kg: f64,
    pub remote_sourced: usize,
}

pub struct LedgerMirror {
    stats: AggregateStats,
    activity: VecDeque<OffsetEvent>,
    seen: HashMap<OffsetId, DateTime<Utc>>,
    /// Events at or before this instant were either seen already or are too
    /// old for the window; they are never applied.
    horizon: Option<DateTime<Utc>>,
    activity_cap: usize,
    window: TimeDelta,
}

impl LedgerMirror {
    pub fn new(activity_cap: usize, window: TimeDelta) -> Self {
        Self {
            stats: AggregateStats::default(),
            activity: VecDeque::with_capacity(activity_cap),
            seen: HashMap::new(),
            horizon: None,
            activity_cap,
            window,
        }
    }

    pub fn from_config(runtime: &RuntimeConfig, ledger: &LedgerConfig) -> Self {
        Self::new(runtime.activity_cap, ledger.recent_window())
    }

    /// Fold one event in. Returns false if it was already applied.
    pub fn apply_event(&mut self, event: &OffsetEvent) -> bool {
        if self.seen.contains_key(&event.id) {
            return false;
        }
        if self.horizon.is_some_and(|h| event.created_at <= h) {
            trace!(id = %event.id, "event behind mirror horizon");
            return false;
        }
        self.seen.insert(event.id, event.created_at);
        self.stats.fold(event.carbon_kg);

        // Keep the feed ordered by id even when a poll delivers out of order.
        let pos = self
            .activity
            .iter()
            .position(|e| e.id < event.id)
            .unwrap_or(self.activity.len());
        self.activity.insert(pos, event.clone());
        self.activity.truncate(self.activity_cap);
        true
    }

    /// Mark events as already counted by an authoritative stats snapshot:
    /// they join the feed and the seen set but are not folded again.
    pub fn seed<'a>(&mut self, events: impl IntoIterator<Item = &'a OffsetEvent>) {
        let stats = self.stats;
        for event in events {
            self.apply_event(event);
        }
        self.stats = stats;
    }

    /// Apply a poll result. Returns how many events were new.
    pub fn reconcile<'a>(&mut self, events: impl IntoIterator<Item = &'a OffsetEvent>) -> usize {
        events.into_iter().filter(|e| self.apply_event(e)).count()
    }

    /// Adopt an authoritative snapshot.
    pub fn replace_stats(&mut self, stats: AggregateStats) {
        self.stats = stats;
    }

    /// Forget ids older than the window so the seen set stays bounded.
    pub fn prune_seen(&mut self, now: DateTime<Utc>) -> usize {
        let Some(horizon) = now.checked_sub_signed(self.window) else {
            return 0;
        };
        let before = self.seen.len();
        self.seen.retain(|_, created_at| *created_at > horizon);
        self.horizon = Some(self.horizon.map_or(horizon, |h| h.max(horizon)));
        before - self.seen.len()
    }

    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    /// Newest first.
    pub fn activity(&self) -> &VecDeque<OffsetEvent> {
        &self.activity
    }

    pub fn live_summary(&self, now: DateTime<Utc>) -> LiveSummary {
        window::within(&self.activity, now, self.window).fold(LiveSummary::default(), |mut s, e| {
            s.count += 1;
            s.total_carbon_kg += e.carbon_kg;
            if e.sourced_from_remote {
                s.remote_sourced += 1;
            }
            s
        })
    }

    pub fn seen_len(&self) -> usize {
        self.seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climateguard_core::OffsetKind;

    fn event(at: DateTime<Utc>, kg: f64, remote: bool) -> OffsetEvent {
        OffsetEvent::new(OffsetKind::Manual, kg, "amazon.com", None, at, remote)
    }

    #[test]
    fn push_then_poll_counts_once() {
        let now = Utc::now();
        let mut mirror = LedgerMirror::new(20, TimeDelta::minutes(5));
        let e = event(now, 30.0, true);
        assert!(mirror.apply_event(&e));
        assert_eq!(mirror.reconcile([&e]), 0);
        assert_eq!(mirror.stats().total_offset_count, 1);
        assert_eq!(mirror.activity().len(), 1);
    }

    #[test]
    fn activity_is_capped_newest_first() {
        let now = Utc::now();
        let mut mirror = LedgerMirror::new(3, TimeDelta::minutes(5));
        let events: Vec<_> = (0..5).map(|i| event(now + TimeDelta::seconds(i), 10.0, false)).collect();
        // Poll results come newest first.
        assert_eq!(mirror.reconcile(events.iter().rev()), 5);
        let ids: Vec<_> = mirror.activity().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![events[4].id, events[3].id, events[2].id]);
    }

    #[test]
    fn seen_set_is_pruned_without_double_counting() {
        let now = Utc::now();
        let mut mirror = LedgerMirror::new(20, TimeDelta::minutes(5));
        let old = event(now - TimeDelta::minutes(10), 10.0, false);
        let fresh = event(now, 10.0, false);
        mirror.reconcile([&old, &fresh]);
        assert_eq!(mirror.prune_seen(now), 1);
        assert_eq!(mirror.seen_len(), 1);
        assert!(!mirror.apply_event(&old));
        assert_eq!(mirror.stats().total_offset_count, 2);
    }

    #[test]
    fn unbounded_window_never_prunes() {
        let now = Utc::now();
        let mut mirror = LedgerMirror::new(20, TimeDelta::MAX);
        let old = event(now - TimeDelta::days(3650), 10.0, false);
        mirror.apply_event(&old);
        assert_eq!(mirror.prune_seen(now), 0);
        assert_eq!(mirror.seen_len(), 1);
        assert_eq!(mirror.live_summary(now).count, 1);
    }

    #[test]
    fn live_summary_counts_window_only() {
        let now = Utc::now();
        let mut mirror = LedgerMirror::new(20, TimeDelta::minutes(5));
        mirror.apply_event(&event(now - TimeDelta::minutes(6), 50.0, true));
        mirror.apply_event(&event(now - TimeDelta::minutes(1), 20.0, true));
        mirror.apply_event(&event(now, 15.0, false));
        let s = mirror.live_summary(now);
        assert_eq!(s.count, 2);
        assert_eq!(s.total_carbon_kg, 35.0);
        assert_eq!(s.remote_sourced, 1);
    }

    #[test]
    fn seeded_events_are_not_folded_twice() {
        let now = Utc::now();
        let mut mirror = LedgerMirror::new(20, TimeDelta::minutes(5));
        let e = event(now, 25.0, false);
        let mut snapshot = AggregateStats::default();
        snapshot.fold(25.0);
        mirror.replace_stats(snapshot);
        mirror.seed([&e]);
        assert_eq!(mirror.reconcile([&e]), 0);
        assert_eq!(mirror.stats(), snapshot);
        assert_eq!(mirror.activity().len(), 1);
    }

    #[test]
    fn replace_stats_adopts_snapshot() {
        let mut mirror = LedgerMirror::new(20, TimeDelta::minutes(5));
        let mut stats = AggregateStats::default();
        stats.fold(100.0);
        mirror.replace_stats(stats);
        assert_eq!(mirror.stats(), stats);
    }
}
