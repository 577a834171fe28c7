//! OffsetLedger: single owner of offset history and aggregate stats.
//!
//! History is newest first and bounded by `history_cap`. Stats fold every
//! recorded event and are never reversed by the cap or by retention pruning.
//! Persistence is a best-effort mirror; no ledger operation fails.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use climateguard_core::config::LedgerConfig;
use climateguard_core::constants::buckets;
use climateguard_core::errors::RecoveryAction;
use climateguard_core::traits::{IEventSink, IOffsetStore};
use climateguard_core::{AggregateStats, OffsetEvent, OffsetId, PersistenceError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{retention, window};

pub struct OffsetLedger<S, K> {
    config: LedgerConfig,
    store: S,
    sink: K,
    history: VecDeque<OffsetEvent>,
    stats: AggregateStats,
    auto_offset: bool,
}

impl<S: IOffsetStore, K: IEventSink> OffsetLedger<S, K> {
    /// Restore persisted state. Unreadable buckets fall back to defaults.
    pub fn open(config: LedgerConfig, store: S, sink: K) -> Self {
        let mut stats: AggregateStats = load_bucket(&store, buckets::CARBON_STATS).unwrap_or_default();
        stats.refresh_derived();

        let stored: Vec<OffsetEvent> = load_bucket(&store, buckets::RECENT_OFFSETS).unwrap_or_default();
        let mut history: Vec<OffsetEvent> = stored.into_iter().map(OffsetEvent::normalized).collect();
        history.sort_by(|a, b| b.id.cmp(&a.id));
        history.truncate(config.history_cap);

        let auto_offset = load_bucket(&store, buckets::AUTO_OFFSET_ENABLED).unwrap_or(false);

        info!(
            offsets = stats.total_offset_count,
            retained = history.len(),
            auto_offset,
            "offset ledger opened"
        );

        Self {
            config,
            store,
            sink,
            history: history.into(),
            stats,
            auto_offset,
        }
    }

    /// Append an offset: fold stats, apply the cap, persist, notify.
    pub fn record(&mut self, event: OffsetEvent) -> AggregateStats {
        self.stats.fold(event.carbon_kg);
        self.history.push_front(event.clone());
        self.history.truncate(self.config.history_cap);

        debug!(
            id = %event.id,
            kind = ?event.kind,
            carbon_kg = event.carbon_kg,
            total_kg = self.stats.total_carbon_kg,
            "offset recorded"
        );

        self.persist(buckets::CARBON_STATS, &self.stats);
        self.persist_history();

        self.sink.offset_completed(&event);
        self.sink.stats_updated(&self.stats);
        self.stats
    }

    /// Retained events inside the recent window, newest first.
    pub fn recent_window(&self, now: DateTime<Utc>) -> Vec<OffsetEvent> {
        window::within(&self.history, now, self.config.recent_window())
            .cloned()
            .collect()
    }

    /// Drop events past retention. Stats are untouched.
    pub fn prune_retention(&mut self, now: DateTime<Utc>) -> usize {
        let removed = retention::prune(&mut self.history, now, self.config.retention());
        if removed > 0 {
            info!(removed, retained = self.history.len(), "pruned expired offsets");
            self.persist_history();
        }
        removed
    }

    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    pub fn history(&self) -> &VecDeque<OffsetEvent> {
        &self.history
    }

    pub fn find(&self, id: OffsetId) -> Option<&OffsetEvent> {
        self.history.iter().find(|e| e.id == id)
    }

    pub fn auto_offset_enabled(&self) -> bool {
        self.auto_offset
    }

    pub fn set_auto_offset(&mut self, enabled: bool) {
        self.auto_offset = enabled;
        self.persist(buckets::AUTO_OFFSET_ENABLED, &enabled);
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn persist_history(&self) {
        self.persist(buckets::RECENT_OFFSETS, &self.history);
    }

    fn persist<T: Serialize + ?Sized>(&self, bucket: &str, value: &T) {
        let result = serde_json::to_value(value)
            .map_err(PersistenceError::from)
            .and_then(|v| self.store.save(bucket, &v));
        if let Err(e) = result {
            warn!(
                bucket,
                error = %e,
                recovery = %RecoveryAction::for_persistence(&e),
                "persisting ledger state failed"
            );
        }
    }
}

fn load_bucket<T: DeserializeOwned>(store: &impl IOffsetStore, bucket: &str) -> Option<T> {
    let value = match store.load(bucket) {
        Ok(Some(value)) => value,
        Ok(None) => return None,
        Err(e) => {
            warn!(bucket, error = %e, "loading ledger state failed, using defaults");
            return None;
        }
    };
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            let err = PersistenceError::Corrupt {
                bucket: bucket.to_string(),
                reason: e.to_string(),
            };
            warn!(error = %err, "using defaults");
            None
        }
    }
}
