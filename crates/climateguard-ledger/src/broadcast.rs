//! Fan-out of ledger notifications over a `tokio::sync::broadcast` channel.
//!
//! Delivery is at most once per subscriber. With no subscribers the
//! notification is dropped.

use climateguard_core::traits::IEventSink;
use climateguard_core::{AggregateStats, OffsetEvent};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LedgerNotification {
    OffsetCompleted { event: OffsetEvent },
    StatsUpdated { stats: AggregateStats },
}

#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    tx: broadcast::Sender<LedgerNotification>,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<LedgerNotification> {
        self.tx.subscribe()
    }

    fn publish(&self, notification: LedgerNotification) {
        if self.tx.send(notification).is_err() {
            trace!("no notification subscribers");
        }
    }
}

impl IEventSink for EventBroadcaster {
    fn offset_completed(&self, event: &OffsetEvent) {
        self.publish(LedgerNotification::OffsetCompleted {
            event: event.clone(),
        });
    }

    fn stats_updated(&self, stats: &AggregateStats) {
        self.publish(LedgerNotification::StatsUpdated { stats: *stats });
    }
}
