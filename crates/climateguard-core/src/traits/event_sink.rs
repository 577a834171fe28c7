use std::sync::Arc;

use crate::models::{AggregateStats, OffsetEvent};

/// Receiver of ledger notifications. Delivery is fire-and-forget.
pub trait IEventSink: Send + Sync {
    fn offset_completed(&self, event: &OffsetEvent);

    fn stats_updated(&self, stats: &AggregateStats);
}

impl<T: IEventSink + ?Sized> IEventSink for Arc<T> {
    fn offset_completed(&self, event: &OffsetEvent) {
        (**self).offset_completed(event)
    }

    fn stats_updated(&self, stats: &AggregateStats) {
        (**self).stats_updated(stats)
    }
}

/// Discards every notification.
impl IEventSink for () {
    fn offset_completed(&self, _event: &OffsetEvent) {}

    fn stats_updated(&self, _stats: &AggregateStats) {}
}
