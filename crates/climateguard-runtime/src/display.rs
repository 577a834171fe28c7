//! Display surface sync: listens for pushed notifications and polls
//! `getRecentOffsets` on a fixed cadence, folding both into a
//! [`LedgerMirror`]. The mirror's id set absorbs the overlap.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use climateguard_ledger::{LedgerMirror, LedgerNotification};
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::authority::AuthorityHandle;
use crate::messages::{Request, Response};

pub struct DisplayHandle {
    mirror: Arc<Mutex<LedgerMirror>>,
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl DisplayHandle {
    /// Run `f` against the current mirror state.
    pub fn with_mirror<T>(&self, f: impl FnOnce(&LedgerMirror) -> T) -> Option<T> {
        self.mirror.lock().ok().map(|m| f(&m))
    }

    pub async fn stop(self) {
        let _ = self.stop.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "display sync task failed");
        }
    }
}

pub fn spawn_display_sync(
    authority: AuthorityHandle,
    notifications: broadcast::Receiver<LedgerNotification>,
    mirror: LedgerMirror,
    poll_interval: Duration,
) -> DisplayHandle {
    let mirror = Arc::new(Mutex::new(mirror));
    let (stop, stop_rx) = watch::channel(false);
    let task = tokio::spawn(run(
        authority,
        notifications,
        Arc::clone(&mirror),
        poll_interval,
        stop_rx,
    ));
    DisplayHandle { mirror, stop, task }
}

async fn run(
    authority: AuthorityHandle,
    mut notifications: broadcast::Receiver<LedgerNotification>,
    mirror: Arc<Mutex<LedgerMirror>>,
    poll_interval: Duration,
    mut stop: watch::Receiver<bool>,
) {
    initial_sync(&authority, &mirror).await;

    let mut poll = tokio::time::interval(poll_interval);
    poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut listening = true;

    loop {
        tokio::select! {
            _ = stop.changed() => break,
            received = notifications.recv(), if listening => match received {
                Ok(notification) => apply(&mirror, notification),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    debug!(missed, "notification lag, polling now");
                    poll_once(&authority, &mirror).await;
                }
                Err(broadcast::error::RecvError::Closed) => listening = false,
            },
            _ = poll.tick() => {
                if !poll_once(&authority, &mirror).await {
                    break;
                }
            }
        }
    }
    info!("display sync stopped");
}

fn apply(mirror: &Mutex<LedgerMirror>, notification: LedgerNotification) {
    let Ok(mut mirror) = mirror.lock() else {
        return;
    };
    match notification {
        LedgerNotification::OffsetCompleted { event } => {
            mirror.apply_event(&event);
        }
        LedgerNotification::StatsUpdated { stats } => mirror.replace_stats(stats),
    }
}

/// Adopt the authority's stats, then seed the feed with the recent offsets
/// those stats already include.
async fn initial_sync(authority: &AuthorityHandle, mirror: &Mutex<LedgerMirror>) {
    match authority.request(Request::GetStats).await {
        Ok(Response::Stats { stats, .. }) => {
            if let Ok(mut m) = mirror.lock() {
                m.replace_stats(stats);
            }
        }
        Ok(other) => {
            warn!(kind = other.kind(), "unexpected stats response");
            return;
        }
        Err(e) => {
            warn!(error = %e, "initial stats load failed");
            return;
        }
    }
    match authority.request(Request::GetRecentOffsets).await {
        Ok(Response::RecentOffsets { offsets }) => {
            if let Ok(mut m) = mirror.lock() {
                m.seed(&offsets);
            }
        }
        Ok(other) => warn!(kind = other.kind(), "unexpected poll response"),
        Err(e) => warn!(error = %e, "initial offsets load failed"),
    }
}

/// One `getRecentOffsets` round. Returns false once the authority is gone.
async fn poll_once(authority: &AuthorityHandle, mirror: &Mutex<LedgerMirror>) -> bool {
    match authority.request(Request::GetRecentOffsets).await {
        Ok(Response::RecentOffsets { offsets }) => {
            if let Ok(mut m) = mirror.lock() {
                let applied = m.reconcile(&offsets);
                m.prune_seen(Utc::now());
                if applied > 0 {
                    debug!(applied, "poll picked up offsets");
                }
            }
            true
        }
        Ok(other) => {
            warn!(kind = other.kind(), "unexpected poll response");
            true
        }
        Err(e) => {
            warn!(error = %e, "authority unavailable, stopping display sync");
            false
        }
    }
}
