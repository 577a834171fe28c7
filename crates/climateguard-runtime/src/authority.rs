//! The ledger authority: one task owns the ledger, so records are serialized.
//!
//! Requests arrive over an `mpsc` channel with a `oneshot` reply. The same
//! task runs hourly retention pruning. Carbon calculations run on their own
//! tasks so a slow remote never stalls recording.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use climateguard_core::config::RuntimeConfig;
use climateguard_core::traits::{IEventSink, IOffsetStore, IRemoteEstimator};
use climateguard_core::{ClimateGuardError, ClimateGuardResult, OffsetKind};
use climateguard_estimation::CarbonEstimationService;
use climateguard_ledger::OffsetLedger;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::messages::{Request, Response};

enum Command {
    Request {
        request: Request,
        reply: oneshot::Sender<Response>,
    },
    Shutdown,
}

/// Cloneable sender side of the authority.
#[derive(Debug, Clone)]
pub struct AuthorityHandle {
    tx: mpsc::Sender<Command>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request { request, .. } => write!(f, "Request({})", request.action()),
            Self::Shutdown => write!(f, "Shutdown"),
        }
    }
}

fn closed() -> ClimateGuardError {
    ClimateGuardError::ChannelClosed {
        component: "authority".into(),
    }
}

impl AuthorityHandle {
    pub async fn request(&self, request: Request) -> ClimateGuardResult<Response> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Request { request, reply })
            .await
            .map_err(|_| closed())?;
        rx.await.map_err(|_| closed())
    }

    /// Ask the authority to stop after the requests already queued.
    pub async fn shutdown(&self) -> ClimateGuardResult<()> {
        self.tx.send(Command::Shutdown).await.map_err(|_| closed())
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

struct Authority<S, K, R> {
    ledger: OffsetLedger<S, K>,
    estimator: Arc<CarbonEstimationService<R>>,
    prune_interval: Duration,
}

/// Start the authority task.
pub fn spawn_authority<S, K, R>(
    ledger: OffsetLedger<S, K>,
    estimator: Arc<CarbonEstimationService<R>>,
    config: &RuntimeConfig,
) -> (AuthorityHandle, JoinHandle<()>)
where
    S: IOffsetStore + 'static,
    K: IEventSink + 'static,
    R: IRemoteEstimator + 'static,
{
    let (tx, rx) = mpsc::channel(config.request_buffer.max(1));
    let prune_interval = ledger.config().prune_interval();
    let authority = Authority {
        ledger,
        estimator,
        prune_interval,
    };
    let task = tokio::spawn(authority.run(rx));
    (AuthorityHandle { tx }, task)
}

impl<S, K, R> Authority<S, K, R>
where
    S: IOffsetStore + 'static,
    K: IEventSink + 'static,
    R: IRemoteEstimator + 'static,
{
    async fn run(mut self, mut rx: mpsc::Receiver<Command>) {
        let mut prune = tokio::time::interval(self.prune_interval);
        prune.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(prune_every_secs = self.prune_interval.as_secs(), "ledger authority started");

        loop {
            tokio::select! {
                command = rx.recv() => match command {
                    Some(Command::Request { request, reply }) => self.handle(request, reply),
                    Some(Command::Shutdown) | None => break,
                },
                _ = prune.tick() => {
                    let removed = self.ledger.prune_retention(Utc::now());
                    debug!(removed, "retention pass");
                }
            }
        }
        info!("ledger authority stopped");
    }

    fn handle(&mut self, request: Request, reply: oneshot::Sender<Response>) {
        debug!(action = request.action(), "authority request");
        let response = match request {
            Request::ManualOffset(offset) => {
                let event = offset.into_event(OffsetKind::Manual, Utc::now());
                let stats = self.ledger.record(event.clone());
                Response::Recorded { event, stats }
            }
            Request::AutoOffset(offset) => {
                let event = offset.into_event(OffsetKind::Auto, Utc::now());
                let stats = self.ledger.record(event.clone());
                Response::Recorded { event, stats }
            }
            Request::GetRecentOffsets => Response::RecentOffsets {
                offsets: self.ledger.recent_window(Utc::now()),
            },
            Request::SetAutoOffset { enabled } => {
                self.ledger.set_auto_offset(enabled);
                info!(enabled, "auto offset toggled");
                Response::AutoOffset { enabled }
            }
            Request::GetStats => Response::Stats {
                stats: self.ledger.stats(),
                auto_offset_enabled: self.ledger.auto_offset_enabled(),
            },
            Request::CalculateCarbon { page_data } => {
                let estimator = Arc::clone(&self.estimator);
                tokio::spawn(async move {
                    let estimate = estimator.estimate(&page_data).await;
                    let equivalents = estimate.equivalents();
                    if reply.send(Response::Carbon { estimate, equivalents }).is_err() {
                        debug!("carbon requester went away");
                    }
                });
                return;
            }
        };
        if reply.send(response).is_err() {
            warn!("requester dropped before the reply was sent");
        }
    }
}
