#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use climateguard_core::config::{EstimationConfig, LedgerConfig, RuntimeConfig};
use climateguard_core::errors::EstimationResult;
use climateguard_core::traits::{EstimateRequest, IRemoteEstimator};
use climateguard_core::EstimationError;
use climateguard_estimation::CarbonEstimationService;
use climateguard_ledger::{EventBroadcaster, OffsetLedger};
use climateguard_runtime::{spawn_authority, AuthorityHandle};
use climateguard_storage::MemoryOffsetStore;
use tokio::task::JoinHandle;

/// Remote stand-in: fails, or answers after an optional delay.
pub struct FakeRemote {
    pub kg: EstimationResult<f64>,
    pub delay: Duration,
    /// Only requests above this price are delayed.
    pub delay_above_usd: f64,
}

impl FakeRemote {
    pub fn down() -> Self {
        Self {
            kg: Err(EstimationError::unavailable("connection refused")),
            delay: Duration::ZERO,
            delay_above_usd: 0.0,
        }
    }

    pub fn answering(kg: f64) -> Self {
        Self {
            kg: Ok(kg),
            delay: Duration::ZERO,
            delay_above_usd: 0.0,
        }
    }
}

impl IRemoteEstimator for FakeRemote {
    async fn estimate(&self, request: &EstimateRequest) -> EstimationResult<f64> {
        if request.parameters.money > self.delay_above_usd && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.kg.clone()
    }
}

pub struct Harness {
    pub authority: AuthorityHandle,
    pub task: JoinHandle<()>,
    pub broadcaster: EventBroadcaster,
    pub store: Arc<MemoryOffsetStore>,
}

pub fn start(remote: FakeRemote, ledger_config: LedgerConfig) -> Harness {
    let store = Arc::new(MemoryOffsetStore::new());
    let broadcaster = EventBroadcaster::new(64);
    let ledger = OffsetLedger::open(ledger_config, Arc::clone(&store), broadcaster.clone());
    let estimation = EstimationConfig {
        rng_seed: Some(5),
        ..EstimationConfig::default()
    };
    let service = Arc::new(CarbonEstimationService::new(Some(remote), &estimation));
    let (authority, task) = spawn_authority(ledger, service, &RuntimeConfig::default());
    Harness {
        authority,
        task,
        broadcaster,
        store,
    }
}
