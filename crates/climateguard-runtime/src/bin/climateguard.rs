//! `climateguard`: JSON-lines transport around the ledger authority.
//!
//! Each stdin line is one request (`{"action": ...}`); each response and each
//! ledger notification is written to stdout as one JSON line. Logs go to
//! stderr. Pass a TOML config path as the only argument, or set
//! `CLIMATEGUARD_CONFIG`.

use std::sync::Arc;

use anyhow::{Context, Result};
use climateguard_core::observability::init_tracing;
use climateguard_core::traits::IOffsetStore;
use climateguard_core::ClimateGuardConfig;
use climateguard_estimation::CarbonEstimationService;
use climateguard_ledger::{EventBroadcaster, OffsetLedger};
use climateguard_runtime::{spawn_authority, Request, Response};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{broadcast, mpsc};
use tracing::{info, warn};

fn load_config() -> Result<ClimateGuardConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CLIMATEGUARD_CONFIG").ok());
    match path {
        Some(path) => ClimateGuardConfig::from_file(&path)
            .with_context(|| format!("loading config from {path}")),
        None => Ok(ClimateGuardConfig::default()),
    }
}

fn to_line<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(line) => Some(line),
        Err(e) => {
            warn!(error = %e, "cannot encode output line");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config()?;
    init_tracing(&config.observability);
    info!(version = env!("CARGO_PKG_VERSION"), "climateguard starting");

    let store = climateguard_storage::open_store(&config.storage).context("opening offset store")?;
    let broadcaster = EventBroadcaster::new(config.runtime.notification_buffer);
    let mut notifications = broadcaster.subscribe();
    let ledger = OffsetLedger::open(config.ledger.clone(), Arc::clone(&store), broadcaster);
    let estimator = Arc::new(
        CarbonEstimationService::from_config(&config.estimation)
            .context("building estimation service")?,
    );
    let (authority, authority_task) = spawn_authority(ledger, estimator, &config.runtime);

    // Single writer keeps response and notification lines whole.
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = out_rx.recv().await {
            if stdout.write_all(line.as_bytes()).await.is_err()
                || stdout.write_all(b"\n").await.is_err()
                || stdout.flush().await.is_err()
            {
                break;
            }
        }
    });

    let notify_tx = out_tx.clone();
    let forwarder = tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(notification) => {
                    if let Some(line) = to_line(&notification) {
                        if notify_tx.send(line).is_err() {
                            break;
                        }
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!(missed, "notification output lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let response = match Request::decode(&line) {
            Ok(request) => authority
                .request(request)
                .await
                .unwrap_or_else(|e| Response::error(&e)),
            Err(e) => Response::error(&e),
        };
        if let Some(out) = to_line(&response) {
            if out_tx.send(out).is_err() {
                break;
            }
        }
    }

    info!("stdin closed, shutting down");
    authority.shutdown().await.ok();
    authority_task.await.context("authority task")?;
    store.flush().ok();
    forwarder.await.ok();
    drop(out_tx);
    writer.await.ok();
    Ok(())
}
