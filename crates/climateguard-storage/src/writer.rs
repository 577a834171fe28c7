//! Non-blocking bucket writer on a dedicated thread.
//!
//! `save` enqueues and returns immediately. The thread coalesces writes per
//! bucket (last value wins) and commits them in one transaction whenever the
//! queue goes quiet or the batch fills up.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use climateguard_core::errors::PersistenceResult;
use climateguard_core::traits::{IOffsetStore, StoreHealth};
use climateguard_core::PersistenceError;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::{StorageError, StorageResult};
use crate::sqlite::SqliteOffsetStore;

const BATCH_LIMIT: usize = 64;
const BATCH_TIMEOUT: Duration = Duration::from_millis(100);

enum WriterMessage {
    Write { bucket: String, value: Value },
    /// Commit everything queued so far, then acknowledge.
    Flush(Sender<()>),
    Shutdown,
}

pub struct BackgroundStore {
    inner: Arc<SqliteOffsetStore>,
    tx: Mutex<Sender<WriterMessage>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl BackgroundStore {
    pub fn spawn(store: SqliteOffsetStore) -> StorageResult<Self> {
        let inner = Arc::new(store);
        let (tx, rx) = mpsc::channel();
        let worker = Arc::clone(&inner);
        let handle = thread::Builder::new()
            .name("climateguard-writer".into())
            .spawn(move || writer_loop(rx, &worker))
            .map_err(|e| StorageError::Open {
                path: "<writer thread>".into(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            inner,
            tx: Mutex::new(tx),
            handle: Mutex::new(Some(handle)),
        })
    }

    fn send(&self, msg: WriterMessage) -> StorageResult<()> {
        let tx = self.tx.lock().map_err(|_| StorageError::LockPoisoned)?;
        tx.send(msg).map_err(|_| StorageError::WriterClosed)
    }

    /// Stop the thread after it commits whatever is queued.
    pub fn shutdown(&self) {
        let _ = self.send(WriterMessage::Shutdown);
        let handle = self.handle.lock().ok().and_then(|mut h| h.take());
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("storage writer thread panicked");
            }
        }
    }
}

impl Drop for BackgroundStore {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl IOffsetStore for BackgroundStore {
    /// Reads go straight to SQLite after draining queued writes, so a load
    /// always observes earlier saves.
    fn load(&self, bucket: &str) -> PersistenceResult<Option<Value>> {
        self.flush()?;
        Ok(self.inner.read_bucket(bucket)?)
    }

    fn save(&self, bucket: &str, value: &Value) -> PersistenceResult<()> {
        Ok(self.send(WriterMessage::Write {
            bucket: bucket.to_string(),
            value: value.clone(),
        })?)
    }

    fn flush(&self) -> PersistenceResult<()> {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.send(WriterMessage::Flush(ack_tx))?;
        ack_rx
            .recv()
            .map_err(|_| PersistenceError::from(StorageError::WriterClosed))
    }

    fn health_check(&self) -> PersistenceResult<StoreHealth> {
        Ok(self.inner.health()?)
    }
}

fn writer_loop(rx: Receiver<WriterMessage>, store: &SqliteOffsetStore) {
    let mut pending: HashMap<String, Value> = HashMap::new();

    loop {
        match rx.recv_timeout(BATCH_TIMEOUT) {
            Ok(WriterMessage::Write { bucket, value }) => {
                pending.insert(bucket, value);
                if pending.len() >= BATCH_LIMIT {
                    commit(store, &mut pending);
                }
            }
            Ok(WriterMessage::Flush(ack)) => {
                commit(store, &mut pending);
                let _ = ack.send(());
            }
            Ok(WriterMessage::Shutdown) => {
                commit(store, &mut pending);
                info!("storage writer shut down");
                break;
            }
            Err(mpsc::RecvTimeoutError::Timeout) => commit(store, &mut pending),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                commit(store, &mut pending);
                break;
            }
        }
    }
}

fn commit(store: &SqliteOffsetStore, pending: &mut HashMap<String, Value>) {
    if pending.is_empty() {
        return;
    }
    let batch: Vec<(String, Value)> = pending.drain().collect();
    match store.write_batch(&batch) {
        Ok(()) => debug!(buckets = batch.len(), "committed bucket writes"),
        Err(e) => warn!(error = %e, buckets = batch.len(), "bucket write failed, dropping batch"),
    }
}
