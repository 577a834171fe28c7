//! Process-local bucket store.

use std::collections::HashMap;
use std::sync::Mutex;

use climateguard_core::errors::PersistenceResult;
use climateguard_core::traits::{IOffsetStore, StoreHealth};
use climateguard_core::PersistenceError;
use serde_json::Value;

#[derive(Debug, Default)]
pub struct MemoryOffsetStore {
    buckets: Mutex<HashMap<String, Value>>,
}

impl MemoryOffsetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.buckets.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> PersistenceError {
    PersistenceError::unavailable("memory store lock poisoned")
}

impl IOffsetStore for MemoryOffsetStore {
    fn load(&self, bucket: &str) -> PersistenceResult<Option<Value>> {
        let buckets = self.buckets.lock().map_err(|_| poisoned())?;
        Ok(buckets.get(bucket).cloned())
    }

    fn save(&self, bucket: &str, value: &Value) -> PersistenceResult<()> {
        let mut buckets = self.buckets.lock().map_err(|_| poisoned())?;
        buckets.insert(bucket.to_string(), value.clone());
        Ok(())
    }

    fn health_check(&self) -> PersistenceResult<StoreHealth> {
        Ok(StoreHealth {
            connected: true,
            wal_mode: false,
        })
    }
}
