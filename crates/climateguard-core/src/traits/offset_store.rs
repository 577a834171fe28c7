use std::sync::Arc;

use serde_json::Value;

use crate::errors::PersistenceResult;

/// Health snapshot of a persistence backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHealth {
    pub connected: bool,
    pub wal_mode: bool,
}

/// Key-value persistence over named buckets holding JSON values.
///
/// Callers treat every method as best-effort: failures are logged and the
/// in-memory state stays authoritative.
pub trait IOffsetStore: Send + Sync {
    /// Read a bucket. `Ok(None)` when the bucket was never written.
    fn load(&self, bucket: &str) -> PersistenceResult<Option<Value>>;

    /// Replace a bucket's value.
    fn save(&self, bucket: &str, value: &Value) -> PersistenceResult<()>;

    /// Block until previously accepted writes are durable.
    fn flush(&self) -> PersistenceResult<()> {
        Ok(())
    }

    fn health_check(&self) -> PersistenceResult<StoreHealth>;
}

impl<T: IOffsetStore + ?Sized> IOffsetStore for Arc<T> {
    fn load(&self, bucket: &str) -> PersistenceResult<Option<Value>> {
        (**self).load(bucket)
    }

    fn save(&self, bucket: &str, value: &Value) -> PersistenceResult<()> {
        (**self).save(bucket, value)
    }

    fn flush(&self) -> PersistenceResult<()> {
        (**self).flush()
    }

    fn health_check(&self) -> PersistenceResult<StoreHealth> {
        (**self).health_check()
    }
}
