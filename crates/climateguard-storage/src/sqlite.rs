//! SQLite-backed bucket store. The only place holding a `Connection`.

use std::path::Path;
use std::sync::Mutex;

use climateguard_core::errors::PersistenceResult;
use climateguard_core::traits::{IOffsetStore, StoreHealth};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;
use tracing::info;

use crate::errors::{StorageError, StorageResult};
use crate::migrations::migrate;
use crate::pragmas::{configure_connection, is_wal};

pub struct SqliteOffsetStore {
    conn: Mutex<Connection>,
}

impl SqliteOffsetStore {
    pub fn open(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path).map_err(|e| StorageError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let store = Self::from_connection(conn)?;
        info!(path = %path.display(), "opened offset database");
        Ok(store)
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> StorageResult<Self> {
        configure_connection(&conn)?;
        migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> StorageResult<T>) -> StorageResult<T> {
        let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        f(&conn)
    }

    pub fn read_bucket(&self, bucket: &str) -> StorageResult<Option<Value>> {
        let raw: Option<String> = self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT value_json FROM offset_buckets WHERE bucket = ?1",
                    params![bucket],
                    |row| row.get(0),
                )
                .optional()?)
        })?;
        raw.map(|s| serde_json::from_str(&s).map_err(StorageError::from))
            .transpose()
    }

    pub fn write_bucket(&self, bucket: &str, value: &Value) -> StorageResult<()> {
        let json = serde_json::to_string(value)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO offset_buckets (bucket, value_json, updated_at)
                 VALUES (?1, ?2, CAST(strftime('%s', 'now') AS INTEGER))
                 ON CONFLICT(bucket) DO UPDATE SET
                    value_json = excluded.value_json,
                    updated_at = excluded.updated_at",
                params![bucket, json],
            )?;
            Ok(())
        })
    }

    /// Apply several bucket writes in one transaction.
    pub fn write_batch(&self, writes: &[(String, Value)]) -> StorageResult<()> {
        let mut conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO offset_buckets (bucket, value_json, updated_at)
                 VALUES (?1, ?2, CAST(strftime('%s', 'now') AS INTEGER))
                 ON CONFLICT(bucket) DO UPDATE SET
                    value_json = excluded.value_json,
                    updated_at = excluded.updated_at",
            )?;
            for (bucket, value) in writes {
                stmt.execute(params![bucket, serde_json::to_string(value)?])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn health(&self) -> StorageResult<StoreHealth> {
        self.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |_| Ok(()))?;
            Ok(StoreHealth {
                connected: true,
                wal_mode: is_wal(conn)?,
            })
        })
    }
}

impl IOffsetStore for SqliteOffsetStore {
    fn load(&self, bucket: &str) -> PersistenceResult<Option<Value>> {
        Ok(self.read_bucket(bucket)?)
    }

    fn save(&self, bucket: &str, value: &Value) -> PersistenceResult<()> {
        Ok(self.write_bucket(bucket, value)?)
    }

    fn health_check(&self) -> PersistenceResult<StoreHealth> {
        Ok(self.health()?)
    }
}
