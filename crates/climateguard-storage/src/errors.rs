//! Storage error type and its conversion into the core persistence error.

use climateguard_core::PersistenceError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("cannot open database at {path}: {reason}")]
    Open { path: String, reason: String },

    #[error("connection lock poisoned")]
    LockPoisoned,

    #[error("background writer stopped")]
    WriterClosed,

    #[error("schema version {found} is newer than supported {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for PersistenceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization(e) => PersistenceError::Serialization(e),
            other => PersistenceError::unavailable(other.to_string()),
        }
    }
}
