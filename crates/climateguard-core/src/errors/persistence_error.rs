/// Persistence collaborator errors. Logged and ignored by the ledger.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("persistence unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("persisted value in bucket {bucket} is corrupt: {reason}")]
    Corrupt { bucket: String, reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PersistenceError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
