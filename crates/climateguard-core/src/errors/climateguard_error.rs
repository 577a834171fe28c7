use super::{EstimationError, PersistenceError};

/// Top-level error type for ClimateGuard.
/// All subsystem errors convert into this via `From` impls.
#[derive(Debug, thiserror::Error)]
pub enum ClimateGuardError {
    #[error("estimation failed: {0}")]
    Estimation(#[from] EstimationError),

    #[error("persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid message: {0}")]
    Message(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("channel closed: {component}")]
    ChannelClosed { component: String },
}

/// Convenience type alias.
pub type ClimateGuardResult<T> = Result<T, ClimateGuardError>;
