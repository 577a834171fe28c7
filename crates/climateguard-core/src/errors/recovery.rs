//! RecoveryAction: what a caller does when an operation fails.

use std::fmt;

use super::{ClimateGuardError, EstimationError, PersistenceError};

/// Recommended recovery action for a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Retry the operation (transient failure).
    Retry,
    /// Fall back to a degraded but functional alternative.
    Fallback,
    /// Escalate to the caller; cannot be handled silently.
    Escalate,
    /// Best-effort operation; log and continue.
    Ignore,
}

impl RecoveryAction {
    /// Determine the recommended recovery action for a ClimateGuardError.
    pub fn for_error(error: &ClimateGuardError) -> Self {
        match error {
            ClimateGuardError::Estimation(e) => Self::for_estimation(e),
            ClimateGuardError::Persistence(e) => Self::for_persistence(e),

            // Must be fixed by whoever wrote the config or the message.
            ClimateGuardError::Config(_) => Self::Escalate,
            ClimateGuardError::Message(_) => Self::Escalate,
            ClimateGuardError::Serialization(_) => Self::Escalate,

            // Actor restarted or shutting down.
            ClimateGuardError::ChannelClosed { .. } => Self::Retry,
        }
    }

    /// Every remote estimation failure degrades to the local heuristic.
    pub fn for_estimation(_error: &EstimationError) -> Self {
        Self::Fallback
    }

    /// In-memory state stays authoritative; persistence is a mirror.
    pub fn for_persistence(_error: &PersistenceError) -> Self {
        Self::Ignore
    }
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retry => write!(f, "Retry"),
            Self::Fallback => write!(f, "Fallback"),
            Self::Escalate => write!(f, "Escalate"),
            Self::Ignore => write!(f, "Ignore"),
        }
    }
}
