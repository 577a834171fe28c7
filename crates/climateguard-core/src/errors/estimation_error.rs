/// Failures of the remote estimation path.
///
/// None of these reach the end user: the caller of the estimation service
/// logs them and falls back to the local heuristic.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimationError {
    #[error("remote estimator unavailable: {reason}")]
    RemoteUnavailable { reason: String },

    #[error("remote estimator returned a malformed response: {reason}")]
    RemoteMalformed { reason: String },

    #[error("no product signal on page")]
    NoProductSignal,
}

impl EstimationError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::RemoteUnavailable {
            reason: reason.into(),
        }
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::RemoteMalformed {
            reason: reason.into(),
        }
    }

    /// Short stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RemoteUnavailable { .. } => "remote_unavailable",
            Self::RemoteMalformed { .. } => "remote_malformed",
            Self::NoProductSignal => "no_product_signal",
        }
    }
}

pub type EstimationResult<T> = Result<T, EstimationError>;
