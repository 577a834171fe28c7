//! Carbon estimation configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_API_KEY_ENV, DEFAULT_ESTIMATE_ENDPOINT, REMOTE_TIMEOUT_MS};

/// Configuration for the remote estimator and the local heuristic.
///
/// The credential itself is never part of the config: only the name of the
/// environment variable that holds it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EstimationConfig {
    pub endpoint: String,
    pub api_key_env: String,
    pub timeout_ms: u64,
    pub currency: String,
    pub remote_enabled: bool,
    /// Fixed seed for heuristic jitter. `None` seeds from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ESTIMATE_ENDPOINT.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_ms: REMOTE_TIMEOUT_MS, // 10s
            currency: "usd".to_string(),
            remote_enabled: true,
            rng_seed: None,
        }
    }
}

impl EstimationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Read the credential from the configured environment variable.
    /// Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}
