use serde::{Deserialize, Serialize};

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// `EnvFilter` directive; `CLIMATEGUARD_LOG` takes precedence.
    pub log_filter: String,
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            json: false,
        }
    }
}
