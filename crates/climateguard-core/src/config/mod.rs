pub mod estimation_config;
pub mod ledger_config;
pub mod observability_config;
pub mod runtime_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ClimateGuardError, ClimateGuardResult};

pub use estimation_config::EstimationConfig;
pub use ledger_config::LedgerConfig;
pub use observability_config::ObservabilityConfig;
pub use runtime_config::RuntimeConfig;
pub use storage_config::StorageConfig;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ClimateGuardConfig {
    pub estimation: EstimationConfig,
    pub ledger: LedgerConfig,
    pub storage: StorageConfig,
    pub runtime: RuntimeConfig,
    pub observability: ObservabilityConfig,
}

impl ClimateGuardConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load config from a TOML file on disk and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> ClimateGuardResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ClimateGuardError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml(&raw).map_err(|e| {
            ClimateGuardError::Config(format!("cannot parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClimateGuardResult<()> {
        self.ledger.validate()
    }
}
