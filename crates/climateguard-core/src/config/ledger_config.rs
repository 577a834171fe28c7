//! Offset ledger configuration.

use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::constants::{HISTORY_CAP, PRUNE_INTERVAL_SECS, RECENT_WINDOW_SECS, RETENTION_DAYS};
use crate::errors::{ClimateGuardError, ClimateGuardResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LedgerConfig {
    pub history_cap: usize,
    pub recent_window_secs: i64,
    pub retention_days: i64,
    pub prune_interval_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            history_cap: HISTORY_CAP,
            recent_window_secs: RECENT_WINDOW_SECS, // 5 minutes
            retention_days: RETENTION_DAYS,
            prune_interval_secs: PRUNE_INTERVAL_SECS, // hourly
        }
    }
}

impl LedgerConfig {
    /// Negative values clamp to zero; unrepresentable ones saturate.
    pub fn recent_window(&self) -> TimeDelta {
        TimeDelta::try_seconds(self.recent_window_secs.max(0)).unwrap_or(TimeDelta::MAX)
    }

    /// Negative values clamp to zero; unrepresentable ones saturate.
    pub fn retention(&self) -> TimeDelta {
        TimeDelta::try_days(self.retention_days.max(0)).unwrap_or(TimeDelta::MAX)
    }

    /// Reject durations that are negative or do not fit a `TimeDelta`.
    pub fn validate(&self) -> ClimateGuardResult<()> {
        if self.recent_window_secs < 0 || TimeDelta::try_seconds(self.recent_window_secs).is_none() {
            return Err(ClimateGuardError::Config(format!(
                "ledger.recent_window_secs out of range: {}",
                self.recent_window_secs
            )));
        }
        if self.retention_days < 0 || TimeDelta::try_days(self.retention_days).is_none() {
            return Err(ClimateGuardError::Config(format!(
                "ledger.retention_days out of range: {}",
                self.retention_days
            )));
        }
        Ok(())
    }

    pub fn prune_interval(&self) -> Duration {
        Duration::from_secs(self.prune_interval_secs.max(1))
    }
}
