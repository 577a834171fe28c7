//! Runtime (actor and display loop) configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{ACTIVITY_CAP, POLL_INTERVAL_MS};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuntimeConfig {
    pub poll_interval_ms: u64,
    pub activity_cap: usize,
    pub request_buffer: usize,
    pub notification_buffer: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: POLL_INTERVAL_MS, // 2s
            activity_cap: ACTIVITY_CAP,
            request_buffer: 64,
            notification_buffer: 64,
        }
    }
}

impl RuntimeConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}
