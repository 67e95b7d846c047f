//! Telemetry configuration.

use serde::{Deserialize, Serialize};

/// Configuration for violation and enforcement telemetry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Enable event emission. Default: true.
    pub enabled: Option<bool>,
    /// Bounded queue size between emitters and the sink worker. Default: 1024.
    pub channel_capacity: Option<usize>,
}

impl TelemetryConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_channel_capacity(&self) -> usize {
        self.channel_capacity.unwrap_or(1024)
    }
}
