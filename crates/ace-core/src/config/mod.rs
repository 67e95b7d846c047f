//! Configuration system for ACE.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod ace_config;
pub mod enforcement_config;
pub mod governance_config;
pub mod scan_config;
pub mod telemetry_config;

pub use ace_config::{AceConfig, CliOverrides};
pub use enforcement_config::EnforcementConfig;
pub use governance_config::GovernanceConfig;
pub use scan_config::ScanConfig;
pub use telemetry_config::TelemetryConfig;
