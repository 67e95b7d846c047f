//! Top-level ACE configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{EnforcementConfig, GovernanceConfig, ScanConfig, TelemetryConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`ACE_*`)
/// 3. Project config (`ace.toml` in the repository root)
/// 4. User config (`~/.ace/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AceConfig {
    pub scan: ScanConfig,
    pub governance: GovernanceConfig,
    pub enforcement: EnforcementConfig,
    pub telemetry: TelemetryConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub source_root: Option<String>,
    pub max_file_size: Option<u64>,
    pub repository_url: Option<String>,
    pub telemetry_enabled: Option<bool>,
}

impl AceConfig {
    /// Load configuration with 4-layer resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4: user config. Only a parse failure is fatal here.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { message, .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message,
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment
        Self::apply_env_overrides(&mut config);

        // Layer 1: CLI
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &AceConfig) -> Result<(), ConfigError> {
        if config.scan.max_file_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.max_file_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.scan.extensions.iter().any(|e| e.trim().is_empty()) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.extensions".to_string(),
                message: "entries must be non-empty".to_string(),
            });
        }
        if let Some(root) = &config.scan.source_root {
            if root.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.source_root".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if config.telemetry.channel_capacity == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "telemetry.channel_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(var) = &config.enforcement.override_env_var {
            if var.is_empty() || var.contains('=') {
                return Err(ConfigError::InvalidValue {
                    field: "enforcement.override_env_var".to_string(),
                    value: var.clone(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.ace/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".ace").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut AceConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let file_config: AceConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only values set in `other` win.
    fn merge(base: &mut AceConfig, other: &AceConfig) {
        // Scan
        if other.scan.source_root.is_some() {
            base.scan.source_root = other.scan.source_root.clone();
        }
        if !other.scan.extensions.is_empty() {
            base.scan.extensions = other.scan.extensions.clone();
        }
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
        if other.scan.respect_gitignore.is_some() {
            base.scan.respect_gitignore = other.scan.respect_gitignore;
        }
        if other.scan.include_commit.is_some() {
            base.scan.include_commit = other.scan.include_commit;
        }
        if other.scan.include_branch.is_some() {
            base.scan.include_branch = other.scan.include_branch;
        }
        if other.scan.repository_url.is_some() {
            base.scan.repository_url = other.scan.repository_url.clone();
        }

        // Governance
        if !other.governance.protected_paths.is_empty() {
            base.governance.protected_paths = other.governance.protected_paths.clone();
        }

        // Enforcement
        if other.enforcement.override_env_var.is_some() {
            base.enforcement.override_env_var = other.enforcement.override_env_var.clone();
        }

        // Telemetry
        if other.telemetry.enabled.is_some() {
            base.telemetry.enabled = other.telemetry.enabled;
        }
        if other.telemetry.channel_capacity.is_some() {
            base.telemetry.channel_capacity = other.telemetry.channel_capacity;
        }
    }

    /// Apply environment variable overrides (`ACE_SCAN_SOURCE_ROOT`, `ACE_TELEMETRY_ENABLED`, ...).
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut AceConfig) {
        if let Ok(val) = std::env::var("ACE_SCAN_SOURCE_ROOT") {
            config.scan.source_root = Some(val);
        }
        if let Ok(val) = std::env::var("ACE_SCAN_MAX_FILE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.scan.max_file_size = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ACE_REPOSITORY_URL") {
            config.scan.repository_url = Some(val);
        }
        if let Ok(val) = std::env::var("ACE_TELEMETRY_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.telemetry.enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ACE_TELEMETRY_CHANNEL_CAPACITY") {
            if let Ok(v) = val.parse::<usize>() {
                config.telemetry.channel_capacity = Some(v);
            }
        }
        if let Ok(val) = std::env::var("ACE_OVERRIDE_ENV_VAR") {
            config.enforcement.override_env_var = Some(val);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut AceConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.source_root {
            config.scan.source_root = Some(v.clone());
        }
        if let Some(v) = cli.max_file_size {
            config.scan.max_file_size = Some(v);
        }
        if let Some(ref v) = cli.repository_url {
            config.scan.repository_url = Some(v.clone());
        }
        if let Some(v) = cli.telemetry_enabled {
            config.telemetry.enabled = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
