//! Engine-wide constants.

/// Version stamped on every generated architecture signature.
pub const SIGNATURE_VERSION: &str = "1.0.0";

/// Version of the governance metadata embedded in signatures.
pub const GOVERNANCE_VERSION: &str = "1.0.0";

/// Schema version carried by telemetry events.
pub const EVENT_SCHEMA_VERSION: &str = "1.0.0";

/// Commit recorded when the VCS cannot be queried.
pub const SENTINEL_COMMIT: &str = "0000000000000000000000000000000000000000";

/// Branch recorded when the VCS cannot be queried.
pub const UNKNOWN_BRANCH: &str = "unknown";

/// Default environment variable an orchestrator reads to honor an override.
pub const DEFAULT_OVERRIDE_ENV_VAR: &str = "ACE_ENFORCEMENT_OVERRIDE";

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "ace.toml";

/// Default protected-path prefixes embedded in the signature governance section.
pub const DEFAULT_PROTECTED_PATHS: &[&str] = &[
    ".github/foreman/",
    ".github/workflows/",
    "BUILD_PHILOSOPHY.md",
    "foreman/constitution/",
    "foreman/governance/",
];
