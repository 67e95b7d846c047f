//! Error handling for ACE.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod detection_error;
pub mod error_code;
pub mod registry_error;
pub mod signature_error;
pub mod telemetry_error;

pub use config_error::ConfigError;
pub use detection_error::DetectionError;
pub use error_code::AceErrorCode;
pub use registry_error::RegistryError;
pub use signature_error::SignatureError;
pub use telemetry_error::TelemetryError;
