//! Enforcement: hook registry, governance decision tree, action executor.

pub mod error;
pub mod executor;
pub mod governance;
pub mod hooks;
pub mod types;

pub use error::{BlockingError, HookBlockedError};
pub use executor::{enforcement_override_requested, execute_enforcement_action, ActionExecutor};
pub use governance::{
    check_cs_boundaries, check_protected_domain, determine_enforcement_action, requires_explicit_approval,
};
pub use hooks::HookRegistry;
pub use types::*;
