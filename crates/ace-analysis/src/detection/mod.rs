//! Violation detection: compares a signature against declared constraints.
//!
//! Detection observes and reports; it never fails. Structural and governance
//! checks need one signature, contract checks need a baseline as well.

pub mod contract;
pub mod detector;
pub mod governance;
pub mod structural;
pub mod types;

pub use detector::{detect_violations, detect_violations_by_type, detect_violations_with_baseline};
pub use types::*;
