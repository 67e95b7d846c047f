//! Violation classification: severity, category, nature, false-positive flag.

pub mod aggregate;
pub mod classifier;
pub mod types;

pub use aggregate::{aggregate_by_category, aggregate_by_nature, aggregate_by_severity, identify_false_positives};
pub use classifier::{classify_violation, classify_violation_report};
pub use types::*;
