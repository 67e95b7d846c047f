//! Telemetry and explainability: violation and enforcement events, the
//! memory-fabric seam, operator explanations, and failure-learning signals.

pub mod emitter;
pub mod explain;
pub mod learning;
pub mod sink;
pub mod types;

pub use emitter::TelemetryEmitter;
pub use explain::{generate_enforcement_reason, generate_enforcement_reason_with_override};
pub use learning::{classify_enforcement_for_flci, classify_for_flci, generate_learning_suggestion};
pub use sink::{query_enforcements_from_memory, query_violations_from_memory, InMemoryFabric, MemoryFabric};
pub use types::*;
