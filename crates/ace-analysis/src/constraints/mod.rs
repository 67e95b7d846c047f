//! Constraint declarations, the read-only registry contract, and validation.

pub mod registry;
pub mod types;
pub mod validation;

pub use registry::{builtin_constraints, ConstraintFilter, ConstraintQueryResult, ConstraintRegistry, InMemoryConstraintRegistry};
pub use types::*;
pub use validation::{validate_constraint, ValidationResult};
