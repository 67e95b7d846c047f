//! Governance engine: signature → detection → classification → enforcement.
//!
//! Each stage is usable on its own; [`pipeline::GovernancePipeline`] wires
//! them together for a single run.

pub mod classification;
pub mod constraints;
pub mod detection;
pub mod enforcement;
pub mod hashing;
pub mod pipeline;
pub mod reporters;
pub mod signature;
pub mod telemetry;
