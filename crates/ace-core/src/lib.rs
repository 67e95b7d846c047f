//! Core crate for the ACE governance engine.
//!
//! Holds what every layer of the engine shares: error enums and their codes,
//! layered configuration, lifecycle events, tracing setup, and constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
