//! Tracing setup for ACE.

pub mod setup;

pub use setup::init_tracing;
