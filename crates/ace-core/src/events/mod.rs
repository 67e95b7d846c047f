//! Lifecycle events for the governance pipeline.
//! Handlers are synchronous and optional; an empty dispatcher costs nothing.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::AceEventHandler;
