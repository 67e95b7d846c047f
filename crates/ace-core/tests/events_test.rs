//! Tests for the ACE event system.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ace_core::events::types::*;
use ace_core::events::{AceEventHandler, EventDispatcher};

#[derive(Default)]
struct CountingHandler {
    signatures: AtomicUsize,
    blocked: AtomicUsize,
    errors: AtomicUsize,
}

impl AceEventHandler for CountingHandler {
    fn on_signature_generated(&self, _event: &SignatureGeneratedEvent) {
        self.signatures.fetch_add(1, Ordering::Relaxed);
    }

    fn on_operation_blocked(&self, _event: &OperationBlockedEvent) {
        self.blocked.fetch_add(1, Ordering::Relaxed);
    }

    fn on_error(&self, _event: &ErrorEvent) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

struct PanickingHandler;

impl AceEventHandler for PanickingHandler {
    fn on_operation_blocked(&self, _event: &OperationBlockedEvent) {
        panic!("handler failure");
    }
}

fn blocked_event() -> OperationBlockedEvent {
    OperationBlockedEvent {
        hook_name: "pre-merge".to_string(),
        violation_id: "structural.no-circular-deps-1".to_string(),
        reason: "critical structural violation must be fixed".to_string(),
        override_allowed: false,
    }
}

#[test]
fn test_handler_noop_defaults() {
    struct NoopHandler;
    impl AceEventHandler for NoopHandler {}

    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(NoopHandler));
    dispatcher.emit_error(&ErrorEvent {
        message: "nothing listens".to_string(),
        error_code: "DETECTION_ERROR".to_string(),
    });
    assert_eq!(dispatcher.handler_count(), 1);
}

#[test]
fn test_empty_dispatcher_is_a_no_op() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_operation_blocked(&blocked_event());
}

#[test]
fn test_events_fan_out_to_every_handler() {
    let first = Arc::new(CountingHandler::default());
    let second = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(first.clone());
    dispatcher.register(second.clone());

    dispatcher.emit_signature_generated(&SignatureGeneratedEvent {
        hash: "ab".repeat(32),
        module_count: 3,
        edge_count: 2,
        commit: "0".repeat(40),
    });

    assert_eq!(first.signatures.load(Ordering::Relaxed), 1);
    assert_eq!(second.signatures.load(Ordering::Relaxed), 1);
}

#[test]
fn test_panicking_handler_does_not_starve_others() {
    let counter = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_operation_blocked(&blocked_event());
    dispatcher.emit_operation_blocked(&blocked_event());

    assert_eq!(counter.blocked.load(Ordering::Relaxed), 2);
}
