//! Memory fabric: the long-term store telemetry lands in.

use std::sync::{Mutex, PoisonError};

use ace_core::errors::{AceErrorCode, TelemetryError};
use tracing::warn;

use crate::classification::ClassifiedViolation;

use super::types::{EnforcementEvent, EnforcementQueryFilters, ViolationEvent, ViolationQueryFilters};

/// Storage backend for violation and enforcement events.
///
/// Implementations may fail; every caller in this crate logs and moves on.
pub trait MemoryFabric: Send + Sync {
    fn store_violation(&self, event: &ViolationEvent) -> Result<(), TelemetryError>;

    fn store_enforcement(&self, event: &EnforcementEvent) -> Result<(), TelemetryError>;

    fn query_violations(&self, filters: &ViolationQueryFilters) -> Result<Vec<ViolationEvent>, TelemetryError>;

    fn query_enforcements(
        &self,
        filters: &EnforcementQueryFilters,
    ) -> Result<Vec<EnforcementEvent>, TelemetryError>;
}

/// Process-local fabric. Events are returned in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryFabric {
    violations: Mutex<Vec<ViolationEvent>>,
    enforcements: Mutex<Vec<EnforcementEvent>>,
}

impl InMemoryFabric {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn enforcement_count(&self) -> usize {
        self.enforcements.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl MemoryFabric for InMemoryFabric {
    fn store_violation(&self, event: &ViolationEvent) -> Result<(), TelemetryError> {
        self.violations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }

    fn store_enforcement(&self, event: &EnforcementEvent) -> Result<(), TelemetryError> {
        self.enforcements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }

    fn query_violations(&self, filters: &ViolationQueryFilters) -> Result<Vec<ViolationEvent>, TelemetryError> {
        let events = self.violations.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(events.iter().filter(|e| filters.matches(e)).cloned().collect())
    }

    fn query_enforcements(
        &self,
        filters: &EnforcementQueryFilters,
    ) -> Result<Vec<EnforcementEvent>, TelemetryError> {
        let events = self.enforcements.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(events.iter().filter(|e| filters.matches(e)).cloned().collect())
    }
}

/// Violations recorded in `fabric` matching `filters`. Empty on sink error.
pub fn query_violations_from_memory(
    fabric: &dyn MemoryFabric,
    filters: &ViolationQueryFilters,
) -> Vec<ClassifiedViolation> {
    match fabric.query_violations(filters) {
        Ok(events) => events.into_iter().map(|e| e.violation).collect(),
        Err(e) => {
            warn!(error = %e.coded_string(), "violation query failed, returning no results");
            Vec::new()
        }
    }
}

/// Enforcement events recorded in `fabric` matching `filters`. Empty on sink error.
pub fn query_enforcements_from_memory(
    fabric: &dyn MemoryFabric,
    filters: &EnforcementQueryFilters,
) -> Vec<EnforcementEvent> {
    match fabric.query_enforcements(filters) {
        Ok(events) => events,
        Err(e) => {
            warn!(error = %e.coded_string(), "enforcement query failed, returning no results");
            Vec::new()
        }
    }
}
