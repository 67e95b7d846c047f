//! Reporters: output formats for hook trigger results.

pub mod console;
pub mod json;

use crate::enforcement::{BlockingError, HookTriggerResult};

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, result: &HookTriggerResult) -> Result<String, String>;
}

/// Create a reporter by format name.
pub fn create_reporter(format: &str) -> Option<Box<dyn Reporter>> {
    match format {
        "console" => Some(Box::new(console::ConsoleReporter::default())),
        "json" => Some(Box::new(json::JsonReporter)),
        _ => None,
    }
}

pub fn available_formats() -> &'static [&'static str] {
    &["console", "json"]
}

/// Operator-facing text for one blocked operation.
pub fn render_blocking_error(error: &BlockingError) -> String {
    let mut out = format!("✗ Operation blocked: {}\n", error.action.reason);
    out.push_str(&format!("  Violation: {}\n", error.action.violation.description()));
    if let Some(file) = error.action.violation.file() {
        out.push_str(&format!("  File: {file}\n"));
    }
    out.push_str("  Remediation:\n");
    for step in &error.remediation {
        out.push_str(&format!("    {step}\n"));
    }
    match &error.override_instructions {
        Some(instructions) => out.push_str(&format!("  {instructions}\n")),
        None => out.push_str("  Override: Not permitted\n"),
    }
    out
}
