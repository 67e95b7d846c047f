//! Console reporter: human-readable output with color codes.

use super::Reporter;
use crate::classification::ViolationSeverity;
use crate::enforcement::{EnforcementActionType, HookTriggerResult};

/// Console reporter for human-readable terminal output.
pub struct ConsoleReporter {
    pub use_color: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn status_symbol(&self, action: EnforcementActionType) -> &'static str {
        match action {
            EnforcementActionType::Allow | EnforcementActionType::Unknown => "✓",
            EnforcementActionType::Warn => "⚠",
            EnforcementActionType::Block => "✗",
            EnforcementActionType::Escalate => "⇧",
            EnforcementActionType::RequireApproval => "⊘",
        }
    }

    fn color_start(&self, severity: ViolationSeverity) -> &'static str {
        if !self.use_color {
            return "";
        }
        match severity {
            ViolationSeverity::Critical | ViolationSeverity::High => "\x1b[31m", // red
            ViolationSeverity::Medium => "\x1b[33m",                           // yellow
            ViolationSeverity::Low => "\x1b[36m",                              // cyan
            ViolationSeverity::Info => "\x1b[90m",                             // gray
        }
    }

    fn color_end(&self) -> &'static str {
        if self.use_color {
            "\x1b[0m"
        } else {
            ""
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporter for ConsoleReporter {
    fn name(&self) -> &'static str {
        "console"
    }

    fn generate(&self, result: &HookTriggerResult) -> Result<String, String> {
        let mut output = String::new();

        output.push_str("╔══════════════════════════════════════════╗\n");
        output.push_str("║        Architecture Governance Report    ║\n");
        output.push_str("╚══════════════════════════════════════════╝\n\n");

        if !result.triggered {
            output.push_str(&format!("Hook {} not triggered (absent or disabled)\n", result.hook_name));
            return Ok(output);
        }

        for (action, exec) in result.actions.iter().zip(&result.results) {
            let violation = &action.violation;
            let cs = self.color_start(violation.severity);
            let ce = self.color_end();
            output.push_str(&format!(
                "{} {}{}{} {}: {}\n",
                self.status_symbol(exec.action_type),
                cs,
                violation.severity,
                ce,
                violation.constraint_id(),
                violation.description(),
            ));

            match exec.action_type {
                EnforcementActionType::Warn => {
                    output.push_str(&format!("  ⚠ {}\n", exec.message));
                }
                EnforcementActionType::Block => {
                    output.push_str(&format!("  Blocked: {}\n", exec.message));
                    for step in exec.remediation_steps.iter().flatten() {
                        output.push_str(&format!("    {step}\n"));
                    }
                    if let Some(ref instructions) = exec.override_instructions {
                        output.push_str(&format!("  {instructions}\n"));
                    }
                }
                EnforcementActionType::RequireApproval => {
                    output.push_str(&format!("  Approval required: {}\n", exec.message));
                    if let Some(file) = violation.file() {
                        output.push_str(&format!("  File: {file}\n"));
                    }
                    if let Some(ref domain) = action.governance_context.protected_domain {
                        output.push_str(&format!("  Domain: {domain}\n"));
                    }
                }
                EnforcementActionType::Escalate => {
                    output.push_str(&format!("  Escalated: {}\n", exec.message));
                }
                _ => {}
            }
        }

        let s = &result.summary;
        output.push_str(&format!(
            "\n─── Summary ({}): {} allowed, {} warned, {} blocked, {} escalated, {} approval required ───\n",
            result.hook_name, s.allowed, s.warned, s.blocked, s.escalated, s.approval_required
        ));

        if s.blocked == 0 && s.approval_required == 0 {
            output.push_str("Result: PASSED ✓\n");
        } else {
            output.push_str("Result: FAILED ✗\n");
        }

        Ok(output)
    }
}
