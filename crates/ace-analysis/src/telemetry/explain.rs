//! Human-readable explanation of an enforcement decision.

use ace_core::constants::DEFAULT_OVERRIDE_ENV_VAR;

use crate::classification::{ClassifiedViolation, ViolationCategory};
use crate::enforcement::{CsBoundary, EnforcementAction, EnforcementActionType, EnforcementContext};

/// Explain `action` for operators, naming the default override flag.
pub fn generate_enforcement_reason(
    violation: &ClassifiedViolation,
    action: &EnforcementAction,
    context: &EnforcementContext,
) -> String {
    generate_enforcement_reason_with_override(violation, action, context, DEFAULT_OVERRIDE_ENV_VAR)
}

/// Same as [`generate_enforcement_reason`], naming `override_env_var`.
/// Output depends only on the inputs.
pub fn generate_enforcement_reason_with_override(
    violation: &ClassifiedViolation,
    action: &EnforcementAction,
    _context: &EnforcementContext,
    override_env_var: &str,
) -> String {
    let mut out = String::new();
    let title = action.action_type.name().to_uppercase().replace('_', " ");
    out.push_str(&format!("Enforcement Action: {title}\n\n"));
    out.push_str(&format!("Reason: {}\n\n", action.reason));

    if let Some(boundary) = action.governance_context.cs_boundary {
        let rule = match boundary {
            CsBoundary::Cs2 => "Architecture Approval Workflow (Constitutional Safeguard)",
            CsBoundary::Cs1 => "Immutable Guardrails (Constitutional Protection)",
            _ => "(Constitutional Safeguard)",
        };
        out.push_str(&format!("Governance Rule: {boundary} {rule}\n\n"));
    }

    if let Some(file) = violation.file() {
        out.push_str(&format!("File: '{file}'\n\n"));
    }

    out.push_str(&format!(
        "Constraint Violated: {} (severity: {})\n\n",
        violation.constraint_id(),
        violation.severity
    ));

    out.push_str("Required Action:\n");
    let steps: Option<[String; 3]> = match action.action_type {
        EnforcementActionType::RequireApproval => Some([
            "Submit architecture change proposal via CS2 workflow".to_string(),
            "Await architecture owner approval".to_string(),
            "After approval, changes can proceed".to_string(),
        ]),
        EnforcementActionType::Block => Some([
            format!("Identify {} issue", violation.category),
            "Refactor to resolve the violation".to_string(),
            "Run detection again to verify fix".to_string(),
        ]),
        EnforcementActionType::Warn => Some([
            format!("Review the {} issue", violation.category),
            "Plan remediation".to_string(),
            "Fix when convenient".to_string(),
        ]),
        _ => None,
    };
    if let Some(steps) = steps {
        for (i, step) in steps.iter().enumerate() {
            out.push_str(&format!("{}. {step}\n", i + 1));
        }
        out.push('\n');
    }

    out.push_str("Why This Matters:\n");
    out.push_str(match violation.category {
        ViolationCategory::DependencyDirection => {
            "Circular dependencies make code unmaintainable and prevent proper testing.\n\n"
        }
        ViolationCategory::ProtectedPath => {
            "Protected files define system governance. Changes require explicit review to maintain constitutional integrity.\n\n"
        }
        ViolationCategory::LayerViolation => {
            "Layer violations compromise architectural boundaries and maintainability.\n\n"
        }
        _ => "This constraint ensures architectural integrity and system quality.\n\n",
    });

    if action.governance_context.override_allowed {
        out.push_str(&format!("Override: Set {override_env_var}=true with justification"));
    } else {
        out.push_str("Override: Not permitted (Constitutional protection)");
    }
    out
}
