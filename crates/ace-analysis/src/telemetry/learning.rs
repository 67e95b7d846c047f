//! Failure-learning classification: turn violations and enforcement outcomes
//! into improvement signals.

use crate::classification::{ClassifiedViolation, ViolationNature, ViolationSeverity};
use crate::enforcement::{EnforcementAction, ExecutionResult};

use super::types::{
    CiAction, EnforcementCiAction, EnforcementFlCategory, FlCategory, FlciClassification,
    FlciEnforcementClassification, FlciPriority, LearningSuggestion,
};

/// Gap category and CI action from nature, priority from severity.
pub fn classify_for_flci(violation: &ClassifiedViolation) -> FlciClassification {
    let (fl_category, ci_action) = match violation.nature {
        ViolationNature::Governance => (FlCategory::ArchitectureGap, CiAction::UpdateArchitecture),
        ViolationNature::Structural => (FlCategory::ImplementationGap, CiAction::FixCode),
        ViolationNature::Contract => (FlCategory::TypeSafetyGap, CiAction::AddTypeValidation),
    };
    let priority = match violation.severity {
        ViolationSeverity::Critical => FlciPriority::Immediate,
        ViolationSeverity::High => FlciPriority::High,
        ViolationSeverity::Medium => FlciPriority::Medium,
        ViolationSeverity::Low | ViolationSeverity::Info => FlciPriority::Low,
    };
    FlciClassification {
        violation_id: violation.id.clone(),
        fl_category,
        ci_action,
        priority,
        learning_suggestion: format!(
            "Consider {} to address {} violation",
            ci_action.name(),
            violation.category
        ),
    }
}

pub fn generate_learning_suggestion(violation: &ClassifiedViolation) -> LearningSuggestion {
    let (target_document, proposed_change, reasoning) = match violation.nature {
        ViolationNature::Governance => (
            "/foreman/constitution/governance-rules.md",
            format!("Add or update constraint for {}", violation.category),
            "Governance violation detected that may indicate missing or incomplete constraint definition",
        ),
        ViolationNature::Structural => (
            "/foreman/architecture-design-checklist.md",
            format!("Add checklist item for {}", violation.category),
            "Structural violation suggests missing architectural guideline",
        ),
        ViolationNature::Contract => (
            "/foreman/qa/api-contract-tests.md",
            format!("Add contract test for {}", violation.category),
            "Contract violation indicates missing API/type stability test",
        ),
    };
    LearningSuggestion {
        violation_id: violation.id.clone(),
        suggestion: format!("{} - Consider updating governance documentation", violation.description()),
        target_document: target_document.to_string(),
        proposed_change,
        reasoning: reasoning.to_string(),
    }
}

/// Total over every (action, result) pair.
pub fn classify_enforcement_for_flci(
    action: &EnforcementAction,
    result: &ExecutionResult,
) -> FlciEnforcementClassification {
    let fl_category = if result.success && !result.blocked {
        EnforcementFlCategory::EnforcementSuccess
    } else if result.blocked {
        EnforcementFlCategory::EnforcementBlocked
    } else if result.escalated {
        EnforcementFlCategory::EnforcementEscalated
    } else {
        EnforcementFlCategory::EnforcementOverridden
    };
    let ci_action = if result.blocked {
        EnforcementCiAction::StrengthenRule
    } else {
        EnforcementCiAction::RefineDetection
    };
    FlciEnforcementClassification {
        enforcement_id: format!("flci-{}", uuid::Uuid::new_v4()),
        fl_category,
        ci_action,
        learning_suggestion: format!(
            "Enforcement {} for {} resulted in {}",
            action.action_type,
            action.violation.category,
            fl_category.name()
        ),
    }
}
