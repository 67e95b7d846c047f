//! Governance-aware decision tree: one violation + one hook → one action.

use tracing::debug;

use crate::classification::{ClassifiedViolation, ViolationNature, ViolationSeverity};
use crate::detection::now_millis;

use super::types::{
    ActionMetadata, CsBoundary, CsBoundaryCheck, EnforcementAction, EnforcementActionType,
    EnforcementContext, EnforcementHook, GovernanceContext, ProtectedDomainCheck,
};

/// Paths whose modification belongs to a governance domain.
pub const PROTECTED_DOMAINS: &[&str] = &[
    "BUILD_PHILOSOPHY.md",
    ".github/workflows/",
    "foreman/constitution/",
    "foreman/governance/",
];

/// Decide the action for `violation` under `hook`. First matching rule wins.
///
/// `context` is accepted for boundary rules that read it; none currently do.
pub fn determine_enforcement_action(
    violation: &ClassifiedViolation,
    hook: &EnforcementHook,
    context: &EnforcementContext,
) -> EnforcementAction {
    let cs = check_cs_boundaries(violation, context);
    let action = match (cs.violated, cs.cs_boundary) {
        (true, Some(CsBoundary::Cs2)) => build_action(
            violation,
            hook,
            EnforcementActionType::RequireApproval,
            "CS2 architecture approval required for protected file modification".to_string(),
            GovernanceContext {
                cs_boundary: Some(CsBoundary::Cs2),
                protected_domain: check_protected_domain(violation).domain,
                requires_approval: true,
                override_allowed: false,
            },
            &["check_cs_boundaries", "cs2_check", "require_approval"],
        ),
        (true, Some(CsBoundary::Cs1)) => build_action(
            violation,
            hook,
            EnforcementActionType::Block,
            "CS1 immutable guardrail violation".to_string(),
            GovernanceContext {
                cs_boundary: Some(CsBoundary::Cs1),
                protected_domain: None,
                requires_approval: false,
                override_allowed: false,
            },
            &["check_cs_boundaries", "cs1_block"],
        ),
        // CS3 and the rest fall through to the severity rules.
        _ => {
            let enforceable = violation.severity != ViolationSeverity::Info;
            let config = &hook.config;
            if enforceable
                && (config.block_on_severity.contains(&violation.severity)
                    || config.block_on_nature.contains(&violation.nature))
            {
                build_action(
                    violation,
                    hook,
                    EnforcementActionType::Block,
                    format!("{} {} violation must be fixed", violation.severity, violation.nature),
                    GovernanceContext {
                        override_allowed: config.allow_override,
                        ..Default::default()
                    },
                    &["check_severity", "block"],
                )
            } else if enforceable && config.warn_on_severity.contains(&violation.severity) {
                build_action(
                    violation,
                    hook,
                    EnforcementActionType::Warn,
                    format!("{} violation detected - review recommended", violation.severity),
                    GovernanceContext {
                        override_allowed: true,
                        ..Default::default()
                    },
                    &["check_severity", "warn"],
                )
            } else {
                build_action(
                    violation,
                    hook,
                    EnforcementActionType::Allow,
                    "Low severity violation logged for awareness".to_string(),
                    GovernanceContext {
                        override_allowed: true,
                        ..Default::default()
                    },
                    &["allow"],
                )
            }
        }
    };

    debug!(
        hook = %hook.name,
        violation = %violation.id,
        action = %action.action_type,
        path = ?action.metadata.decision_path,
        "enforcement decision"
    );
    action
}

fn build_action(
    violation: &ClassifiedViolation,
    hook: &EnforcementHook,
    action_type: EnforcementActionType,
    reason: String,
    governance_context: GovernanceContext,
    path: &[&str],
) -> EnforcementAction {
    EnforcementAction {
        action_type,
        violation: violation.clone(),
        reason,
        governance_context,
        metadata: ActionMetadata {
            hook_name: hook.name,
            timestamp: now_millis(),
            decision_path: path.iter().map(|s| s.to_string()).collect(),
        },
    }
}

/// Constitutional boundary crossed by `violation`, if any.
///
/// CS2 and CS1 are path rules and take precedence over the CS3 nature rule.
pub fn check_cs_boundaries(
    violation: &ClassifiedViolation,
    _context: &EnforcementContext,
) -> CsBoundaryCheck {
    let file = violation.file().unwrap_or("");

    if file == "BUILD_PHILOSOPHY.md" || file.contains("foreman/constitution/") {
        return CsBoundaryCheck {
            violated: true,
            cs_boundary: Some(CsBoundary::Cs2),
            description: "CS2 Architecture Approval Workflow - Protected file modification requires approval"
                .to_string(),
            requires_approval: true,
        };
    }

    if file.contains(".github/workflows/") {
        return CsBoundaryCheck {
            violated: true,
            cs_boundary: Some(CsBoundary::Cs1),
            description: "CS1 Immutable Guardrails - Workflow files cannot be modified".to_string(),
            requires_approval: false,
        };
    }

    if violation.nature == ViolationNature::Governance && violation.severity == ViolationSeverity::Critical {
        return CsBoundaryCheck {
            violated: true,
            cs_boundary: Some(CsBoundary::Cs3),
            description: "CS3 Incident Workflow - Critical governance violation".to_string(),
            requires_approval: false,
        };
    }

    CsBoundaryCheck {
        violated: false,
        cs_boundary: None,
        description: "No CS boundary violation detected".to_string(),
        requires_approval: false,
    }
}

/// First protected domain containing the violation's file.
pub fn check_protected_domain(violation: &ClassifiedViolation) -> ProtectedDomainCheck {
    let file = violation.file().unwrap_or("");
    if !file.is_empty() {
        if let Some(domain) = PROTECTED_DOMAINS.iter().find(|d| file.contains(**d)) {
            return ProtectedDomainCheck {
                is_protected: true,
                domain: Some((*domain).to_string()),
                paths: vec![file.to_string()],
                requires_approval: true,
            };
        }
    }
    ProtectedDomainCheck {
        is_protected: false,
        domain: None,
        paths: Vec::new(),
        requires_approval: false,
    }
}

pub fn requires_explicit_approval(action: &EnforcementAction) -> bool {
    action.governance_context.requires_approval
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::ViolationCategory;
    use crate::detection::{GovernanceType, RawViolation, ViolationDetail, ViolationLocation};
    use crate::enforcement::types::{Environment, HookConfig, HookName};

    fn violation(file: &str, severity: ViolationSeverity, nature: ViolationNature) -> ClassifiedViolation {
        ClassifiedViolation {
            violation: RawViolation {
                constraint_id: "governance.protected-paths".to_string(),
                description: "test".to_string(),
                location: Some(ViolationLocation {
                    file: Some(file.to_string()),
                    ..Default::default()
                }),
                context: Default::default(),
                detected_at: now_millis(),
                detail: ViolationDetail::Governance {
                    governance_type: GovernanceType::ProtectedPath,
                    protected_file: Some(file.to_string()),
                    cs_boundary: None,
                },
            },
            id: "v-1".to_string(),
            severity,
            category: ViolationCategory::ProtectedPath,
            nature,
            false_positive: false,
            suppression_id: None,
        }
    }

    fn hook(config: HookConfig) -> EnforcementHook {
        EnforcementHook {
            name: HookName::PreMerge,
            enabled: true,
            config,
        }
    }

    fn ctx() -> EnforcementContext {
        EnforcementContext::new("merge", Environment::Development)
    }

    #[test]
    fn cs2_wins_over_severity() {
        let v = violation("foreman/constitution/x.md", ViolationSeverity::Low, ViolationNature::Structural);
        let h = hook(HookConfig {
            block_on_severity: vec![ViolationSeverity::Low],
            ..Default::default()
        });
        let action = determine_enforcement_action(&v, &h, &ctx());
        assert_eq!(action.action_type, EnforcementActionType::RequireApproval);
        assert_eq!(action.governance_context.protected_domain.as_deref(), Some("foreman/constitution/"));
        assert!(requires_explicit_approval(&action));
    }

    #[test]
    fn info_is_never_enforced() {
        let v = violation("src/a.ts", ViolationSeverity::Info, ViolationNature::Structural);
        let h = hook(HookConfig {
            block_on_nature: vec![ViolationNature::Structural],
            warn_on_severity: vec![ViolationSeverity::Info],
            ..Default::default()
        });
        let action = determine_enforcement_action(&v, &h, &ctx());
        assert_eq!(action.action_type, EnforcementActionType::Allow);
        assert_eq!(action.metadata.decision_path, vec!["allow"]);
    }

    #[test]
    fn cs3_falls_through() {
        let v = violation("src/a.ts", ViolationSeverity::Critical, ViolationNature::Governance);
        let check = check_cs_boundaries(&v, &ctx());
        assert_eq!(check.cs_boundary, Some(CsBoundary::Cs3));
        let action = determine_enforcement_action(&v, &hook(HookConfig::default()), &ctx());
        assert_eq!(action.action_type, EnforcementActionType::Allow);
        assert_eq!(action.governance_context.cs_boundary, None);
    }

    #[test]
    fn unprotected_file_has_no_domain() {
        let v = violation("src/a.ts", ViolationSeverity::High, ViolationNature::Structural);
        let check = check_protected_domain(&v);
        assert!(!check.is_protected);
        assert!(check.paths.is_empty());
    }
}
