//! Aggregation over classified violations.

use super::types::*;
use crate::constraints::ConstraintCategory;

pub fn aggregate_by_severity(violations: &[ClassifiedViolation]) -> SeverityAggregate {
    let mut agg = SeverityAggregate::default();
    for v in violations {
        match v.severity {
            ViolationSeverity::Critical => agg.critical += 1,
            ViolationSeverity::High => agg.high += 1,
            ViolationSeverity::Medium => agg.medium += 1,
            ViolationSeverity::Low => agg.low += 1,
            ViolationSeverity::Info => agg.info += 1,
        }
    }
    agg
}

pub fn aggregate_by_category(violations: &[ClassifiedViolation]) -> CategoryAggregate {
    let mut agg = CategoryAggregate::default();
    for v in violations {
        let slot = match v.category {
            ConstraintCategory::DependencyDirection => &mut agg.dependency_direction,
            ConstraintCategory::LayerViolation => &mut agg.layer_violation,
            ConstraintCategory::ImportRestriction => &mut agg.import_restriction,
            ConstraintCategory::ModuleBoundary => &mut agg.module_boundary,
            ConstraintCategory::ApiStability => &mut agg.api_stability,
            ConstraintCategory::TypeStability => &mut agg.type_stability,
            ConstraintCategory::EventSchema => &mut agg.event_schema,
            ConstraintCategory::ProtectedPath => &mut agg.protected_path,
            ConstraintCategory::Constitutional => &mut agg.constitutional,
            ConstraintCategory::CsBoundary => &mut agg.cs_boundary,
            ConstraintCategory::GovernanceIntegrity => &mut agg.governance_integrity,
        };
        *slot += 1;
    }
    agg
}

pub fn aggregate_by_nature(violations: &[ClassifiedViolation]) -> NatureAggregate {
    let mut agg = NatureAggregate::default();
    for v in violations {
        match v.nature {
            ViolationNature::Structural => agg.structural += 1,
            ViolationNature::Contract => agg.contract += 1,
            ViolationNature::Governance => agg.governance += 1,
        }
    }
    agg
}

/// Violations flagged as likely false positives, in input order.
pub fn identify_false_positives(violations: &[ClassifiedViolation]) -> Vec<&ClassifiedViolation> {
    violations.iter().filter(|v| v.false_positive).collect()
}
