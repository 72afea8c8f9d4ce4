//! Role acceptance table.
//!
//! Which measurement levels a drop zone takes depends on the analysis type.
//! The whole policy lives in [`ROLE_RULES`]; a role missing from the table for
//! an analysis type is inactive there and accepts nothing.
//!
//! | analysis | rows | columns | dependent | groups | weight |
//! |----------|------|---------|-----------|--------|--------|
//! | crosstab | nominal, ordinal | nominal, ordinal | - | - | scale |
//! | t-test   | - | - | scale | nominal, ordinal | scale |
//! | anova    | - | - | scale | - | scale |

use serde::Serialize;
use survey_model::MeasurementType;

use crate::types::{AnalysisType, Role};

const CATEGORICAL: &[MeasurementType] = &[MeasurementType::Nominal, MeasurementType::Ordinal];
const SCALE: &[MeasurementType] = &[MeasurementType::Scale];

const CROSSTAB_REQUIRED: &[Role] = &[Role::Rows, Role::Columns];
const T_TEST_REQUIRED: &[Role] = &[Role::Dependent, Role::Groups];

/// One row of the acceptance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleRule {
    /// Analysis type the rule applies to; `None` applies to every type.
    pub analysis_type: Option<AnalysisType>,
    pub role: Role,
    pub accepts: &'static [MeasurementType],
}

/// The acceptance table.
pub const ROLE_RULES: &[RoleRule] = &[
    RoleRule {
        analysis_type: Some(AnalysisType::Crosstab),
        role: Role::Rows,
        accepts: CATEGORICAL,
    },
    RoleRule {
        analysis_type: Some(AnalysisType::Crosstab),
        role: Role::Columns,
        accepts: CATEGORICAL,
    },
    RoleRule {
        analysis_type: Some(AnalysisType::TTest),
        role: Role::Dependent,
        accepts: SCALE,
    },
    RoleRule {
        analysis_type: Some(AnalysisType::TTest),
        role: Role::Groups,
        accepts: CATEGORICAL,
    },
    RoleRule {
        analysis_type: Some(AnalysisType::Anova),
        role: Role::Dependent,
        accepts: SCALE,
    },
    RoleRule {
        analysis_type: None,
        role: Role::Weight,
        accepts: SCALE,
    },
];

fn rule_for(analysis_type: AnalysisType, role: Role) -> Option<&'static RoleRule> {
    ROLE_RULES.iter().find(|rule| {
        rule.role == role && rule.analysis_type.is_none_or(|t| t == analysis_type)
    })
}

/// Measurement levels `role` accepts under `analysis_type` (empty when inactive).
pub fn accepted_types(analysis_type: AnalysisType, role: Role) -> &'static [MeasurementType] {
    match rule_for(analysis_type, role) {
        Some(rule) => rule.accepts,
        None => &[],
    }
}

/// Returns true if `role` is a drop zone for `analysis_type`.
pub fn is_active(analysis_type: AnalysisType, role: Role) -> bool {
    rule_for(analysis_type, role).is_some()
}

/// Returns true if `role` takes a variable of `measurement_type`.
pub fn accepts(analysis_type: AnalysisType, role: Role, measurement_type: MeasurementType) -> bool {
    accepted_types(analysis_type, role).contains(&measurement_type)
}

/// Drop zones shown for `analysis_type`, in canvas order.
pub fn active_roles(analysis_type: AnalysisType) -> Vec<Role> {
    Role::ALL
        .into_iter()
        .filter(|role| is_active(analysis_type, *role))
        .collect()
}

/// Roles that must be filled before `analysis_type` can run.
///
/// `None` means the analysis type cannot run at all.
pub fn required_roles(analysis_type: AnalysisType) -> Option<&'static [Role]> {
    match analysis_type {
        AnalysisType::Crosstab => Some(CROSSTAB_REQUIRED),
        AnalysisType::TTest => Some(T_TEST_REQUIRED),
        AnalysisType::Anova => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crosstab_zones_take_categorical_variables() {
        for role in [Role::Rows, Role::Columns] {
            assert!(accepts(AnalysisType::Crosstab, role, MeasurementType::Nominal));
            assert!(accepts(AnalysisType::Crosstab, role, MeasurementType::Ordinal));
            assert!(!accepts(AnalysisType::Crosstab, role, MeasurementType::Scale));
        }
        assert!(!is_active(AnalysisType::Crosstab, Role::Dependent));
        assert!(!is_active(AnalysisType::Crosstab, Role::Groups));
    }

    #[test]
    fn t_test_zones() {
        assert_eq!(accepted_types(AnalysisType::TTest, Role::Dependent), SCALE);
        assert_eq!(accepted_types(AnalysisType::TTest, Role::Groups), CATEGORICAL);
        assert!(accepted_types(AnalysisType::TTest, Role::Rows).is_empty());
    }

    #[test]
    fn weight_is_active_everywhere() {
        for analysis_type in AnalysisType::ALL {
            assert_eq!(accepted_types(analysis_type, Role::Weight), SCALE);
        }
    }

    #[test]
    fn strings_fit_nowhere() {
        for analysis_type in AnalysisType::ALL {
            for role in Role::ALL {
                assert!(!accepts(analysis_type, role, MeasurementType::String));
            }
        }
    }

    #[test]
    fn active_roles_follow_canvas_order() {
        assert_eq!(
            active_roles(AnalysisType::Crosstab),
            vec![Role::Rows, Role::Columns, Role::Weight]
        );
        assert_eq!(
            active_roles(AnalysisType::TTest),
            vec![Role::Dependent, Role::Groups, Role::Weight]
        );
        assert_eq!(
            active_roles(AnalysisType::Anova),
            vec![Role::Dependent, Role::Weight]
        );
    }

    #[test]
    fn anova_has_no_required_roles() {
        assert!(required_roles(AnalysisType::Anova).is_none());
        assert_eq!(required_roles(AnalysisType::Crosstab), Some(CROSSTAB_REQUIRED));
    }
}
