//! End-to-end builder scenarios over the mock survey catalog.

use survey_analysis::{
    AnalysisBuilder, AnalysisDefaults, AnalysisError, AnalysisSession, AnalysisType,
    AssignOutcome, CommandOutcome, ConfidenceLevel, Readiness, Rejection, Role, SessionCommand,
    rules, weight_candidates,
};
use survey_model::{CatalogProvider, MeasurementType, MockCatalog, Variable, VariableCatalog};

fn mock() -> VariableCatalog {
    MockCatalog.load().expect("mock catalog is valid")
}

fn var<'a>(catalog: &'a VariableCatalog, name: &str) -> &'a Variable {
    catalog.get(name).expect("variable in mock catalog")
}

fn names(variables: &[Variable]) -> Vec<&str> {
    variables.iter().map(|v| v.name.as_str()).collect()
}

#[test]
fn crosstab_becomes_runnable_with_rows_and_columns() {
    let catalog = mock();
    let mut builder = AnalysisBuilder::new(AnalysisType::Crosstab);

    assert_eq!(
        builder.assign(Role::Rows, var(&catalog, "Region")),
        AssignOutcome::Accepted {
            role: Role::Rows,
            position: 0
        }
    );
    assert_eq!(
        builder.readiness(),
        Readiness::Incomplete {
            missing: vec![Role::Columns]
        }
    );

    assert!(builder.assign(Role::Columns, var(&catalog, "Gender")).is_accepted());
    assert!(builder.can_run());

    let request = builder.prepare_run().unwrap();
    assert_eq!(request.rows, vec!["Region"]);
    assert_eq!(request.columns, vec!["Gender"]);
    assert_eq!(request.dependent, None);
}

#[test]
fn scale_variable_is_rejected_from_rows() {
    let catalog = mock();
    let mut builder = AnalysisBuilder::new(AnalysisType::Crosstab);
    let before = builder.clone();

    let outcome = builder.assign(Role::Rows, var(&catalog, "Age"));
    assert!(matches!(
        outcome.rejection(),
        Some(Rejection::TypeMismatch {
            role: Role::Rows,
            measurement_type: MeasurementType::Scale,
            ..
        })
    ));
    assert_eq!(builder, before);
}

#[test]
fn nominal_variable_is_rejected_as_t_test_dependent() {
    let catalog = mock();
    let mut builder = AnalysisBuilder::new(AnalysisType::TTest);
    let before = builder.clone();

    let outcome = builder.assign(Role::Dependent, var(&catalog, "Region"));
    assert!(matches!(
        outcome.rejection(),
        Some(Rejection::TypeMismatch {
            role: Role::Dependent,
            measurement_type: MeasurementType::Nominal,
            ..
        })
    ));
    assert_eq!(builder, before);

    let outcome = builder.assign(Role::Dependent, var(&catalog, "Age"));
    assert!(outcome.is_accepted());
    assert_eq!(names(builder.configuration().occupants(Role::Dependent)), vec!["Age"]);
}

#[test]
fn rows_hold_at_most_three_variables() {
    let catalog = mock();
    let mut builder = AnalysisBuilder::new(AnalysisType::Crosstab);
    for name in ["Gender", "Satisfaction", "Region"] {
        assert!(builder.assign(Role::Rows, var(&catalog, name)).is_accepted());
    }

    let outcome = builder.assign(Role::Rows, var(&catalog, "Income"));
    assert_eq!(
        outcome,
        AssignOutcome::Rejected(Rejection::RoleFull {
            role: Role::Rows,
            capacity: 3
        })
    );
    assert_eq!(
        names(builder.configuration().rows()),
        vec!["Gender", "Satisfaction", "Region"]
    );
}

#[test]
fn same_variable_may_fill_rows_and_columns() {
    let catalog = mock();
    let mut builder = AnalysisBuilder::new(AnalysisType::Crosstab);
    let region = var(&catalog, "Region");

    assert!(builder.assign(Role::Rows, region).is_accepted());
    assert!(builder.assign(Role::Rows, region).is_accepted());
    assert!(builder.assign(Role::Columns, region).is_accepted());
    assert_eq!(names(builder.configuration().rows()), vec!["Region", "Region"]);
    assert!(builder.can_run());
}

#[test]
fn t_test_needs_dependent_and_groups() {
    let catalog = mock();
    let mut builder = AnalysisBuilder::new(AnalysisType::TTest);

    assert!(builder.assign(Role::Dependent, var(&catalog, "Age")).is_accepted());
    assert!(!builder.can_run());
    assert!(
        !builder
            .assign(Role::Groups, var(&catalog, "Likelihood_Recommend"))
            .is_accepted()
    );
    assert!(builder.assign(Role::Groups, var(&catalog, "Gender")).is_accepted());
    assert!(builder.can_run());
}

#[test]
fn rows_are_inactive_for_t_tests() {
    let catalog = mock();
    let mut builder = AnalysisBuilder::new(AnalysisType::TTest);

    let outcome = builder.assign(Role::Rows, var(&catalog, "Gender"));
    assert_eq!(
        outcome,
        AssignOutcome::Rejected(Rejection::RoleInactive {
            role: Role::Rows,
            analysis_type: AnalysisType::TTest
        })
    );
}

#[test]
fn switching_type_clears_roles_but_keeps_weight() {
    let catalog = mock();
    let mut builder = AnalysisBuilder::new(AnalysisType::Crosstab);
    builder.assign(Role::Rows, var(&catalog, "Region"));
    builder.assign(Role::Columns, var(&catalog, "Gender"));
    builder.set_weight(Some(var(&catalog, "Weight_Final")));
    builder.set_filter_expression("Age > 30");
    builder.set_confidence_level(ConfidenceLevel::NinetyNine);

    builder.set_analysis_type(AnalysisType::TTest);

    let config = builder.configuration();
    assert!(config.rows().is_empty());
    assert!(config.columns().is_empty());
    assert_eq!(config.weight().map(|v| v.name.as_str()), Some("Weight_Final"));
    assert_eq!(config.filter_expression(), "Age > 30");
    assert_eq!(config.confidence_level(), ConfidenceLevel::NinetyNine);
    assert!(!builder.can_run());
}

#[test]
fn reselecting_the_same_type_also_clears() {
    let catalog = mock();
    let mut builder = AnalysisBuilder::new(AnalysisType::Crosstab);
    builder.assign(Role::Rows, var(&catalog, "Region"));

    builder.set_analysis_type(AnalysisType::Crosstab);
    assert_eq!(builder.configuration().occupancy(Role::Rows), 0);
}

#[test]
fn unassign_by_position_keeps_order() {
    let catalog = mock();
    let mut builder = AnalysisBuilder::new(AnalysisType::Crosstab);
    for name in ["Gender", "Satisfaction", "Region"] {
        builder.assign(Role::Rows, var(&catalog, name));
    }

    let removed = builder.unassign(Role::Rows, Some(1));
    assert_eq!(names(&removed), vec!["Satisfaction"]);
    assert_eq!(names(builder.configuration().rows()), vec!["Gender", "Region"]);

    assert!(builder.unassign(Role::Rows, Some(5)).is_empty());
    assert_eq!(builder.configuration().occupancy(Role::Rows), 2);

    // Freed capacity can be reused.
    assert!(builder.assign(Role::Rows, var(&catalog, "Income")).is_accepted());
}

#[test]
fn weight_dropdown_replaces_and_clears() {
    let catalog = mock();
    let mut builder = AnalysisBuilder::new(AnalysisType::TTest);

    assert!(builder.set_weight(Some(var(&catalog, "Weight_Final"))).is_accepted());
    assert!(builder.set_weight(Some(var(&catalog, "Age"))).is_accepted());
    assert_eq!(
        builder.configuration().weight().map(|v| v.name.as_str()),
        Some("Age")
    );

    // A categorical weight is refused and the previous one is kept.
    assert!(!builder.set_weight(Some(var(&catalog, "Gender"))).is_accepted());
    assert_eq!(
        builder.configuration().weight().map(|v| v.name.as_str()),
        Some("Age")
    );

    builder.set_weight(None);
    assert!(builder.configuration().weight().is_none());
}

#[test]
fn weight_candidates_are_scale_variables() {
    let catalog = mock();
    let candidates: Vec<&str> = weight_candidates(&catalog)
        .into_iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(
        candidates,
        vec!["Age", "Likelihood_Recommend", "Weight_Final"]
    );
}

#[test]
fn anova_accepts_a_dependent_but_never_runs() {
    let catalog = mock();
    let mut builder = AnalysisBuilder::new(AnalysisType::Anova);

    assert!(builder.assign(Role::Dependent, var(&catalog, "Age")).is_accepted());
    assert!(!builder.assign(Role::Groups, var(&catalog, "Gender")).is_accepted());
    assert_eq!(builder.readiness(), Readiness::Unsupported);
    assert!(builder.preview().is_none());
    assert!(matches!(
        builder.prepare_run(),
        Err(AnalysisError::Unsupported {
            analysis_type: AnalysisType::Anova
        })
    ));
}

#[test]
fn string_variables_fit_no_role() {
    let text = Variable::new("Comment", "Open comment", MeasurementType::String, 900);
    for analysis_type in AnalysisType::ALL {
        for role in Role::ALL {
            assert!(!rules::accepts(analysis_type, role, text.measurement_type));
            let mut builder = AnalysisBuilder::new(analysis_type);
            assert!(!builder.assign(role, &text).is_accepted());
        }
    }
}

#[test]
fn not_runnable_reports_missing_roles() {
    let builder = AnalysisBuilder::new(AnalysisType::TTest);
    let err = builder.prepare_run().unwrap_err();
    assert_eq!(
        err.to_string(),
        "t-test analysis cannot run: missing Dependent Variable, Grouping Variable"
    );
}

#[test]
fn defaults_seed_new_configurations() {
    let defaults = AnalysisDefaults {
        analysis_type: AnalysisType::TTest,
        confidence_level: ConfidenceLevel::Ninety,
        ..AnalysisDefaults::default()
    };
    let builder = AnalysisBuilder::with_defaults(&defaults);
    assert_eq!(builder.analysis_type(), AnalysisType::TTest);
    assert_eq!(
        builder.configuration().confidence_level(),
        ConfidenceLevel::Ninety
    );
    assert!(builder.configuration().report_options().show_significance_tests);
    assert!(!builder.configuration().report_options().add_to_report);
}

#[test]
fn session_script_builds_a_t_test() {
    let catalog = mock();
    let mut session = AnalysisSession::new(&catalog, AnalysisDefaults::default());
    let script = [
        "type t-test",
        "assign dependent likelihood_recommend",
        "assign groups Gender",
        "weight Weight_Final",
        "confidence 90",
        "filter Region = 'North'",
    ];
    for line in script {
        let command: SessionCommand = line.parse().unwrap();
        session.apply(command).unwrap();
    }

    let request = session.builder().prepare_run().unwrap();
    assert_eq!(request.analysis_type, AnalysisType::TTest);
    assert_eq!(request.dependent.as_deref(), Some("Likelihood_Recommend"));
    assert_eq!(request.groups.as_deref(), Some("Gender"));
    assert_eq!(request.weight.as_deref(), Some("Weight_Final"));
    assert_eq!(request.confidence_level, ConfidenceLevel::Ninety);
    assert_eq!(request.filter_expression.as_deref(), Some("Region = 'North'"));
}

#[test]
fn session_reports_unknown_variables() {
    let catalog = mock();
    let mut session = AnalysisSession::new(&catalog, AnalysisDefaults::default());

    let err = session.assign_by_name(Role::Rows, "Education").unwrap_err();
    assert!(matches!(err, AnalysisError::UnknownVariable { ref name } if name == "Education"));

    let err = session
        .apply(SessionCommand::Weight {
            variable: Some("Education".to_string()),
        })
        .unwrap_err();
    assert!(matches!(err, AnalysisError::UnknownVariable { .. }));
}

#[test]
fn session_unassign_and_reset() {
    let catalog = mock();
    let mut session = AnalysisSession::new(&catalog, AnalysisDefaults::default());
    session.assign_by_name(Role::Rows, "Region").unwrap();
    session.assign_by_name(Role::Rows, "Gender").unwrap();

    let outcome = session
        .apply(SessionCommand::Unassign {
            role: Role::Rows,
            index: None,
        })
        .unwrap();
    assert_eq!(
        outcome,
        CommandOutcome::Removed {
            role: Role::Rows,
            variables: vec!["Region".to_string(), "Gender".to_string()]
        }
    );

    session.apply(SessionCommand::SetFilter {
        expression: "Age > 18".to_string(),
    })
    .unwrap();
    session.apply(SessionCommand::Reset).unwrap();
    assert_eq!(session.builder(), &AnalysisBuilder::default());
}

#[test]
fn session_search_filters_the_catalog() {
    let catalog = mock();
    let session = AnalysisSession::new(&catalog, AnalysisDefaults::default());
    let found: Vec<&str> = session
        .search("REGION")
        .into_iter()
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(found, vec!["Region"]);
    assert_eq!(session.search("").len(), catalog.len());
}
