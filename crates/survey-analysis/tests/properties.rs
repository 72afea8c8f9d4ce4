//! Property tests: no sequence of host events can break the builder invariants.

use proptest::prelude::*;
use survey_analysis::{AnalysisBuilder, AnalysisType, Readiness, Role, rules};
use survey_model::{CatalogProvider, MockCatalog, VariableCatalog};

#[derive(Debug, Clone)]
enum Event {
    SetType(AnalysisType),
    Assign(Role, usize),
    Unassign(Role, Option<usize>),
    Weight(Option<usize>),
}

fn analysis_type_strategy() -> impl Strategy<Value = AnalysisType> {
    prop_oneof![
        Just(AnalysisType::Crosstab),
        Just(AnalysisType::TTest),
        Just(AnalysisType::Anova),
    ]
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![
        Just(Role::Rows),
        Just(Role::Columns),
        Just(Role::Dependent),
        Just(Role::Groups),
        Just(Role::Weight),
    ]
}

fn event_strategy() -> impl Strategy<Value = Event> {
    prop_oneof![
        analysis_type_strategy().prop_map(Event::SetType),
        (role_strategy(), 0..7usize).prop_map(|(role, index)| Event::Assign(role, index)),
        (role_strategy(), proptest::option::of(0..4usize))
            .prop_map(|(role, index)| Event::Unassign(role, index)),
        proptest::option::of(0..7usize).prop_map(Event::Weight),
    ]
}

fn mock() -> VariableCatalog {
    MockCatalog.load().expect("mock catalog is valid")
}

fn apply(builder: &mut AnalysisBuilder, catalog: &VariableCatalog, event: &Event) {
    let variables: Vec<_> = catalog.iter().collect();
    match event {
        Event::SetType(analysis_type) => builder.set_analysis_type(*analysis_type),
        Event::Assign(role, index) => {
            let variable = variables[*index];
            let admissible =
                rules::accepts(builder.analysis_type(), *role, variable.measurement_type)
                    && builder.configuration().occupancy(*role) < role.capacity();
            let before = builder.clone();
            let outcome = builder.assign(*role, variable);
            assert_eq!(
                outcome.is_accepted(),
                admissible,
                "{} into {role} under {}",
                variable.name,
                before.analysis_type()
            );
            if admissible {
                let occupants = builder.configuration().occupants(*role);
                assert_eq!(occupants.len(), before.configuration().occupancy(*role) + 1);
                assert_eq!(
                    occupants.last().map(|v| v.name.as_str()),
                    Some(variable.name.as_str())
                );
            } else {
                assert_eq!(*builder, before, "rejected assignment changed state");
            }
        }
        Event::Unassign(role, index) => {
            builder.unassign(*role, *index);
        }
        Event::Weight(index) => {
            builder.set_weight(index.map(|i| variables[i]));
        }
    }
}

fn assert_invariants(builder: &AnalysisBuilder) {
    let config = builder.configuration();
    let analysis_type = config.analysis_type();
    for role in Role::ALL {
        let occupants = config.occupants(role);
        assert!(occupants.len() <= role.capacity(), "{role} over capacity");
        for variable in occupants {
            assert!(
                rules::accepts(analysis_type, role, variable.measurement_type),
                "{} in {role} under {analysis_type}",
                variable.name
            );
        }
    }

    let filled = |role: Role| config.occupancy(role) > 0;
    let expected = match analysis_type {
        AnalysisType::Crosstab => filled(Role::Rows) && filled(Role::Columns),
        AnalysisType::TTest => filled(Role::Dependent) && filled(Role::Groups),
        AnalysisType::Anova => false,
    };
    assert_eq!(builder.can_run(), expected);
    assert_eq!(builder.preview().is_some(), expected);
    assert_eq!(builder.prepare_run().is_ok(), expected);
    if analysis_type == AnalysisType::Anova {
        assert_eq!(builder.readiness(), Readiness::Unsupported);
    }
}

proptest! {
    #[test]
    fn event_sequences_preserve_invariants(
        events in proptest::collection::vec(event_strategy(), 0..40)
    ) {
        let catalog = mock();
        let mut builder = AnalysisBuilder::default();
        for event in &events {
            apply(&mut builder, &catalog, event);
            assert_invariants(&builder);
        }
    }

    #[test]
    fn type_switch_empties_every_role_but_weight(
        events in proptest::collection::vec(event_strategy(), 0..20),
        next in analysis_type_strategy()
    ) {
        let catalog = mock();
        let mut builder = AnalysisBuilder::default();
        for event in &events {
            apply(&mut builder, &catalog, event);
        }
        let weight = builder.configuration().weight().cloned();

        builder.set_analysis_type(next);

        let config = builder.configuration();
        prop_assert_eq!(config.analysis_type(), next);
        for role in [Role::Rows, Role::Columns, Role::Dependent, Role::Groups] {
            prop_assert_eq!(config.occupancy(role), 0);
        }
        prop_assert_eq!(config.weight().cloned(), weight);
    }
}
