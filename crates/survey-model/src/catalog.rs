//! The read-only variable catalog and its providers.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::{MeasurementType, ValueLabels, Variable};

/// Ordered, immutable list of the variables of a dataset.
///
/// Names are unique. Nothing in the analysis layer mutates a catalog; builders
/// copy the descriptors they are given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Variable>", into = "Vec<Variable>")]
pub struct VariableCatalog {
    variables: Vec<Variable>,
}

impl VariableCatalog {
    /// Build a catalog, checking name uniqueness and per-variable invariants.
    pub fn new(variables: Vec<Variable>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(variables.len());
        for variable in &variables {
            variable.validate()?;
            if !seen.insert(variable.name.as_str()) {
                return Err(ModelError::DuplicateVariable {
                    name: variable.name.clone(),
                });
            }
        }
        Ok(Self { variables })
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|variable| variable.name == name)
    }

    /// Name lookup that falls back to a case-insensitive match.
    pub fn lookup(&self, name: &str) -> Option<&Variable> {
        let name = name.trim();
        self.get(name).or_else(|| {
            self.variables
                .iter()
                .find(|variable| variable.name.eq_ignore_ascii_case(name))
        })
    }

    /// Variables whose name or label contains `term`, in catalog order.
    pub fn search(&self, term: &str) -> Vec<&Variable> {
        self.variables
            .iter()
            .filter(|variable| variable.matches_search(term))
            .collect()
    }

    /// Variables of one measurement level, in catalog order.
    pub fn of_type(&self, measurement_type: MeasurementType) -> Vec<&Variable> {
        self.variables
            .iter()
            .filter(|variable| variable.measurement_type == measurement_type)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl TryFrom<Vec<Variable>> for VariableCatalog {
    type Error = ModelError;

    fn try_from(variables: Vec<Variable>) -> Result<Self> {
        Self::new(variables)
    }
}

impl From<VariableCatalog> for Vec<Variable> {
    fn from(catalog: VariableCatalog) -> Self {
        catalog.variables
    }
}

impl<'a> IntoIterator for &'a VariableCatalog {
    type Item = &'a Variable;
    type IntoIter = std::slice::Iter<'a, Variable>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.iter()
    }
}

/// Supplies the catalog a session works against.
pub trait CatalogProvider {
    /// Produce the catalog.
    fn load(&self) -> Result<VariableCatalog>;
}

/// Built-in provider returning the customer-satisfaction survey used by the
/// workspace mockups.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCatalog;

impl CatalogProvider for MockCatalog {
    fn load(&self) -> Result<VariableCatalog> {
        let gender = ValueLabels::new([("1", "Male"), ("2", "Female"), ("3", "Other")])?;
        let satisfaction = ValueLabels::new([
            ("1", "Very Dissatisfied"),
            ("2", "Dissatisfied"),
            ("3", "Neutral"),
            ("4", "Satisfied"),
            ("5", "Very Satisfied"),
        ])?;
        let region = ValueLabels::new([
            ("1", "North"),
            ("2", "South"),
            ("3", "East"),
            ("4", "West"),
        ])?;

        VariableCatalog::new(vec![
            Variable::new("Age", "Respondent Age", MeasurementType::Scale, 2450),
            Variable::new("Gender", "Gender Identity", MeasurementType::Nominal, 2450)
                .with_value_labels(gender)?,
            Variable::new(
                "Satisfaction",
                "Overall Satisfaction Rating",
                MeasurementType::Ordinal,
                2430,
            )
            .with_value_labels(satisfaction)?,
            Variable::new(
                "Likelihood_Recommend",
                "Likelihood to Recommend (0-10)",
                MeasurementType::Scale,
                2445,
            ),
            Variable::new("Region", "Geographic Region", MeasurementType::Nominal, 2450)
                .with_value_labels(region)?,
            Variable::new("Income", "Household Income", MeasurementType::Ordinal, 2380),
            Variable::new("Weight_Final", "Final Weight", MeasurementType::Scale, 2450),
        ])
    }
}
