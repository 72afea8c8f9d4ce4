//! The analysis configuration owned by a builder.

use serde::{Deserialize, Serialize};
use survey_model::Variable;

use crate::types::{AnalysisType, ConfidenceLevel, ReportOptions, Role};

/// Current state of one analysis being configured.
///
/// Only [`AnalysisBuilder`](crate::AnalysisBuilder) mutates a configuration,
/// so role contents always satisfy the acceptance table and role capacities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisConfiguration {
    pub(crate) analysis_type: AnalysisType,
    pub(crate) rows: Vec<Variable>,
    pub(crate) columns: Vec<Variable>,
    pub(crate) dependent: Option<Variable>,
    pub(crate) groups: Option<Variable>,
    pub(crate) weight: Option<Variable>,
    pub(crate) filter_expression: String,
    pub(crate) confidence_level: ConfidenceLevel,
    pub(crate) report_options: ReportOptions,
}

impl AnalysisConfiguration {
    pub(crate) fn new(defaults: &AnalysisDefaults) -> Self {
        Self {
            analysis_type: defaults.analysis_type,
            rows: Vec::new(),
            columns: Vec::new(),
            dependent: None,
            groups: None,
            weight: None,
            filter_expression: String::new(),
            confidence_level: defaults.confidence_level,
            report_options: defaults.report,
        }
    }

    pub fn analysis_type(&self) -> AnalysisType {
        self.analysis_type
    }

    pub fn rows(&self) -> &[Variable] {
        &self.rows
    }

    pub fn columns(&self) -> &[Variable] {
        &self.columns
    }

    pub fn dependent(&self) -> Option<&Variable> {
        self.dependent.as_ref()
    }

    pub fn groups(&self) -> Option<&Variable> {
        self.groups.as_ref()
    }

    pub fn weight(&self) -> Option<&Variable> {
        self.weight.as_ref()
    }

    /// Free-text case filter. Never parsed.
    pub fn filter_expression(&self) -> &str {
        &self.filter_expression
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    pub fn report_options(&self) -> &ReportOptions {
        &self.report_options
    }

    /// Occupants of `role` in slot order.
    pub fn occupants(&self, role: Role) -> &[Variable] {
        match role {
            Role::Rows => &self.rows,
            Role::Columns => &self.columns,
            Role::Dependent => self.dependent.as_slice(),
            Role::Groups => self.groups.as_slice(),
            Role::Weight => self.weight.as_slice(),
        }
    }

    /// Number of variables currently in `role`.
    pub fn occupancy(&self, role: Role) -> usize {
        self.occupants(role).len()
    }

    /// Empty every role except the weight.
    pub(crate) fn clear_role_assignments(&mut self) {
        self.rows.clear();
        self.columns.clear();
        self.dependent = None;
        self.groups = None;
    }
}

/// Starting values for new configurations, usually read from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisDefaults {
    /// Analysis type selected when a session opens.
    #[serde(rename = "default_type")]
    pub analysis_type: AnalysisType,
    pub confidence_level: ConfidenceLevel,
    #[serde(skip)]
    pub report: ReportOptions,
}
