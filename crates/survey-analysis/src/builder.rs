//! Analysis configuration builder.
//!
//! The builder owns an [`AnalysisConfiguration`] and is the only way to change
//! it. Every drop onto a zone becomes one [`AnalysisBuilder::assign`] call,
//! which checks the acceptance table and the role capacity before committing
//! anything. A rejected drop leaves the configuration untouched and comes back
//! as a [`Rejection`] the host can use for feedback.
//!
//! # Example
//!
//! ```
//! use survey_analysis::{AnalysisBuilder, AnalysisType, Role};
//! use survey_model::{CatalogProvider, MockCatalog};
//!
//! let catalog = MockCatalog.load().unwrap();
//! let mut builder = AnalysisBuilder::new(AnalysisType::Crosstab);
//!
//! assert!(builder.assign(Role::Rows, catalog.get("Region").unwrap()).is_accepted());
//! assert!(!builder.assign(Role::Rows, catalog.get("Age").unwrap()).is_accepted());
//! assert!(!builder.can_run());
//!
//! builder.assign(Role::Columns, catalog.get("Gender").unwrap());
//! assert!(builder.can_run());
//! ```

use serde::Serialize;
use survey_model::{MeasurementType, Variable, VariableCatalog};
use thiserror::Error;
use tracing::{debug, info};

use crate::configuration::{AnalysisConfiguration, AnalysisDefaults};
use crate::error::{AnalysisError, Result};
use crate::preview::{Preview, render_preview};
use crate::rules;
use crate::types::{AnalysisType, ConfidenceLevel, ReportOptions, Role};

/// Why a variable was not placed into a role.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// The role has no drop zone under the current analysis type.
    #[error("{} is not used by {analysis_type} analyses", .role.label())]
    RoleInactive {
        role: Role,
        analysis_type: AnalysisType,
    },

    /// The variable's measurement level is not accepted by the role.
    #[error(
        "{} accepts {} variables; '{variable}' is {measurement_type}",
        .role.label(),
        format_types(.accepted)
    )]
    TypeMismatch {
        role: Role,
        variable: String,
        measurement_type: MeasurementType,
        accepted: Vec<MeasurementType>,
    },

    /// The role already holds as many variables as it can.
    #[error("{} is full ({capacity} max)", .role.label())]
    RoleFull { role: Role, capacity: usize },
}

fn format_types(types: &[MeasurementType]) -> String {
    types
        .iter()
        .map(MeasurementType::as_str)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Result of an assignment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AssignOutcome {
    /// The variable now occupies `position` within `role`.
    Accepted { role: Role, position: usize },
    /// Nothing changed.
    Rejected(Rejection),
}

impl AssignOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AssignOutcome::Accepted { .. })
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            AssignOutcome::Rejected(rejection) => Some(rejection),
            AssignOutcome::Accepted { .. } => None,
        }
    }
}

/// Whether the current configuration may be run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Readiness {
    /// Every required role is filled.
    Ready,
    /// Required roles still empty, in canvas order.
    Incomplete { missing: Vec<Role> },
    /// The analysis type has no run support.
    Unsupported,
}

/// Snapshot handed to whatever executes the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub analysis_type: AnalysisType,
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub dependent: Option<String>,
    pub groups: Option<String>,
    pub weight: Option<String>,
    pub filter_expression: Option<String>,
    pub confidence_level: ConfidenceLevel,
    pub report_options: ReportOptions,
}

/// Mediates every change to an [`AnalysisConfiguration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisBuilder {
    config: AnalysisConfiguration,
}

impl Default for AnalysisBuilder {
    fn default() -> Self {
        Self::with_defaults(&AnalysisDefaults::default())
    }
}

impl AnalysisBuilder {
    /// Start an empty configuration of the given type.
    pub fn new(analysis_type: AnalysisType) -> Self {
        Self::with_defaults(&AnalysisDefaults {
            analysis_type,
            ..AnalysisDefaults::default()
        })
    }

    /// Start an empty configuration from settings defaults.
    pub fn with_defaults(defaults: &AnalysisDefaults) -> Self {
        Self {
            config: AnalysisConfiguration::new(defaults),
        }
    }

    pub fn configuration(&self) -> &AnalysisConfiguration {
        &self.config
    }

    pub fn analysis_type(&self) -> AnalysisType {
        self.config.analysis_type
    }

    /// Switch analysis type. Rows, columns, dependent and groups are always
    /// emptied, even when `analysis_type` is already selected; weight, filter,
    /// confidence level and report options are kept.
    pub fn set_analysis_type(&mut self, analysis_type: AnalysisType) {
        debug!(
            from = %self.config.analysis_type,
            to = %analysis_type,
            "analysis type changed; clearing role assignments"
        );
        self.config.analysis_type = analysis_type;
        self.config.clear_role_assignments();
    }

    /// Check whether `variable` could be dropped onto `role` right now.
    ///
    /// Checks run in order: role active, measurement level accepted, capacity.
    pub fn check(&self, role: Role, variable: &Variable) -> std::result::Result<(), Rejection> {
        let analysis_type = self.config.analysis_type;
        if !rules::is_active(analysis_type, role) {
            return Err(Rejection::RoleInactive {
                role,
                analysis_type,
            });
        }
        let accepted = rules::accepted_types(analysis_type, role);
        if !accepted.contains(&variable.measurement_type) {
            return Err(Rejection::TypeMismatch {
                role,
                variable: variable.name.clone(),
                measurement_type: variable.measurement_type,
                accepted: accepted.to_vec(),
            });
        }
        if self.config.occupancy(role) >= role.capacity() {
            return Err(Rejection::RoleFull {
                role,
                capacity: role.capacity(),
            });
        }
        Ok(())
    }

    /// Place `variable` into `role`.
    ///
    /// Multi-slot roles append; single-slot roles take the variable when empty.
    /// Any rejection leaves the configuration unchanged.
    pub fn assign(&mut self, role: Role, variable: &Variable) -> AssignOutcome {
        if let Err(rejection) = self.check(role, variable) {
            debug!(%role, variable = %variable.name, %rejection, "assignment rejected");
            return AssignOutcome::Rejected(rejection);
        }
        let position = self.config.occupancy(role);
        let occupant = variable.clone();
        match role {
            Role::Rows => self.config.rows.push(occupant),
            Role::Columns => self.config.columns.push(occupant),
            Role::Dependent => self.config.dependent = Some(occupant),
            Role::Groups => self.config.groups = Some(occupant),
            Role::Weight => self.config.weight = Some(occupant),
        }
        debug!(%role, variable = %variable.name, position, "variable assigned");
        AssignOutcome::Accepted { role, position }
    }

    /// Remove variables from `role` and return them.
    ///
    /// - multi-slot role, `Some(i)`: removes position `i`, keeping the order of
    ///   the rest; an out-of-range index removes nothing
    /// - multi-slot role, `None`: empties the role
    /// - single-slot role: empties the slot, whatever the index
    pub fn unassign(&mut self, role: Role, index: Option<usize>) -> Vec<Variable> {
        let removed = match role {
            Role::Rows => remove_from(&mut self.config.rows, index),
            Role::Columns => remove_from(&mut self.config.columns, index),
            Role::Dependent => self.config.dependent.take().into_iter().collect(),
            Role::Groups => self.config.groups.take().into_iter().collect(),
            Role::Weight => self.config.weight.take().into_iter().collect(),
        };
        if !removed.is_empty() {
            debug!(%role, ?index, removed = removed.len(), "variables unassigned");
        }
        removed
    }

    /// Weight dropdown: `None` clears the weight, `Some` replaces it.
    ///
    /// Unlike [`assign`](Self::assign) an occupied weight slot is not a
    /// rejection; only the measurement level is checked.
    pub fn set_weight(&mut self, variable: Option<&Variable>) -> AssignOutcome {
        let Some(variable) = variable else {
            self.config.weight = None;
            debug!("weight cleared");
            return AssignOutcome::Accepted {
                role: Role::Weight,
                position: 0,
            };
        };
        let previous = self.config.weight.take();
        let outcome = self.assign(Role::Weight, variable);
        if !outcome.is_accepted() {
            self.config.weight = previous;
        }
        outcome
    }

    pub fn set_filter_expression(&mut self, expression: impl Into<String>) {
        self.config.filter_expression = expression.into();
    }

    pub fn set_confidence_level(&mut self, level: ConfidenceLevel) {
        self.config.confidence_level = level;
    }

    pub fn report_options_mut(&mut self) -> &mut ReportOptions {
        &mut self.config.report_options
    }

    /// Run readiness of the current configuration. Weight is never required.
    pub fn readiness(&self) -> Readiness {
        let Some(required) = rules::required_roles(self.config.analysis_type) else {
            return Readiness::Unsupported;
        };
        let missing: Vec<Role> = required
            .iter()
            .copied()
            .filter(|role| self.config.occupancy(*role) == 0)
            .collect();
        if missing.is_empty() {
            Readiness::Ready
        } else {
            Readiness::Incomplete { missing }
        }
    }

    /// Whether the "Run Analysis" trigger is enabled.
    ///
    /// Crosstabs need a row and a column variable, t-tests a dependent and a
    /// grouping variable; ANOVA never runs.
    pub fn can_run(&self) -> bool {
        self.readiness() == Readiness::Ready
    }

    /// Placeholder preview of the current configuration.
    pub fn preview(&self) -> Option<Preview> {
        render_preview(&self.config)
    }

    /// Snapshot the configuration for execution.
    pub fn prepare_run(&self) -> Result<AnalysisRequest> {
        let analysis_type = self.config.analysis_type;
        match self.readiness() {
            Readiness::Ready => {}
            Readiness::Incomplete { missing } => {
                return Err(AnalysisError::NotRunnable {
                    analysis_type,
                    missing,
                });
            }
            Readiness::Unsupported => return Err(AnalysisError::Unsupported { analysis_type }),
        }

        let config = &self.config;
        let request = AnalysisRequest {
            analysis_type,
            rows: names(&config.rows),
            columns: names(&config.columns),
            dependent: config.dependent.as_ref().map(|v| v.name.clone()),
            groups: config.groups.as_ref().map(|v| v.name.clone()),
            weight: config.weight.as_ref().map(|v| v.name.clone()),
            filter_expression: Some(config.filter_expression.trim())
                .filter(|expr| !expr.is_empty())
                .map(str::to_string),
            confidence_level: config.confidence_level,
            report_options: config.report_options,
        };
        info!(
            analysis_type = %request.analysis_type,
            weighted = request.weight.is_some(),
            filtered = request.filter_expression.is_some(),
            "analysis prepared"
        );
        Ok(request)
    }
}

fn remove_from(slots: &mut Vec<Variable>, index: Option<usize>) -> Vec<Variable> {
    match index {
        Some(index) if index < slots.len() => vec![slots.remove(index)],
        Some(_) => Vec::new(),
        None => std::mem::take(slots),
    }
}

fn names(variables: &[Variable]) -> Vec<String> {
    variables.iter().map(|v| v.name.clone()).collect()
}

/// Options of the weight dropdown: the scale variables of the catalog.
pub fn weight_candidates(catalog: &VariableCatalog) -> Vec<&Variable> {
    catalog.of_type(MeasurementType::Scale)
}
