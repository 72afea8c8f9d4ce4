//! Analysis-building sessions.
//!
//! A session pairs a borrowed catalog with a fresh builder. Hosts translate
//! each user gesture (a completed drop, a dropdown change, a remove button)
//! into one [`SessionCommand`] and apply it; nothing survives the session.

use std::str::FromStr;

use serde::Serialize;
use survey_model::{Variable, VariableCatalog};

use crate::builder::{AnalysisBuilder, AssignOutcome, weight_candidates};
use crate::configuration::AnalysisDefaults;
use crate::error::{AnalysisError, Result};
use crate::types::{AnalysisType, ConfidenceLevel, Role};

/// One discrete host event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SessionCommand {
    /// Select an analysis type (empties the role assignments).
    SetType { analysis_type: AnalysisType },
    /// Drop a catalog variable onto a role.
    Assign { role: Role, variable: String },
    /// Remove a role entry (or the whole role when `index` is absent).
    Unassign { role: Role, index: Option<usize> },
    /// Pick a weight from the dropdown, or clear it.
    Weight { variable: Option<String> },
    SetConfidence { level: ConfidenceLevel },
    SetFilter { expression: String },
    /// Start over with the session defaults.
    Reset,
}

impl FromStr for SessionCommand {
    type Err = AnalysisError;

    /// Parse one command line.
    ///
    /// ```text
    /// type t-test
    /// assign rows Region
    /// unassign rows 0
    /// weight Weight_Final | weight none
    /// confidence 99
    /// filter Region = 'North'
    /// reset
    /// ```
    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(keyword, rest)| (keyword, rest.trim()));
        let invalid = |message: String| AnalysisError::invalid_command(line, message);
        let mut args = rest.split_whitespace();

        let command = match keyword.to_lowercase().as_str() {
            "type" => SessionCommand::SetType {
                analysis_type: rest.parse().map_err(invalid)?,
            },
            "assign" => {
                let role = args
                    .next()
                    .ok_or_else(|| invalid("expected a role".to_string()))?
                    .parse()
                    .map_err(invalid)?;
                let variable = args
                    .next()
                    .ok_or_else(|| invalid("expected a variable name".to_string()))?
                    .to_string();
                if let Some(extra) = args.next() {
                    return Err(invalid(format!("unexpected argument '{extra}'")));
                }
                SessionCommand::Assign { role, variable }
            }
            "unassign" | "remove" => {
                let role = args
                    .next()
                    .ok_or_else(|| invalid("expected a role".to_string()))?
                    .parse()
                    .map_err(invalid)?;
                let index = args
                    .next()
                    .map(|raw| {
                        raw.parse::<usize>()
                            .map_err(|_| invalid(format!("invalid index '{raw}'")))
                    })
                    .transpose()?;
                if let Some(extra) = args.next() {
                    return Err(invalid(format!("unexpected argument '{extra}'")));
                }
                SessionCommand::Unassign { role, index }
            }
            "weight" => match rest {
                "" => return Err(invalid("expected a variable name or 'none'".to_string())),
                none if none.eq_ignore_ascii_case("none") => {
                    SessionCommand::Weight { variable: None }
                }
                name => SessionCommand::Weight {
                    variable: Some(name.to_string()),
                },
            },
            "confidence" => SessionCommand::SetConfidence {
                level: rest.parse().map_err(invalid)?,
            },
            "filter" => SessionCommand::SetFilter {
                expression: rest.to_string(),
            },
            "reset" => SessionCommand::Reset,
            other => return Err(invalid(format!("unknown command '{other}'"))),
        };
        Ok(command)
    }
}

/// What applying a command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// An assignment was attempted.
    Assignment(AssignOutcome),
    /// Variables left a role.
    Removed { role: Role, variables: Vec<String> },
    /// Any other state change.
    Updated,
}

/// A catalog plus the builder configuring an analysis over it.
#[derive(Debug)]
pub struct AnalysisSession<'a> {
    catalog: &'a VariableCatalog,
    defaults: AnalysisDefaults,
    builder: AnalysisBuilder,
}

impl<'a> AnalysisSession<'a> {
    pub fn new(catalog: &'a VariableCatalog, defaults: AnalysisDefaults) -> Self {
        Self {
            catalog,
            defaults,
            builder: AnalysisBuilder::with_defaults(&defaults),
        }
    }

    pub fn catalog(&self) -> &'a VariableCatalog {
        self.catalog
    }

    pub fn builder(&self) -> &AnalysisBuilder {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut AnalysisBuilder {
        &mut self.builder
    }

    /// Variables panel filter.
    pub fn search(&self, term: &str) -> Vec<&'a Variable> {
        self.catalog.search(term)
    }

    /// Weight dropdown options.
    pub fn weight_candidates(&self) -> Vec<&'a Variable> {
        weight_candidates(self.catalog)
    }

    fn resolve(&self, name: &str) -> Result<&'a Variable> {
        self.catalog
            .lookup(name)
            .ok_or_else(|| AnalysisError::UnknownVariable {
                name: name.to_string(),
            })
    }

    /// Resolve `name` in the catalog and drop it onto `role`.
    pub fn assign_by_name(&mut self, role: Role, name: &str) -> Result<AssignOutcome> {
        let variable = self.resolve(name)?;
        Ok(self.builder.assign(role, variable))
    }

    /// Apply one host event.
    pub fn apply(&mut self, command: SessionCommand) -> Result<CommandOutcome> {
        let outcome = match command {
            SessionCommand::SetType { analysis_type } => {
                self.builder.set_analysis_type(analysis_type);
                CommandOutcome::Updated
            }
            SessionCommand::Assign { role, variable } => {
                CommandOutcome::Assignment(self.assign_by_name(role, &variable)?)
            }
            SessionCommand::Unassign { role, index } => {
                let removed = self.builder.unassign(role, index);
                CommandOutcome::Removed {
                    role,
                    variables: removed.into_iter().map(|v| v.name).collect(),
                }
            }
            SessionCommand::Weight { variable } => {
                let variable = variable.as_deref().map(|name| self.resolve(name)).transpose()?;
                CommandOutcome::Assignment(self.builder.set_weight(variable))
            }
            SessionCommand::SetConfidence { level } => {
                self.builder.set_confidence_level(level);
                CommandOutcome::Updated
            }
            SessionCommand::SetFilter { expression } => {
                self.builder.set_filter_expression(expression);
                CommandOutcome::Updated
            }
            SessionCommand::Reset => {
                self.builder = AnalysisBuilder::with_defaults(&self.defaults);
                CommandOutcome::Updated
            }
        };
        Ok(outcome)
    }
}
