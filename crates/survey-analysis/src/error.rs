//! Error types for the analysis crate.
//!
//! Rejected assignments are not errors; they come back as
//! [`Rejection`](crate::Rejection) values. The errors here cover lookups,
//! run preparation, command parsing and frame materialisation.

use thiserror::Error;

use crate::types::{AnalysisType, Role};

/// Errors from analysis sessions and run preparation.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalysisError {
    /// Variable name not present in the catalog.
    #[error("Variable not found: {name}")]
    UnknownVariable {
        /// The name that was looked up.
        name: String,
    },

    /// Required roles are still empty.
    #[error("{analysis_type} analysis cannot run: missing {}", format_roles(.missing))]
    NotRunnable {
        analysis_type: AnalysisType,
        /// Empty required roles, in canvas order.
        missing: Vec<Role>,
    },

    /// The analysis type is selectable but has no run support.
    #[error("{analysis_type} analysis is not supported")]
    Unsupported { analysis_type: AnalysisType },

    /// A session command line could not be parsed.
    #[error("Invalid command '{line}': {message}")]
    InvalidCommand {
        /// The offending input.
        line: String,
        /// What was wrong with it.
        message: String,
    },

    /// Catalog construction failed.
    #[error("Catalog error: {0}")]
    Model(#[from] survey_model::ModelError),

    /// Polars DataFrame operation error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    pub(crate) fn invalid_command(line: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCommand {
            line: line.into(),
            message: message.into(),
        }
    }

    /// Get a user-facing hint for fixing this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnknownVariable { .. } => Some("Run `catalog` to list the available variables."),
            Self::NotRunnable { .. } => Some("Assign a variable to every required role."),
            Self::Unsupported { .. } => Some("Switch to crosstab or t-test."),
            Self::InvalidCommand { .. } => {
                Some("Commands: type, assign, unassign, weight, confidence, filter, reset.")
            }
            Self::Model(_) => Some("Check the catalog for repeated names or value codes."),
            Self::Polars(_) => None,
        }
    }
}

fn format_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_runnable_lists_missing_roles() {
        let err = AnalysisError::NotRunnable {
            analysis_type: AnalysisType::TTest,
            missing: vec![Role::Dependent, Role::Groups],
        };
        assert_eq!(
            err.to_string(),
            "t-test analysis cannot run: missing Dependent Variable, Grouping Variable"
        );
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn catalog_errors_convert_with_a_hint() {
        let err: AnalysisError = survey_model::ModelError::DuplicateVariable {
            name: "Region".to_string(),
        }
        .into();
        assert!(matches!(err, AnalysisError::Model(_)));
        assert!(err.to_string().starts_with("Catalog error: "));
        assert!(err.suggestion().is_some());
    }
}
