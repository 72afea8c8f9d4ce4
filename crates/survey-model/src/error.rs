//! Error types for building variables and catalogs.

use thiserror::Error;

use crate::MeasurementType;

/// Errors raised when a variable or catalog violates its invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// Variable names must be non-empty.
    #[error("Variable name must not be empty")]
    EmptyName,

    /// Two catalog entries share a name.
    #[error("Duplicate variable '{name}' in catalog")]
    DuplicateVariable {
        /// The repeated variable name.
        name: String,
    },

    /// Two value labels share a raw code.
    #[error("Duplicate value code '{code}' in value labels")]
    DuplicateValueCode {
        /// The repeated code.
        code: String,
    },

    /// Value labels were attached to a scale or string variable.
    #[error("Variable '{name}' is {measurement_type} and cannot carry value labels")]
    ValueLabelsNotAllowed {
        /// The variable name.
        name: String,
        /// Its measurement type.
        measurement_type: MeasurementType,
    },
}

/// Result type for model construction.
pub type Result<T> = std::result::Result<T, ModelError>;
