//! Measurement levels of survey variables.
//!
//! The measurement level decides which analysis roles accept a variable:
//! categorical levels go into rows, columns and groups, scale variables into
//! dependent and weight slots, and free-text strings into none.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement level of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementType {
    /// Unordered categories (e.g. region, gender).
    Nominal,
    /// Ordered categories (e.g. a satisfaction rating).
    Ordinal,
    /// Continuous or count values (e.g. age, weights).
    Scale,
    /// Free text.
    String,
}

impl MeasurementType {
    /// All measurement levels in display order.
    pub const ALL: [MeasurementType; 4] = [
        MeasurementType::Nominal,
        MeasurementType::Ordinal,
        MeasurementType::Scale,
        MeasurementType::String,
    ];

    /// Returns the lowercase name used in codebooks and serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::Nominal => "nominal",
            MeasurementType::Ordinal => "ordinal",
            MeasurementType::Scale => "scale",
            MeasurementType::String => "string",
        }
    }

    /// Returns true for nominal and ordinal variables.
    pub fn is_categorical(&self) -> bool {
        matches!(self, MeasurementType::Nominal | MeasurementType::Ordinal)
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MeasurementType {
    type Err = String;

    /// Parse a measurement level (case-insensitive, SPSS aliases allowed).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "nominal" => Ok(MeasurementType::Nominal),
            "ordinal" => Ok(MeasurementType::Ordinal),
            "scale" | "continuous" => Ok(MeasurementType::Scale),
            "string" | "text" => Ok(MeasurementType::String),
            _ => Err(format!("Unknown measurement type: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!("Nominal".parse(), Ok(MeasurementType::Nominal));
        assert_eq!(" SCALE ".parse(), Ok(MeasurementType::Scale));
        assert_eq!("continuous".parse(), Ok(MeasurementType::Scale));
        assert_eq!("text".parse(), Ok(MeasurementType::String));
        assert!("interval".parse::<MeasurementType>().is_err());
    }

    #[test]
    fn only_nominal_and_ordinal_are_categorical() {
        let categorical: Vec<_> = MeasurementType::ALL
            .into_iter()
            .filter(MeasurementType::is_categorical)
            .collect();
        assert_eq!(
            categorical,
            vec![MeasurementType::Nominal, MeasurementType::Ordinal]
        );
    }
}
