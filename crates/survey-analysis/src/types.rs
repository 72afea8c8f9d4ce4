//! Analysis kinds, builder roles, and analysis options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Statistical procedure being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisType {
    /// Contingency table of categorical row and column variables.
    #[default]
    Crosstab,
    /// Independent samples t-test of a scale variable across two groups.
    #[serde(alias = "ttest")]
    TTest,
    /// One-way analysis of variance. Selectable but never runnable.
    Anova,
}

impl AnalysisType {
    /// All analysis types in menu order.
    pub const ALL: [AnalysisType; 3] = [
        AnalysisType::Crosstab,
        AnalysisType::TTest,
        AnalysisType::Anova,
    ];

    /// Returns the identifier used on the command line and in settings.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisType::Crosstab => "crosstab",
            AnalysisType::TTest => "t-test",
            AnalysisType::Anova => "anova",
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisType::Crosstab => "Crosstab",
            AnalysisType::TTest => "T-Test",
            AnalysisType::Anova => "ANOVA",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "crosstab" | "crosstabs" => Ok(AnalysisType::Crosstab),
            "t-test" | "ttest" => Ok(AnalysisType::TTest),
            "anova" => Ok(AnalysisType::Anova),
            _ => Err(format!("Unknown analysis type: {s}")),
        }
    }
}

/// Drop zone a variable can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Crosstab row variables (ordered, up to 3).
    Rows,
    /// Crosstab column variables (ordered, up to 3).
    Columns,
    /// Dependent (test) variable.
    Dependent,
    /// Grouping variable.
    Groups,
    /// Case weight, valid for every analysis type.
    Weight,
}

impl Role {
    /// All roles in canvas order.
    pub const ALL: [Role; 5] = [
        Role::Rows,
        Role::Columns,
        Role::Dependent,
        Role::Groups,
        Role::Weight,
    ];

    /// Returns the identifier used in session commands.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Rows => "rows",
            Role::Columns => "columns",
            Role::Dependent => "dependent",
            Role::Groups => "groups",
            Role::Weight => "weight",
        }
    }

    /// Returns the drop zone title.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Rows => "Rows",
            Role::Columns => "Columns",
            Role::Dependent => "Dependent Variable",
            Role::Groups => "Grouping Variable",
            Role::Weight => "Weight Variable",
        }
    }

    /// Maximum number of occupants.
    pub fn capacity(&self) -> usize {
        match self {
            Role::Rows | Role::Columns => 3,
            Role::Dependent | Role::Groups | Role::Weight => 1,
        }
    }

    /// Returns true for ordered roles holding more than one variable.
    pub fn is_multi_slot(&self) -> bool {
        self.capacity() > 1
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "rows" | "row" => Ok(Role::Rows),
            "columns" | "column" | "cols" => Ok(Role::Columns),
            "dependent" | "dep" => Ok(Role::Dependent),
            "groups" | "group" | "grouping" => Ok(Role::Groups),
            "weight" => Ok(Role::Weight),
            _ => Err(format!("Unknown role: {s}")),
        }
    }
}

/// Confidence level for intervals and significance tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ConfidenceLevel {
    Ninety,
    #[default]
    NinetyFive,
    NinetyNine,
}

impl ConfidenceLevel {
    pub const ALL: [ConfidenceLevel; 3] = [
        ConfidenceLevel::Ninety,
        ConfidenceLevel::NinetyFive,
        ConfidenceLevel::NinetyNine,
    ];

    /// Level in percent.
    pub fn percent(&self) -> u8 {
        match self {
            ConfidenceLevel::Ninety => 90,
            ConfidenceLevel::NinetyFive => 95,
            ConfidenceLevel::NinetyNine => 99,
        }
    }
}

impl TryFrom<u8> for ConfidenceLevel {
    type Error = String;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        match percent {
            90 => Ok(ConfidenceLevel::Ninety),
            95 => Ok(ConfidenceLevel::NinetyFive),
            99 => Ok(ConfidenceLevel::NinetyNine),
            other => Err(format!(
                "Unsupported confidence level {other}% (expected 90, 95 or 99)"
            )),
        }
    }
}

impl From<ConfidenceLevel> for u8 {
    fn from(level: ConfidenceLevel) -> Self {
        level.percent()
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

impl FromStr for ConfidenceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_end_matches('%');
        let percent: u8 = digits
            .parse()
            .map_err(|_| format!("Invalid confidence level: {s}"))?;
        ConfidenceLevel::try_from(percent)
    }
}

/// Output switches shown next to the canvas. They do not influence whether an
/// analysis can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Append the result to the project report.
    pub add_to_report: bool,
    /// Include significance tests in the output.
    pub show_significance_tests: bool,
    /// Include the generated interpretation.
    pub show_ai_interpretation: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            add_to_report: false,
            show_significance_tests: true,
            show_ai_interpretation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_type_parses_common_spellings() {
        assert_eq!("T-Test".parse(), Ok(AnalysisType::TTest));
        assert_eq!("ttest".parse(), Ok(AnalysisType::TTest));
        assert_eq!("t_test".parse(), Ok(AnalysisType::TTest));
        assert_eq!("Crosstab".parse(), Ok(AnalysisType::Crosstab));
        assert!("regression".parse::<AnalysisType>().is_err());
    }

    #[test]
    fn role_capacities() {
        assert_eq!(Role::Rows.capacity(), 3);
        assert_eq!(Role::Columns.capacity(), 3);
        for role in [Role::Dependent, Role::Groups, Role::Weight] {
            assert_eq!(role.capacity(), 1);
            assert!(!role.is_multi_slot());
        }
    }

    #[test]
    fn confidence_level_accepts_only_three_values() {
        assert_eq!("99".parse(), Ok(ConfidenceLevel::NinetyNine));
        assert_eq!("90%".parse(), Ok(ConfidenceLevel::Ninety));
        assert!("97".parse::<ConfidenceLevel>().is_err());
        assert!(ConfidenceLevel::try_from(80).is_err());
        assert_eq!(ConfidenceLevel::default().percent(), 95);
    }

    #[test]
    fn report_option_defaults() {
        let options = ReportOptions::default();
        assert!(!options.add_to_report);
        assert!(options.show_significance_tests);
        assert!(options.show_ai_interpretation);
    }
}
