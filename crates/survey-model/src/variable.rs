//! Variable descriptors and value-label codebooks.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::MeasurementType;

/// One entry of a codebook: a raw code and its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueLabel {
    /// Raw code as stored in the data (e.g. "1").
    pub code: String,
    /// Display label (e.g. "Male").
    pub label: String,
}

/// Ordered codebook of a categorical variable.
///
/// Codes are unique. Entries keep codebook order, which is the order
/// categories appear in previews and tables.
///
/// # Example
///
/// ```
/// use survey_model::ValueLabels;
///
/// let labels = ValueLabels::new([("1", "North"), ("2", "South")]).unwrap();
/// assert_eq!(labels.get("2"), Some("South"));
/// assert!(ValueLabels::new([("1", "North"), ("1", "South")]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ValueLabel>", into = "Vec<ValueLabel>")]
pub struct ValueLabels {
    entries: Vec<ValueLabel>,
}

impl ValueLabels {
    /// Build a codebook from `(code, label)` pairs, rejecting repeated codes.
    pub fn new<I, C, L>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (C, L)>,
        C: Into<String>,
        L: Into<String>,
    {
        let mut labels = Self::default();
        for (code, label) in pairs {
            labels.push(code.into(), label.into())?;
        }
        Ok(labels)
    }

    fn push(&mut self, code: String, label: String) -> Result<()> {
        if self.entries.iter().any(|entry| entry.code == code) {
            return Err(ModelError::DuplicateValueCode { code });
        }
        self.entries.push(ValueLabel { code, label });
        Ok(())
    }

    /// Display label for a raw code.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.label.as_str())
    }

    /// Entries in codebook order.
    pub fn iter(&self) -> impl Iterator<Item = &ValueLabel> {
        self.entries.iter()
    }

    /// Display labels in codebook order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }

    /// Raw codes in codebook order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.code.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<ValueLabel>> for ValueLabels {
    type Error = ModelError;

    fn try_from(entries: Vec<ValueLabel>) -> Result<Self> {
        Self::new(entries.into_iter().map(|entry| (entry.code, entry.label)))
    }
}

impl From<ValueLabels> for Vec<ValueLabel> {
    fn from(labels: ValueLabels) -> Self {
        labels.entries
    }
}

/// Descriptor of one dataset column.
///
/// Deserialization runs the same checks as construction, so a decoded
/// variable never has an empty name or labels on a non-categorical type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VariableRecord")]
pub struct Variable {
    /// Short identifier, unique within a catalog.
    pub name: String,
    /// Human-readable description.
    pub label: String,
    /// Measurement level; decides which analysis roles accept the variable.
    pub measurement_type: MeasurementType,
    /// Count of non-missing observations.
    pub valid_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_labels: Option<ValueLabels>,
}

/// Unchecked wire form of [`Variable`].
#[derive(Deserialize)]
struct VariableRecord {
    name: String,
    label: String,
    measurement_type: MeasurementType,
    valid_count: u64,
    #[serde(default)]
    value_labels: Option<ValueLabels>,
}

impl TryFrom<VariableRecord> for Variable {
    type Error = ModelError;

    fn try_from(record: VariableRecord) -> Result<Self> {
        let variable = Self {
            name: record.name,
            label: record.label,
            measurement_type: record.measurement_type,
            valid_count: record.valid_count,
            value_labels: record.value_labels,
        };
        variable.validate()?;
        Ok(variable)
    }
}

impl Variable {
    /// Create a variable without value labels.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        measurement_type: MeasurementType,
        valid_count: u64,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            measurement_type,
            valid_count,
            value_labels: None,
        }
    }

    /// Attach a codebook. Only nominal and ordinal variables carry one.
    pub fn with_value_labels(mut self, labels: ValueLabels) -> Result<Self> {
        if !self.measurement_type.is_categorical() {
            return Err(ModelError::ValueLabelsNotAllowed {
                name: self.name,
                measurement_type: self.measurement_type,
            });
        }
        self.value_labels = Some(labels);
        Ok(self)
    }

    pub fn value_labels(&self) -> Option<&ValueLabels> {
        self.value_labels.as_ref()
    }

    /// Case-insensitive substring match on name or label.
    ///
    /// An empty (or whitespace-only) term matches every variable.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term) || self.label.to_lowercase().contains(&term)
    }

    /// Check the name and codebook invariants.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ModelError::EmptyName);
        }
        if self.value_labels.is_some() && !self.measurement_type.is_categorical() {
            return Err(ModelError::ValueLabelsNotAllowed {
                name: self.name.clone(),
                measurement_type: self.measurement_type,
            });
        }
        Ok(())
    }
}
