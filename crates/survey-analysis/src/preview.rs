//! Placeholder previews of a configured analysis.
//!
//! Previews show the shape of the output a run would produce (categories,
//! statistics, titles) with every number replaced by a "no data" marker. No
//! statistic is ever computed here.
//!
//! # Example
//!
//! ```
//! use survey_analysis::{AnalysisBuilder, AnalysisType, Preview, Role};
//! use survey_model::{CatalogProvider, MockCatalog};
//!
//! let catalog = MockCatalog.load().unwrap();
//! let mut builder = AnalysisBuilder::new(AnalysisType::Crosstab);
//! builder.assign(Role::Rows, catalog.get("Region").unwrap());
//! builder.assign(Role::Columns, catalog.get("Gender").unwrap());
//!
//! let Some(Preview::Crosstab(table)) = builder.preview() else {
//!     panic!("crosstab preview expected");
//! };
//! assert_eq!(table.header(), ["Geographic Region", "Male", "Female", "Other", "Total"]);
//! assert_eq!(table.rows.len(), 5); // four regions plus the total row
//! ```

use std::fmt;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use serde::Serialize;
use survey_model::Variable;

use crate::configuration::AnalysisConfiguration;
use crate::error::Result;
use crate::types::AnalysisType;

/// Text shown wherever a statistic would go.
pub const PLACEHOLDER: &str = "--";

/// Label of the margin row and column.
pub const TOTAL_LABEL: &str = "Total";

/// A preview cell. Previews never carry values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewCell {
    /// No data yet.
    #[default]
    Placeholder,
}

impl fmt::Display for PreviewCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewCell::Placeholder => f.write_str(PLACEHOLDER),
        }
    }
}

/// Output preview for a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Preview {
    Crosstab(CrosstabPreview),
    TTest(TTestPreview),
}

/// One body or margin row of a crosstab preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrosstabRow {
    /// Category label, or [`TOTAL_LABEL`] for the margin row.
    pub label: String,
    /// One cell per column category plus the total column.
    pub cells: Vec<PreviewCell>,
    pub is_total: bool,
}

/// Contingency table skeleton built from the first row and column variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrosstabPreview {
    /// Label of the first row variable; heads the category column.
    pub row_title: String,
    /// Label of the first column variable.
    pub column_title: String,
    /// Column categories in codebook order, without the total column.
    pub column_categories: Vec<String>,
    /// Row categories in codebook order followed by the total row.
    pub rows: Vec<CrosstabRow>,
}

impl CrosstabPreview {
    fn build(row_variable: &Variable, column_variable: &Variable) -> Self {
        let column_categories = categories(column_variable);
        let width = column_categories.len() + 1;
        let mut rows: Vec<CrosstabRow> = categories(row_variable)
            .into_iter()
            .map(|label| CrosstabRow {
                label,
                cells: vec![PreviewCell::Placeholder; width],
                is_total: false,
            })
            .collect();
        rows.push(CrosstabRow {
            label: TOTAL_LABEL.to_string(),
            cells: vec![PreviewCell::Placeholder; width],
            is_total: true,
        });
        Self {
            row_title: row_variable.label.clone(),
            column_title: column_variable.label.clone(),
            column_categories,
            rows,
        }
    }

    /// Header row: row title, column categories, total.
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(self.row_title.as_str())
            .chain(self.column_categories.iter().map(String::as_str))
            .chain(std::iter::once(TOTAL_LABEL))
            .collect()
    }

    /// Materialise the grid as a string DataFrame in the layout a real run
    /// would fill.
    ///
    /// Fails when two header entries collide (e.g. a category labelled
    /// "Total").
    pub fn to_frame(&self) -> Result<DataFrame> {
        let header = self.header();
        let mut columns: Vec<Column> = Vec::with_capacity(header.len());
        let labels: Vec<String> = self.rows.iter().map(|row| row.label.clone()).collect();
        columns.push(Series::new(header[0].into(), labels).into_column());
        for (index, name) in header.iter().enumerate().skip(1) {
            let values: Vec<String> = self
                .rows
                .iter()
                .map(|row| row.cells[index - 1].to_string())
                .collect();
            columns.push(Series::new((*name).into(), values).into_column());
        }
        let frame = DataFrame::new(columns)?;
        Ok(frame)
    }
}

/// Placeholder statistics of one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupStatistics {
    pub name: String,
    pub mean: PreviewCell,
    pub std_dev: PreviewCell,
    pub count: PreviewCell,
}

/// Placeholder independent samples test.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TestStatistics {
    pub t: PreviewCell,
    pub df: PreviewCell,
    pub p_value: PreviewCell,
}

/// Fixed-shape t-test output skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TTestPreview {
    pub title: String,
    pub dependent: String,
    pub grouping: String,
    /// Always two positional groups.
    pub groups: Vec<GroupStatistics>,
    pub test: TestStatistics,
}

impl TTestPreview {
    fn build(dependent: &Variable, grouping: &Variable) -> Self {
        let groups = (1..=2)
            .map(|n| GroupStatistics {
                name: format!("Group {n}"),
                mean: PreviewCell::Placeholder,
                std_dev: PreviewCell::Placeholder,
                count: PreviewCell::Placeholder,
            })
            .collect();
        Self {
            title: format!("T-Test: {} by {}", dependent.label, grouping.label),
            dependent: dependent.label.clone(),
            grouping: grouping.label.clone(),
            groups,
            test: TestStatistics::default(),
        }
    }
}

/// Build the preview for `config`.
///
/// Crosstabs need at least one row and one column variable, t-tests a
/// dependent and a grouping variable. Anything else has no preview.
pub fn render_preview(config: &AnalysisConfiguration) -> Option<Preview> {
    match config.analysis_type() {
        AnalysisType::Crosstab => {
            let row_variable = config.rows().first()?;
            let column_variable = config.columns().first()?;
            Some(Preview::Crosstab(CrosstabPreview::build(
                row_variable,
                column_variable,
            )))
        }
        AnalysisType::TTest => {
            let dependent = config.dependent()?;
            let grouping = config.groups()?;
            Some(Preview::TTest(TTestPreview::build(dependent, grouping)))
        }
        AnalysisType::Anova => None,
    }
}

fn categories(variable: &Variable) -> Vec<String> {
    variable
        .value_labels()
        .map(|labels| labels.labels().map(str::to_string).collect())
        .unwrap_or_default()
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preview::Crosstab(table) => fmt::Display::fmt(table, f),
            Preview::TTest(test) => fmt::Display::fmt(test, f),
        }
    }
}

impl fmt::Display for CrosstabPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header().join(" | "))?;
        for row in &self.rows {
            let cells: Vec<String> = row.cells.iter().map(ToString::to_string).collect();
            writeln!(f, "{} | {}", row.label, cells.join(" | "))?;
        }
        Ok(())
    }
}

impl fmt::Display for TTestPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "Group Statistics")?;
        for group in &self.groups {
            writeln!(
                f,
                "{}: Mean = {}, SD = {}, N = {}",
                group.name, group.mean, group.std_dev, group.count
            )?;
        }
        writeln!(f, "Independent Samples Test")?;
        writeln!(
            f,
            "t = {}, df = {}, p = {}",
            self.test.t, self.test.df, self.test.p_value
        )
    }
}
