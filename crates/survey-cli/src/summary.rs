//! Reports and terminal tables for CLI output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{Column, PolarsResult};
use serde::Serialize;
use survey_analysis::{
    AnalysisBuilder, AnalysisConfiguration, AnalysisError, AnalysisRequest, AnalysisType,
    AssignOutcome, CommandOutcome, CrosstabPreview, Preview, Readiness, Role, TTestPreview, rules,
};
use survey_model::{MeasurementType, Variable};
use tracing::warn;

/// One applied command and what it did.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    /// Script line number, or the position of a `build` flag.
    pub line: usize,
    pub input: String,
    pub outcome: CommandOutcome,
}

/// Final state of a `build` or `session` run.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub steps: Vec<StepRecord>,
    pub configuration: AnalysisConfiguration,
    pub readiness: Readiness,
    pub preview: Option<Preview>,
    /// Present only when the configuration can run.
    pub request: Option<AnalysisRequest>,
}

impl SessionReport {
    pub fn new(builder: &AnalysisBuilder, steps: Vec<StepRecord>) -> Self {
        Self {
            steps,
            configuration: builder.configuration().clone(),
            readiness: builder.readiness(),
            preview: builder.preview(),
            request: builder.prepare_run().ok(),
        }
    }

    pub fn is_runnable(&self) -> bool {
        self.request.is_some()
    }

    /// Number of drops that were refused.
    pub fn rejected_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| {
                matches!(
                    step.outcome,
                    CommandOutcome::Assignment(AssignOutcome::Rejected(_))
                )
            })
            .count()
    }
}

pub fn print_session_report(report: &SessionReport) {
    let config = &report.configuration;
    println!("Analysis: {}", config.analysis_type().label());
    if !report.steps.is_empty() {
        println!("{}", steps_table(&report.steps));
    }
    println!("{}", configuration_table(config));
    let filter = config.filter_expression().trim();
    println!(
        "Filter: {}",
        if filter.is_empty() { "(none)" } else { filter }
    );
    println!("Confidence: {}", config.confidence_level());
    let options = config.report_options();
    println!(
        "Report: add={}, significance tests={}, interpretation={}",
        yes_no(options.add_to_report),
        yes_no(options.show_significance_tests),
        yes_no(options.show_ai_interpretation)
    );

    match &report.preview {
        Some(Preview::Crosstab(table)) => {
            println!();
            println!("Preview ({} by {}):", table.row_title, table.column_title);
            match crosstab_table(table) {
                Ok(rendered) => println!("{rendered}"),
                Err(error) => {
                    warn!(%error, "crosstab frame unavailable, printing plain grid");
                    println!("{table}");
                }
            }
        }
        Some(Preview::TTest(test)) => {
            println!();
            print_t_test(test);
        }
        None => {}
    }

    println!();
    println!("{}", readiness_line(&report.readiness, config.analysis_type()));
}

fn print_t_test(test: &TTestPreview) {
    println!("{}", test.title);
    let mut groups = Table::new();
    groups.set_header(vec![
        header_cell("Group"),
        header_cell("Mean"),
        header_cell("SD"),
        header_cell("N"),
    ]);
    apply_table_style(&mut groups);
    for group in &test.groups {
        groups.add_row(vec![
            Cell::new(&group.name),
            dim_cell(group.mean),
            dim_cell(group.std_dev),
            dim_cell(group.count),
        ]);
    }
    println!("{groups}");

    let mut samples = Table::new();
    samples.set_header(vec![header_cell("t"), header_cell("df"), header_cell("p")]);
    apply_table_style(&mut samples);
    samples.add_row(vec![
        dim_cell(test.test.t),
        dim_cell(test.test.df),
        dim_cell(test.test.p_value),
    ]);
    println!("Independent Samples Test");
    println!("{samples}");
}

/// Human summary of the run readiness.
pub fn readiness_line(readiness: &Readiness, analysis_type: AnalysisType) -> String {
    match readiness {
        Readiness::Ready => format!("Ready to run {} analysis.", analysis_type.label()),
        Readiness::Incomplete { missing } => {
            let missing: Vec<&str> = missing.iter().map(Role::label).collect();
            format!("Cannot run yet. Missing: {}.", missing.join(", "))
        }
        Readiness::Unsupported => format!("{} analyses cannot be run.", analysis_type.label()),
    }
}

/// Variables panel.
pub fn catalog_table(variables: &[&Variable]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Valid N"),
        header_cell("Value Labels"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for variable in variables {
        let labels = match variable.value_labels() {
            Some(labels) => Cell::new(labels.labels().collect::<Vec<_>>().join(", ")),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&variable.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&variable.label),
            type_cell(variable.measurement_type),
            Cell::new(variable.valid_count),
            labels,
        ]);
    }
    table
}

/// Acceptance table: one row per analysis type, one column per role.
pub fn rules_table() -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Analysis")];
    header.extend(Role::ALL.iter().map(|role| header_cell(role.label())));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for analysis_type in AnalysisType::ALL {
        let mut row = vec![
            Cell::new(analysis_type.label())
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
        ];
        row.extend(Role::ALL.iter().map(|role| {
            let accepted = rules::accepted_types(analysis_type, *role);
            if accepted.is_empty() {
                dim_cell("-")
            } else {
                let names: Vec<&str> = accepted.iter().map(MeasurementType::as_str).collect();
                let capacity = if role.is_multi_slot() {
                    format!(" (max {})", role.capacity())
                } else {
                    String::new()
                };
                Cell::new(format!("{}{capacity}", names.join(", ")))
            }
        }));
        table.add_row(row);
    }
    table
}

/// Applied commands and their outcomes.
pub fn steps_table(steps: &[StepRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Command"),
        header_cell("Result"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for step in steps {
        table.add_row(vec![
            dim_cell(step.line),
            Cell::new(&step.input),
            outcome_cell(&step.outcome),
        ]);
    }
    table
}

/// Drop zones of the current analysis type and what they hold.
pub fn configuration_table(config: &AnalysisConfiguration) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("Accepts"),
        header_cell("Variables"),
        header_cell("Slots"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for role in rules::active_roles(config.analysis_type()) {
        let accepted: Vec<&str> = rules::accepted_types(config.analysis_type(), role)
            .iter()
            .map(MeasurementType::as_str)
            .collect();
        let occupants = config.occupants(role);
        let variables = if occupants.is_empty() {
            dim_cell("(empty)")
        } else {
            Cell::new(
                occupants
                    .iter()
                    .map(|v| v.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        };
        table.add_row(vec![
            Cell::new(role.label()).add_attribute(Attribute::Bold),
            Cell::new(accepted.join(", ")),
            variables,
            Cell::new(format!("{}/{}", occupants.len(), role.capacity())),
        ]);
    }
    table
}

/// Crosstab skeleton with its header and total row, rendered from the
/// preview's DataFrame.
pub fn crosstab_table(preview: &CrosstabPreview) -> survey_analysis::Result<Table> {
    let frame = preview.to_frame()?;
    let mut table = Table::new();
    table.set_header(
        frame
            .get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_summary_table_style(&mut table);
    for index in 1..frame.width() {
        align_column(&mut table, index, CellAlignment::Center);
    }

    let columns = frame
        .get_columns()
        .iter()
        .map(Column::str)
        .collect::<PolarsResult<Vec<_>>>()?;
    let total_row = frame.height().saturating_sub(1);
    for row in 0..frame.height() {
        let cells: Vec<Cell> = columns
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let value = column.get(row).unwrap_or_default();
                match index {
                    0 if row == total_row => Cell::new(value).add_attribute(Attribute::Bold),
                    0 => Cell::new(value),
                    _ => dim_cell(value),
                }
            })
            .collect();
        table.add_row(cells);
    }
    Ok(table)
}

/// Fix-it hint for the first analysis error in the chain.
pub fn error_hint(error: &anyhow::Error) -> Option<&'static str> {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<AnalysisError>())
        .and_then(AnalysisError::suggestion)
}

fn outcome_cell(outcome: &CommandOutcome) -> Cell {
    match outcome {
        CommandOutcome::Assignment(AssignOutcome::Accepted { role, position }) => {
            Cell::new(format!("✓ {} #{}", role.label(), position + 1)).fg(Color::Green)
        }
        CommandOutcome::Assignment(AssignOutcome::Rejected(rejection)) => {
            Cell::new(format!("✗ {rejection}")).fg(Color::Red)
        }
        CommandOutcome::Removed { variables, .. } if variables.is_empty() => {
            dim_cell("nothing removed")
        }
        CommandOutcome::Removed { role, variables } => Cell::new(format!(
            "removed {} from {}",
            variables.join(", "),
            role.label()
        ))
        .fg(Color::Yellow),
        CommandOutcome::Updated => dim_cell("ok"),
    }
}

fn type_cell(measurement_type: MeasurementType) -> Cell {
    let color = match measurement_type {
        MeasurementType::Nominal => Color::Magenta,
        MeasurementType::Ordinal => Color::Yellow,
        MeasurementType::Scale => Color::Green,
        MeasurementType::String => Color::DarkGrey,
    };
    Cell::new(measurement_type.as_str()).fg(color)
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
