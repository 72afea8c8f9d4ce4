use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use survey_analysis::{AnalysisError, AnalysisSession, ROLE_RULES, Role, SessionCommand};
use survey_cli::script::{ScriptLine, parse_script};
use survey_cli::settings::{OutputFormat, Settings};
use survey_cli::summary::{
    SessionReport, StepRecord, catalog_table, print_session_report, rules_table,
};
use survey_model::{CatalogProvider, MockCatalog, VariableCatalog};
use tracing::{debug, info, info_span};

use crate::cli::{BuildArgs, CatalogArgs, OutputFormatArg, RulesArgs, SessionArgs};

fn resolve_format(arg: Option<OutputFormatArg>, settings: &Settings) -> OutputFormat {
    arg.map(OutputFormat::from).unwrap_or(settings.display.format)
}

fn load_catalog() -> Result<VariableCatalog> {
    let catalog = MockCatalog
        .load()
        .map_err(AnalysisError::Model)
        .context("load variable catalog")?;
    debug!(variables = catalog.len(), "catalog loaded");
    Ok(catalog)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}

pub fn run_catalog(args: &CatalogArgs, settings: &Settings) -> Result<()> {
    let catalog = load_catalog()?;
    let variables = catalog.search(args.search.as_deref().unwrap_or_default());
    match resolve_format(args.format, settings) {
        OutputFormat::Json => print_json(&variables)?,
        OutputFormat::Table => {
            println!("{}", catalog_table(&variables));
            println!("{} of {} variables", variables.len(), catalog.len());
        }
    }
    Ok(())
}

pub fn run_rules(args: &RulesArgs, settings: &Settings) -> Result<()> {
    match resolve_format(args.format, settings) {
        OutputFormat::Json => print_json(ROLE_RULES)?,
        OutputFormat::Table => println!("{}", rules_table()),
    }
    Ok(())
}

/// Returns whether the configured analysis can run.
pub fn run_build(args: &BuildArgs, settings: &Settings) -> Result<bool> {
    let catalog = load_catalog()?;
    let mut defaults = settings.analysis_defaults();
    if let Some(analysis_type) = args.analysis_type {
        defaults.analysis_type = analysis_type;
    }
    if let Some(level) = args.confidence {
        defaults.confidence_level = level;
    }
    let span = info_span!("build", analysis_type = %defaults.analysis_type);
    let _guard = span.enter();

    let mut session = AnalysisSession::new(&catalog, defaults);
    let mut steps = Vec::new();
    for (index, (input, command)) in build_commands(args).into_iter().enumerate() {
        let outcome = session
            .apply(command)
            .with_context(|| format!("apply '{input}'"))?;
        steps.push(StepRecord {
            line: index + 1,
            input,
            outcome,
        });
    }

    let report = SessionReport::new(session.builder(), steps);
    print_report(&report, resolve_format(args.format, settings))?;
    Ok(report.is_runnable())
}

/// Flags as session commands, in drop order: rows, columns, dependent,
/// groups, weight, then the filter.
fn build_commands(args: &BuildArgs) -> Vec<(String, SessionCommand)> {
    let assignments = args
        .rows
        .iter()
        .map(|name| (Role::Rows, name))
        .chain(args.columns.iter().map(|name| (Role::Columns, name)))
        .chain(args.dependent.iter().map(|name| (Role::Dependent, name)))
        .chain(args.groups.iter().map(|name| (Role::Groups, name)));

    let mut commands: Vec<(String, SessionCommand)> = assignments
        .map(|(role, name)| {
            (
                format!("assign {role} {name}"),
                SessionCommand::Assign {
                    role,
                    variable: name.trim().to_string(),
                },
            )
        })
        .collect();
    if let Some(name) = &args.weight {
        commands.push((
            format!("weight {name}"),
            SessionCommand::Weight {
                variable: Some(name.trim().to_string()),
            },
        ));
    }
    if let Some(expression) = &args.filter {
        commands.push((
            format!("filter {expression}"),
            SessionCommand::SetFilter {
                expression: expression.clone(),
            },
        ));
    }
    commands
}

/// Returns whether the final configuration can run.
pub fn run_session(args: &SessionArgs, settings: &Settings) -> Result<bool> {
    let source = read_script(&args.script)?;
    let lines = parse_script(&source)
        .with_context(|| format!("parse script {}", args.script.display()))?;
    info!(commands = lines.len(), "replaying session script");

    let catalog = load_catalog()?;
    let mut session = AnalysisSession::new(&catalog, settings.analysis_defaults());
    let mut steps = Vec::with_capacity(lines.len());
    for ScriptLine {
        line,
        text,
        command,
    } in lines
    {
        let outcome = session
            .apply(command)
            .with_context(|| format!("line {line}: {text}"))?;
        steps.push(StepRecord {
            line,
            input: text,
            outcome,
        });
    }

    let report = SessionReport::new(session.builder(), steps);
    print_report(&report, resolve_format(args.format, settings))?;
    Ok(report.is_runnable())
}

fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .context("read script from stdin")?;
        Ok(source)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("read script {}", path.display()))
    }
}

fn print_report(report: &SessionReport, format: OutputFormat) -> Result<()> {
    debug!(
        steps = report.steps.len(),
        rejected = report.rejected_count(),
        runnable = report.is_runnable(),
        "session finished"
    );
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            print_session_report(report);
            Ok(())
        }
    }
}
