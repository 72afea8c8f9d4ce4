//! CLI argument definitions for Survey Studio.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use survey_analysis::{AnalysisType, ConfidenceLevel};
use survey_cli::settings::OutputFormat;

#[derive(Parser)]
#[command(
    name = "survey-studio",
    version,
    about = "Survey Studio - configure survey analyses from the command line",
    long_about = "Configure crosstab and t-test analyses over a survey variable catalog.\n\n\
                  Variables are assigned to roles (rows, columns, dependent, groups, weight)\n\
                  under the same measurement-level rules as the analysis canvas, and the\n\
                  resulting output layout is previewed without computing any statistic."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: settings.toml in the user config directory).
    #[arg(
        long = "config",
        value_name = "PATH",
        env = "SURVEY_STUDIO_CONFIG",
        global = true
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the variables of the survey catalog.
    Catalog(CatalogArgs),

    /// Show which measurement levels each role accepts.
    Rules(RulesArgs),

    /// Configure one analysis from flags and preview it.
    Build(BuildArgs),

    /// Replay a script of session commands and preview the result.
    Session(SessionArgs),
}

#[derive(Parser)]
pub struct CatalogArgs {
    /// Only list variables whose name or label contains TEXT.
    #[arg(long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Output format (default: from settings).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Output format (default: from settings).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,
}

#[derive(Parser)]
pub struct BuildArgs {
    /// Analysis type: crosstab, t-test or anova (default: from settings).
    #[arg(long = "type", value_name = "TYPE")]
    pub analysis_type: Option<AnalysisType>,

    /// Row variables, comma separated.
    #[arg(long = "rows", value_name = "VARS", value_delimiter = ',')]
    pub rows: Vec<String>,

    /// Column variables, comma separated.
    #[arg(long = "columns", value_name = "VARS", value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Dependent variable.
    #[arg(long = "dependent", value_name = "VAR")]
    pub dependent: Option<String>,

    /// Grouping variable.
    #[arg(long = "groups", value_name = "VAR")]
    pub groups: Option<String>,

    /// Weight variable.
    #[arg(long = "weight", value_name = "VAR")]
    pub weight: Option<String>,

    /// Case filter expression, passed through unparsed.
    #[arg(long = "filter", value_name = "EXPR")]
    pub filter: Option<String>,

    /// Confidence level: 90, 95 or 99 (default: from settings).
    #[arg(long = "confidence", value_name = "LEVEL")]
    pub confidence: Option<ConfidenceLevel>,

    /// Output format (default: from settings).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Exit with status 1 when the configuration cannot run.
    #[arg(long = "require-runnable")]
    pub require_runnable: bool,
}

#[derive(Parser)]
pub struct SessionArgs {
    /// Script file with one command per line, or `-` for stdin.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Output format (default: from settings).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Exit with status 1 when the final configuration cannot run.
    #[arg(long = "require-runnable")]
    pub require_runnable: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Table => OutputFormat::Table,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
