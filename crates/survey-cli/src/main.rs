//! Survey Studio CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use survey_cli::logging::{LogConfig, LogFormat, init_logging};
use survey_cli::settings::Settings;
use survey_cli::summary::error_hint;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_build, run_catalog, run_rules, run_session};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };
    let exit_code = match &cli.command {
        Command::Catalog(args) => exit_status(run_catalog(args, &settings)),
        Command::Rules(args) => exit_status(run_rules(args, &settings)),
        Command::Build(args) => runnable_status(run_build(args, &settings), args.require_runnable),
        Command::Session(args) => {
            runnable_status(run_session(args, &settings), args.require_runnable)
        }
    };
    std::process::exit(exit_code);
}

fn exit_status(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            print_error(&error);
            1
        }
    }
}

fn runnable_status(result: anyhow::Result<bool>, require_runnable: bool) -> i32 {
    match result {
        Ok(runnable) => {
            if require_runnable && !runnable {
                1
            } else {
                0
            }
        }
        Err(error) => {
            print_error(&error);
            1
        }
    }
}

fn print_error(error: &anyhow::Error) {
    eprintln!("error: {error:#}");
    if let Some(hint) = error_hint(error) {
        eprintln!("hint: {hint}");
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
