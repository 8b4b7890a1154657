//! fieldcheck CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use fieldcheck_cli::commands::{load_documents, run_fields, run_format, run_validate};
use fieldcheck_cli::logging::{LogConfig, LogFormat, init_logging};
use serde::Serialize;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputArg, RunArgs};
use crate::summary::{print_fields, print_format, print_validation};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Validate(args) => validate(args),
        Command::Format(args) => format(args).map(|()| 0),
        Command::Fields(args) => fields(args).map(|()| 0),
    };
    let exit_code = match outcome {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn validate(args: &RunArgs) -> Result<i32> {
    let documents = load_documents(&args.rules, &args.state)?;
    let report = run_validate(&documents, args.field.as_deref());
    match args.output {
        OutputArg::Table => print_validation(&report),
        OutputArg::Json => print_json(&report)?,
    }
    Ok(i32::from(report.has_errors()))
}

fn format(args: &RunArgs) -> Result<()> {
    let documents = load_documents(&args.rules, &args.state)?;
    let rows = run_format(&documents, args.field.as_deref())?;
    match args.output {
        OutputArg::Table => print_format(&rows),
        OutputArg::Json => print_json(&rows)?,
    }
    Ok(())
}

fn fields(args: &RunArgs) -> Result<()> {
    let documents = load_documents(&args.rules, &args.state)?;
    let rows = run_fields(&documents, args.field.as_deref());
    match args.output {
        OutputArg::Table => print_fields(&rows),
        OutputArg::Json => print_json(&rows)?,
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig::default()
        .with_level_filter(cli.verbosity.tracing_level_filter())
        .with_format(match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        })
        .with_log_file(cli.log_file.clone());
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
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config.with_ansi(with_ansi)
}
