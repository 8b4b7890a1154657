//! CLI argument definitions for fieldcheck.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "fieldcheck",
    version,
    about = "Validate and format field state against declarative rules",
    long_about = "Validate and format field state against declarative rules.\n\n\
                  Rules and state are read from JSON documents. Only the fields\n\
                  whose conditions hold for the given state are checked."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate the state and report failing fields.
    Validate(RunArgs),

    /// Render display text for every applicable field.
    Format(RunArgs),

    /// List the fields that apply to the state.
    Fields(RunArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Rule document (JSON array of rule nodes).
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: PathBuf,

    /// State document (JSON object of field values).
    #[arg(long = "state", value_name = "FILE")]
    pub state: PathBuf,

    /// Restrict the run to one field.
    #[arg(long = "field", value_name = "NAME")]
    pub field: Option<String>,

    /// How to print results.
    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
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
