//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "candidate-intake",
    version,
    about = "Candidate intake engine - normalize external ATS/HRMS records",
    long_about = "Ingest applicant records from external ATS/HRMS systems, map them to the\n\
                  canonical candidate schema, validate, screen for duplicates and attach\n\
                  data-compliance metadata before they enter the hiring pipeline."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Print the canonical candidate field catalog.
    Schema(SchemaArgs),

    /// Validate a canonical record JSON file against the catalog.
    Validate(ValidateArgs),

    /// Run one sync cycle for every system in a config file.
    Run(RunArgs),
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Catalog override (TOML); defaults to the built-in catalog.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to a canonical record JSON file.
    #[arg(value_name = "RECORD")]
    pub record: PathBuf,

    /// Catalog override (TOML); defaults to the built-in catalog.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the intake configuration file (TOML).
    #[arg(long, value_name = "PATH")]
    pub config: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
