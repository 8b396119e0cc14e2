//! CLI argument definitions for the I-94 warehouse.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "i94-warehouse",
    version,
    about = "I-94 Immigration Warehouse - Build the star-schema dataset from raw extracts",
    long_about = "Build the I-94 immigration star schema from raw extracts.\n\n\
                  Reads immigration parquet data, the SAS label reference file, and the\n\
                  temperature, demographics, and airport CSV extracts; writes one fact\n\
                  table and four dimension tables as partitioned parquet."
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
    /// Run the full pipeline and write the five output relations.
    Run(RunArgs),

    /// List the output relations and their partitioning.
    Tables,
}

#[derive(Parser)]
pub struct RunArgs {
    /// JSON config file holding source and destination paths.
    ///
    /// Paths given as flags override the config file.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Immigration events: a parquet file or a directory of part files.
    #[arg(long = "immigration", value_name = "PATH")]
    pub immigration: Option<PathBuf>,

    /// SAS label descriptions file.
    #[arg(long = "labels", value_name = "PATH")]
    pub labels: Option<PathBuf>,

    /// City temperature history CSV.
    #[arg(long = "temperature", value_name = "PATH")]
    pub temperature: Option<PathBuf>,

    /// US city demographics CSV (semicolon-delimited).
    #[arg(long = "demographics", value_name = "PATH")]
    pub demographics: Option<PathBuf>,

    /// Airport codes CSV.
    #[arg(long = "airports", value_name = "PATH")]
    pub airports: Option<PathBuf>,

    /// Destination root for the five output relations.
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Build the model and report record counts without writing output.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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
