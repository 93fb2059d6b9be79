//! CLI argument definitions for the contact table cleanser.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "data-cleanse",
    version,
    about = "Clean contact tables - relocate misfiled values and annotate errors",
    long_about = "Clean contact and customer tables stored as CSV.\n\n\
                  Resolves columns by alias, moves phone numbers, landlines and\n\
                  postcodes into their own columns, splits multi-address email\n\
                  cells and adds one error column per validated field."
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

    /// Include cell values in log output.
    ///
    /// Cells hold contact details, so values are redacted unless this is set.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Cleanse one or more CSV files.
    Clean(CleanArgs),

    /// List the known field kinds and the column names they resolve from.
    Fields,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// CSV files to cleanse.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output directory (default: `processed/` next to each input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// JSON file with cleanse options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the run reports as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Cleanse and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip the phone correction pass after the address merge.
    #[arg(long = "no-second-phone-pass")]
    pub no_second_phone_pass: bool,

    /// Also move misfiled email addresses into the email column.
    #[arg(long = "correct-emails")]
    pub correct_emails: bool,

    /// Leave postcodes in their original case.
    #[arg(long = "keep-postcode-case")]
    pub keep_postcode_case: bool,

    /// Check postcodes against the pattern of the row's country.
    #[arg(long = "country-postcodes")]
    pub country_postcodes: bool,
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
