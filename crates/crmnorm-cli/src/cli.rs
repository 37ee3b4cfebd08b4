//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "crmnorm",
    version,
    about = "Normalize contact names, phones, and addresses in bulk",
    long_about = "Apply locale-aware normalization rules to contact data.\n\n\
                  Reads contacts.csv, phones.csv, and addresses.csv from a data\n\
                  directory, rewrites the fields the configured rules change,\n\
                  and reports exactly what changed per category."
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
    /// Run a normalization batch over a contact-id range.
    Run(RunArgs),

    /// Inspect or update the normalization settings file.
    Settings(SettingsArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Data directory containing contacts.csv, phones.csv, addresses.csv.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// First contact id of the range (inclusive).
    #[arg(long = "from", value_name = "ID")]
    pub from: u32,

    /// Last contact id of the range (inclusive, must be >= --from).
    #[arg(long = "to", value_name = "ID")]
    pub to: u32,

    /// Records per chunk, for progress reporting (coerced to >= 1).
    #[arg(long = "batch-size", value_name = "N", default_value_t = 100)]
    pub batch_size: u32,

    /// Report what would change without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Append one CSV line per change to this file.
    #[arg(long = "change-log", value_name = "PATH")]
    pub change_log: Option<PathBuf>,

    /// Settings JSON file holding the normalization options.
    #[arg(long = "settings", value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Enable name title-casing, overriding the settings file.
    #[arg(long = "full-first")]
    pub full_first: bool,

    /// Force organization names to uppercase, overriding the settings file.
    #[arg(long = "org-caps")]
    pub org_caps: bool,

    /// City casing: 0 off, 1 uppercase, 2 titlecase.
    #[arg(long = "city-caps", value_name = "MODE")]
    pub city_caps: Option<u8>,

    /// Street casing: 0 off, 1 uppercase, 2 titlecase.
    #[arg(long = "street-caps", value_name = "MODE")]
    pub street_caps: Option<u8>,

    /// Validate postal codes against the per-country patterns.
    #[arg(long = "validate-postal")]
    pub validate_postal: bool,

    /// Always format phone numbers in international style.
    #[arg(long = "intl-prefix")]
    pub intl_prefix: bool,

    /// Format phones nationally at home, internationally abroad.
    #[arg(long = "phone-normalize")]
    pub phone_normalize: bool,

    /// Default region for phone parsing (two-letter code).
    #[arg(long = "region", value_name = "CODE")]
    pub region: Option<String>,
}

#[derive(Parser)]
pub struct SettingsArgs {
    /// Settings JSON file (created on first --set).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Set an option, e.g. --set contact_FullFirst=true. Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Delete the named change-log file instead of touching settings.
    #[arg(long = "delete-log", value_name = "PATH")]
    pub delete_log: Option<PathBuf>,
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
