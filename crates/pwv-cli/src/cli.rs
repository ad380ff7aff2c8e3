//! CLI argument definitions for `pwv`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use pwv_cli::workflow::DEFAULT_RUN_LIMIT;
use pwv_model::DEFAULT_MIN_LENGTH;

#[derive(Parser)]
#[command(
    name = "pwv",
    version,
    about = "PassWeaver - personalized password candidate generator",
    long_about = "Generate password candidates from personal details and a rule library.\n\n\
                  Sessions remember where generation stopped, so large rule libraries\n\
                  can be worked through across several bounded runs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding sessions.json and the output/ folder.
    #[arg(long = "data-dir", value_name = "DIR", default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Rule library, one rule per line.
    #[arg(long = "rules", value_name = "PATH", default_value = "rules.txt", global = true)]
    pub rules: PathBuf,

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

    /// Allow candidate values in trace logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start a new session from personal details and run it once.
    New(NewArgs),

    /// Continue a saved session where its last run stopped.
    Resume(ResumeArgs),

    /// List saved sessions, most recently updated first.
    Sessions,

    /// Print every stored field of one session.
    Show(ShowArgs),
}

#[derive(Parser)]
pub struct NewArgs {
    /// Personal strings (first name, surname, nickname, pet name...).
    #[arg(
        long = "string",
        short = 's',
        value_name = "TEXT",
        required = true,
        num_args = 1..
    )]
    pub strings: Vec<String>,

    /// Dates in D/M/YYYY form.
    #[arg(long = "date", short = 'd', value_name = "D/M/YYYY", num_args = 1..)]
    pub dates: Vec<String>,

    /// Meaningful numbers (house number, favourite number...).
    #[arg(long = "number", short = 'n', value_name = "DIGITS", num_args = 1..)]
    pub numbers: Vec<String>,

    #[command(flatten)]
    pub constraints: ConstraintArgs,

    #[command(flatten)]
    pub run: RunArgs,

    /// Do not save the session; it cannot be resumed.
    #[arg(long = "ephemeral")]
    pub ephemeral: bool,
}

#[derive(Args)]
pub struct ConstraintArgs {
    /// Minimum candidate length in characters.
    #[arg(long = "min-length", value_name = "N", default_value_t = DEFAULT_MIN_LENGTH)]
    pub min_length: usize,

    /// Maximum candidate length in characters.
    #[arg(long = "max-length", value_name = "N")]
    pub max_length: Option<usize>,

    /// Keep only candidates with at least one uppercase letter.
    #[arg(long = "require-uppercase")]
    pub require_uppercase: bool,

    /// Keep only candidates with at least one non-alphanumeric character.
    #[arg(long = "require-symbol")]
    pub require_symbol: bool,
}

#[derive(Args)]
pub struct RunArgs {
    /// Maximum number of candidates written by this run.
    #[arg(long = "limit", value_name = "N", default_value_t = DEFAULT_RUN_LIMIT)]
    pub limit: usize,

    /// Output file name inside <DATA_DIR>/output (".txt" added if no extension).
    #[arg(long = "output", short = 'o', value_name = "NAME")]
    pub output: Option<String>,

    /// Cap the candidates expanded per rule.
    #[arg(long = "max-per-rule", value_name = "N")]
    pub max_per_rule: Option<usize>,

    /// Skip printing the first candidates after the run.
    #[arg(long = "no-preview")]
    pub no_preview: bool,
}

#[derive(Parser)]
pub struct ResumeArgs {
    /// Session position from `pwv sessions` (1 = most recent) or session id.
    #[arg(value_name = "SESSION")]
    pub selector: String,

    /// Start a completed session again from the first rule.
    #[arg(long = "restart")]
    pub restart: bool,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Session position from `pwv sessions` (1 = most recent) or session id.
    #[arg(value_name = "SESSION")]
    pub selector: String,
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
