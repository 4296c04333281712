//! CLI argument definitions for the feedback replay tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "agw-feedback",
    version,
    about = "Replay htmx request lifecycles through the page feedback coordinator",
    long_about = "Replay recorded htmx request lifecycles through the page feedback coordinator.\n\n\
                  Shows which responses are swapped into the page, which toasts appear,\n\
                  and what the progress indicator does after every event."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (default: the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

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

    /// Include timestamps in log lines.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replay a JSON-lines transcript of lifecycle events.
    Replay(ReplayArgs),

    /// Print the effective settings as TOML.
    Settings {
        /// Print the built-in defaults instead of the loaded file.
        #[arg(long = "defaults")]
        defaults: bool,
    },
}

#[derive(Parser)]
pub struct ReplayArgs {
    /// Transcript file, one `{"event": ..., "xhr": {...}}` object per line.
    #[arg(value_name = "TRANSCRIPT")]
    pub transcript: PathBuf,

    /// Report format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Draw the progress indicator in the terminal while replaying.
    #[arg(long = "live")]
    pub live: bool,

    /// Pause between events in live mode.
    #[arg(long = "step-ms", value_name = "MS", default_value_t = 150)]
    pub step_ms: u64,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
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
