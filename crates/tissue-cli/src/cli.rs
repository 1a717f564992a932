//! CLI argument definitions for the `tissue` tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use tissue_cli::formats::CatalogFormat;

#[derive(Parser)]
#[command(
    name = "tissue",
    version,
    about = "Inspect, convert and import segmentation tissue lists",
    long_about = "Inspect, convert and import segmentation tissue lists.\n\n\
                  Reads and writes the legacy binary stream, readable text lists,\n\
                  default lists and hierarchical containers (JSON). Foreign color\n\
                  lookup tables are accepted wherever a readable list is."
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
    /// Write the clinical default tissue list.
    Defaults(DefaultsArgs),

    /// Print a tissue list as a table.
    Show(ShowArgs),

    /// Convert a tissue list between formats.
    Convert(ConvertArgs),

    /// Merge an edited list or foreign lookup table into a base tissue list.
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct DefaultsArgs {
    /// Destination file.
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Output format (default: inferred from the extension, else default-list).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Tissue list to display.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Input format (default: inferred from the extension).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Version the binary stream was written with.
    #[arg(long = "stream-version", default_value_t = 5)]
    pub stream_version: u16,
}

#[derive(Parser)]
pub struct ConvertArgs {
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Input format (default: inferred from the extension).
    #[arg(long = "from", value_enum)]
    pub from: Option<FormatArg>,

    /// Output format (default: inferred from the extension).
    #[arg(long = "to", value_enum)]
    pub to: Option<FormatArg>,

    /// Version the binary input was written with.
    #[arg(long = "stream-version", default_value_t = 5)]
    pub stream_version: u16,

    /// Format version to write (binary and readable outputs).
    #[arg(long = "write-version", default_value_t = 5)]
    pub write_version: u16,

    /// JSON hierarchy tree used for the `path` attributes of a
    /// hierarchical output.
    #[arg(long = "hierarchy", value_name = "PATH")]
    pub hierarchy: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Current tissue list.
    #[arg(value_name = "BASE")]
    pub base: PathBuf,

    /// Edited readable list or foreign lookup table.
    #[arg(value_name = "LIST")]
    pub list: PathBuf,

    /// Where to write the merged list (default: overwrite BASE).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Format of BASE and the output (default: inferred from BASE).
    #[arg(long = "format", value_enum)]
    pub format: Option<FormatArg>,

    /// Version the binary base was written with.
    #[arg(long = "stream-version", default_value_t = 5)]
    pub stream_version: u16,

    /// Remove tissues that are in BASE but not in LIST.
    #[arg(long = "purge")]
    pub purge: bool,
}

/// CLI tissue list format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Binary,
    Readable,
    DefaultList,
    Hierarchical,
}

impl From<FormatArg> for CatalogFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Binary => Self::Binary,
            FormatArg::Readable => Self::Readable,
            FormatArg::DefaultList => Self::DefaultList,
            FormatArg::Hierarchical => Self::Hierarchical,
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
