//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Apuntador: check UI automation targets against accessibility-tree snapshots
#[derive(Parser, Debug)]
#[command(name = "apuntador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Engine configuration file (YAML or JSON)
    #[arg(long, global = true, env = "APUNTAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reference viewport as WIDTHxHEIGHT, e.g. 390x844
    #[arg(long, global = true)]
    pub viewport: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a target for an action
    Validate(ValidateArgs),

    /// Resolve a target and print the element
    Resolve(TreeTargetArgs),

    /// Run the hittability checks on a resolved target
    Check(TreeTargetArgs),

    /// Rank elements similar to a target
    Suggest(SuggestArgs),
}

/// Tree snapshot and target shared by every command
#[derive(Args, Debug, Clone)]
pub struct TreeTargetArgs {
    /// Accessibility tree snapshot (JSON or YAML)
    #[arg(short, long)]
    pub tree: PathBuf,

    /// Target: #id, "label", text:"value", predicate(...), (x,y), type or type[i]
    #[arg(short = 'g', long)]
    pub target: String,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Tree and target
    #[command(flatten)]
    pub input: TreeTargetArgs,

    /// Action about to be performed (tap, inputText, assertNotExists, ...)
    #[arg(short, long, default_value = "tap")]
    pub action: String,

    /// Failure report format
    #[arg(short, long, default_value = "markdown")]
    pub format: ReportFormatArg,

    /// Screenshot path to attach to a failure report
    #[arg(long)]
    pub screenshot: Option<PathBuf>,
}

/// Arguments for the suggest command
#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Tree and target
    #[command(flatten)]
    pub input: TreeTargetArgs,

    /// Maximum suggestions
    #[arg(long, visible_alias = "max-suggestions")]
    pub max: Option<usize>,

    /// Minimum similarity (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_similarity: Option<u8>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormatArg,
}

/// Failure report format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormatArg {
    /// Sectioned markdown
    #[default]
    Markdown,
    /// JSON
    Json,
    /// One line
    Compact,
}

impl From<ReportFormatArg> for apuntar::ReportFormat {
    fn from(arg: ReportFormatArg) -> Self {
        match arg {
            ReportFormatArg::Markdown => Self::Markdown,
            ReportFormatArg::Json => Self::Json,
            ReportFormatArg::Compact => Self::Compact,
        }
    }
}

/// Listing format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormatArg {
    /// Human-readable table
    #[default]
    Text,
    /// JSON
    Json,
}

impl From<OutputFormatArg> for crate::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => Self::Text,
            OutputFormatArg::Json => Self::Json,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
