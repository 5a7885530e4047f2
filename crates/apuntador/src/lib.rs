//! Apuntador CLI Library
//!
//! Command-line interface for the Apuntar target validation engine.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;
pub mod snapshot;

pub use commands::{
    Cli, ColorArg, Commands, OutputFormatArg, ReportFormatArg, SuggestArgs, TreeTargetArgs,
    ValidateArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use handlers::{build_config, run, Outcome};
pub use output::{render_suggestions_table, OutputFormat, Printer};
pub use snapshot::load_tree;
