//! Apuntador: check UI automation targets against accessibility-tree snapshots
//!
//! ## Usage
//!
//! ```bash
//! apuntador validate --tree screen.json --target '#login-button'
//! apuntador validate --tree screen.yaml --target '"Log In"' --action tap --format compact
//! apuntador suggest --tree screen.json --target '#login' --max 3
//! apuntador check --tree screen.json --target 'button[2]' -vv
//! ```
//!
//! Exit codes: 0 when the target passes, 1 when it fails its check,
//! 2 on usage or input errors.

use apuntador::{build_config, run, Cli, CliResult, Outcome, Verbosity};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match try_main() {
        Ok(Outcome::Passed) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn try_main() -> CliResult<Outcome> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_tracing(config.verbosity);
    run(&cli, &config)
}

/// Log to stderr; `RUST_LOG` directives refine the level set by `-v`/`-q`
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::from_default_env().add_directive(verbosity.log_level().into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
