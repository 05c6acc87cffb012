//! secretsweep - stale secret pruner for AWS Secrets Manager
//!
//! An interactive TUI that scans AWS Secrets Manager for secrets that have
//! not been accessed recently, lets the operator review, filter and
//! multi-select them, inspect versions and values, and delete the selected
//! secrets after confirmation.

pub mod analyzer;
pub mod cli;
pub mod error;
pub mod filter;
pub mod logging;
pub mod signal;
pub mod store;
pub mod tui;

use std::time::Instant;

use crate::cli::Cli;
use crate::error::ExitCode;
use crate::tui::{run_tui, App, TuiError};

/// Run the application and return the exit code to use.
///
/// # Errors
///
/// Returns an error for unexpected failures (terminal I/O, signal handler
/// installation). Expected outcomes, including startup failure and user
/// interruption, are reported through the returned [`ExitCode`].
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    log::debug!("Starting secretsweep with {:?}", cli);

    let handler = signal::install_handler()?;
    let theme = cli.theme.resolve(cli.no_color);

    let mut app = App::new(Instant::now());
    let result = run_tui(&mut app, theme, Some(handler.get_flag()));

    match result {
        Ok(()) => {
            if handler.is_shutdown_requested() {
                Ok(ExitCode::Interrupted)
            } else if app.init_failed() {
                // The session ended from the startup-failure dead end.
                Ok(ExitCode::InitFailure)
            } else {
                Ok(ExitCode::Success)
            }
        }
        Err(TuiError::Interrupted) => Ok(ExitCode::Interrupted),
        Err(e) => Err(e.into()),
    }
}
