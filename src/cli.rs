//! Command-line interface definitions.
//!
//! The tool starts directly into the interactive UI, so the CLI surface is
//! limited to ambient options: verbosity, color handling, and structured
//! error output.
//!
//! # Example
//!
//! ```bash
//! # Start the interactive session
//! secretsweep
//!
//! # Verbose logging for debugging
//! secretsweep -v
//!
//! # Force the light palette
//! secretsweep --theme light
//! ```

use clap::{Parser, ValueEnum};

use crate::tui::Theme;

/// Interactive TUI for finding and pruning stale AWS Secrets Manager
/// secrets.
///
/// Secrets not accessed within 14 days are listed for review; selected
/// secrets can be deleted after confirmation. Credentials and region come
/// from the ambient AWS environment.
#[derive(Debug, Parser)]
#[command(name = "secretsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Color palette for the interface
    #[arg(long, value_enum, default_value = "auto")]
    pub theme: ThemeChoice,

    /// Report fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Palette selection for the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ThemeChoice {
    /// Detect from the terminal environment.
    #[default]
    Auto,
    /// High-contrast dark palette.
    Dark,
    /// High-contrast light palette.
    Light,
}

impl ThemeChoice {
    /// Resolve the palette, honoring `--no-color`.
    #[must_use]
    pub fn resolve(self, no_color: bool) -> Theme {
        if no_color {
            return Theme::plain();
        }
        match self {
            Self::Auto => Theme::auto(),
            Self::Dark => Theme::dark(),
            Self::Light => Theme::light(),
        }
    }
}
