//! Terminal user interface module.
//!
//! This module provides the interactive session for reviewing and pruning
//! stale secrets using ratatui with the crossterm backend.
//!
//! # Architecture
//!
//! The TUI follows a unidirectional data flow:
//! 1. Key events are captured from the terminal (crossterm)
//! 2. Events are translated to [`Action`]s ([`keys`])
//! 3. Actions mutate the [`App`] session state, possibly requesting
//!    asynchronous work as [`Effect`]s
//! 4. Worker completions come back as [`Msg`]s, applied on the UI thread
//! 5. The UI renders from the current state ([`ui`]) with a [`Theme`] value

pub mod app;
pub mod keys;
pub mod run;
pub mod theme;
pub mod ui;

// Re-export commonly used types
pub use app::{Action, App, DeleteOutcome, Effect, Mode, Msg, ResultSet, VersionRow};
pub use run::{run_tui, TuiError, TuiResult};
pub use theme::Theme;
