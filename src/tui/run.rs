//! TUI main loop.
//!
//! # Overview
//!
//! This module owns the terminal lifecycle and the single-writer message
//! loop. It sets up raw mode and the alternate screen (restored on exit,
//! including on panic), then cycles:
//!
//! 1. Drain completion messages from worker threads
//! 2. Advance timer-driven state (`App::tick`)
//! 3. Render the current state
//! 4. Poll for input with a timeout, translate keys to actions
//!
//! Every [`Effect`] the session requests is executed on a detached worker
//! thread holding the shared store handle; each worker sends exactly one
//! [`Msg`] back over the channel. All state mutation stays on this thread.

use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use thiserror::Error;

use super::app::{App, DeleteOutcome, Effect, Msg, VersionRow};
use super::keys::action_for_key;
use super::theme::Theme;
use super::ui::render;
use crate::analyzer;
use crate::store::{AwsSecretStore, SecretStore};

/// Frame cadence: poll and render at ~60 FPS.
const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Rows of chrome around the result table (header, borders, status, footer).
const TABLE_OVERHEAD: u16 = 11;

/// Error type for TUI operations.
#[derive(Debug, Error)]
pub enum TuiError {
    /// I/O error from terminal operations.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// The TUI was interrupted by a shutdown signal.
    #[error("interrupted by shutdown signal")]
    Interrupted,
}

/// Result type for TUI operations.
pub type TuiResult<T> = Result<T, TuiError>;

/// Type alias for the terminal backend.
type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive session.
///
/// Takes over the terminal until the user quits or an error occurs. The
/// backing client is initialized by a worker thread while the banner is
/// showing; its failure routes the session into the error dead end rather
/// than aborting.
///
/// # Errors
///
/// Returns `TuiError::Io` for terminal I/O errors and
/// `TuiError::Interrupted` when the shutdown flag was raised.
pub fn run_tui(
    app: &mut App,
    theme: Theme,
    shutdown_flag: Option<Arc<AtomicBool>>,
) -> TuiResult<()> {
    // Restore the terminal before any panic message is printed.
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let result = run_tui_inner(app, theme, shutdown_flag);

    let _ = panic::take_hook();
    result
}

fn run_tui_inner(
    app: &mut App,
    theme: Theme,
    shutdown_flag: Option<Arc<AtomicBool>>,
) -> TuiResult<()> {
    let mut terminal = setup_terminal()?;

    let (tx, rx): (Sender<Msg>, Receiver<Msg>) = mpsc::channel();
    let mut store: Option<Arc<dyn SecretStore>> = None;

    spawn_connect(tx.clone());

    loop {
        if let Some(flag) = &shutdown_flag {
            if flag.load(Ordering::SeqCst) {
                log::info!("Shutdown signal received, exiting TUI");
                restore_terminal()?;
                return Err(TuiError::Interrupted);
            }
        }

        if app.should_quit() {
            log::debug!("Session requested quit");
            break;
        }

        // Apply completions in delivery order; remember the store handle
        // so later effects can be dispatched.
        while let Ok(msg) = rx.try_recv() {
            if let Msg::Ready(handle) = &msg {
                store = Some(Arc::clone(handle));
            }
            app.apply_msg(msg, Instant::now());
        }

        for effect in app.tick(Instant::now()) {
            dispatch(effect, store.as_ref(), &tx);
        }

        let size = terminal.size()?;
        app.set_visible_rows(size.height.saturating_sub(TABLE_OVERHEAD).max(1) as usize);

        terminal.draw(|frame| render(frame, app, &theme))?;

        if event::poll(POLL_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = action_for_key(app.mode(), &key) {
                    for effect in app.handle_action(action, Instant::now()) {
                        dispatch(effect, store.as_ref(), &tx);
                    }
                }
            }
        }
    }

    restore_terminal()?;
    log::info!("TUI exited normally");
    Ok(())
}

/// Initialize the backing client off the UI thread.
fn spawn_connect(tx: Sender<Msg>) {
    thread::spawn(move || {
        let msg = match AwsSecretStore::connect() {
            Ok(store) => Msg::Ready(Arc::new(store)),
            Err(e) => Msg::ConnectFailed(e.to_string()),
        };
        let _ = tx.send(msg);
    });
}

/// Execute one effect on a detached worker thread.
///
/// Each worker produces exactly one completion message; a dropped receiver
/// (session already gone) is ignored.
fn dispatch(effect: Effect, store: Option<&Arc<dyn SecretStore>>, tx: &Sender<Msg>) {
    log::debug!("Dispatching effect: {:?}", effect);

    match effect {
        Effect::CopyToClipboard { text } => {
            let tx = tx.clone();
            thread::spawn(move || {
                let ok = copy_to_clipboard(&text);
                let _ = tx.send(Msg::Copied { ok });
            });
        }
        Effect::Scan {
            generation,
            stale_only,
        } => spawn_store_task(store, tx, move |store| {
            let result = store
                .list_secrets()
                .map(|records| analyzer::analyze(&records, stale_only, Utc::now()))
                .map_err(|e| e.to_string());
            Msg::ScanComplete { generation, result }
        }),
        Effect::LoadVersions { name } => spawn_store_task(store, tx, move |store| {
            let result = store
                .list_versions(&name)
                .map(|versions| versions.into_iter().map(VersionRow::from).collect())
                .map_err(|e| e.to_string());
            Msg::VersionsLoaded { name, result }
        }),
        Effect::RevealValue { name, version_id } => spawn_store_task(store, tx, move |store| {
            let result = store
                .get_value(&name, &version_id)
                .map_err(|e| e.to_string());
            Msg::ValueRevealed {
                name,
                version_id,
                result,
            }
        }),
        Effect::DeleteSecrets { names } => spawn_store_task(store, tx, move |store| {
            // Sequential, best-effort: keep going past failures.
            let outcomes = names
                .into_iter()
                .map(|name| {
                    let result = store.delete_secret(&name).map_err(|e| e.to_string());
                    DeleteOutcome { name, result }
                })
                .collect();
            Msg::DeleteComplete { outcomes }
        }),
    }
}

/// Spawn a worker that runs one store call and sends its completion.
///
/// Store-backed effects are never requested before `Msg::Ready`, so a
/// missing store handle means a superseded dispatch and is dropped.
fn spawn_store_task<F>(store: Option<&Arc<dyn SecretStore>>, tx: &Sender<Msg>, task: F)
where
    F: FnOnce(&dyn SecretStore) -> Msg + Send + 'static,
{
    let Some(store) = store else {
        log::warn!("Dropping effect dispatched before the client was ready");
        return;
    };
    let store = Arc::clone(store);
    let tx = tx.clone();

    thread::spawn(move || {
        let _ = tx.send(task(store.as_ref()));
    });
}

/// Best-effort clipboard copy; failures are logged and swallowed.
fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Clipboard copy failed: {}", e);
            false
        }
    }
}

/// Set up the terminal for TUI mode.
fn setup_terminal() -> TuiResult<Term> {
    log::debug!("Setting up terminal for TUI");

    terminal::enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    log::debug!("Restoring terminal");

    let _ = terminal::disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen, cursor::Show);

    Ok(())
}
