//! Session state management.
//!
//! # Overview
//!
//! This module owns the interactive session state machine: scanning,
//! browsing results, live filtering, version inspection, and the
//! delete-confirmation workflow. The [`App`] struct is the single writer
//! for all session state.
//!
//! # Architecture
//!
//! The session is driven by three inputs, all handled on the UI thread:
//!
//! - [`Action`]s translated from key events: `handle_action` mutates state
//!   and may request asynchronous work by returning [`Effect`]s.
//! - [`Msg`]s, the single completion message each dispatched effect
//!   produces: `apply_msg` merges them back into state.
//! - Timer ticks: `tick` drives the banner pacing delay and expires
//!   transient status text.
//!
//! No state is mutated from worker threads, so no locking is needed.
//! Scan dispatches carry a monotonically increasing generation; completions
//! for any other generation are discarded.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::analyzer::AnalysisResult;
use crate::filter::{self, FilterMode};
use crate::store::{SecretStore, SecretVersion};

/// Cosmetic pacing delay before the banner gives way to scanning.
pub const BANNER_DELAY: Duration = Duration::from_millis(1500);

/// How long transient status text stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(3);

/// Session mode.
///
/// Modes control what is displayed and which actions are available.
/// Every transition is made by [`App`] itself in response to an action,
/// message, or tick; no other code sets the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Startup banner while the backing client initializes.
    #[default]
    Banner,
    /// Full scan in flight.
    Scanning,
    /// Browsing the result list - main navigation mode.
    Results,
    /// Typing an include filter (live preview).
    FilterInclude,
    /// Typing an exclude filter (live preview).
    FilterExclude,
    /// Inspecting the versions of one secret.
    ViewSecret,
    /// Confirming a batch deletion.
    ConfirmDelete,
    /// Client initialization failed - dead end, quit only.
    Error,
    /// Session is quitting.
    Quitting,
}

impl Mode {
    /// Check if the session is done (quitting).
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Quitting)
    }

    /// Check if this mode is one of the filter-entry modes.
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        matches!(self, Self::FilterInclude | Self::FilterExclude)
    }
}

/// User intent produced by key event translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the cursor up.
    NavigateUp,
    /// Move the cursor down.
    NavigateDown,
    /// Toggle selection of the row at the cursor.
    ToggleSelect,
    /// Open the version view for the secret at the cursor.
    OpenSecret,
    /// Start an include-filter session.
    BeginFilterInclude,
    /// Start an exclude-filter session.
    BeginFilterExclude,
    /// Append a character to the filter query.
    Input(char),
    /// Remove the last character of the filter query.
    Backspace,
    /// Ask to delete the selected secrets.
    RequestDelete,
    /// Rescan, keeping only stale secrets.
    RescanStale,
    /// Rescan, listing every secret.
    RescanAll,
    /// Reveal the value of the version at the cursor.
    Reveal,
    /// Copy the viewed secret's name to the clipboard.
    CopyName,
    /// Confirm the pending dialog (delete yes / filter commit).
    Confirm,
    /// Cancel / escape the current context.
    Cancel,
    /// Quit the session.
    Quit,
}

/// Asynchronous work requested by the session.
///
/// The runner executes each effect on a detached worker thread; every
/// effect produces exactly one [`Msg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Full scan: list, analyze, rank.
    Scan {
        /// Generation tag used to discard stale completions.
        generation: u64,
        /// Whether the analyzer keeps only stale records.
        stale_only: bool,
    },
    /// Fetch all versions of one secret.
    LoadVersions { name: String },
    /// Fetch and unmask one version's value.
    RevealValue { name: String, version_id: String },
    /// Delete the named secrets sequentially, best-effort.
    DeleteSecrets { names: Vec<String> },
    /// Copy text to the system clipboard, best-effort.
    CopyToClipboard { text: String },
}

/// Per-record outcome of a batch delete.
#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    /// Secret name the delete was attempted for.
    pub name: String,
    /// Success, or the rendered error.
    pub result: Result<(), String>,
}

/// Completion message produced by a dispatched effect.
pub enum Msg {
    /// The backing client is ready.
    Ready(Arc<dyn SecretStore>),
    /// The backing client failed to initialize.
    ConnectFailed(String),
    /// A scan finished.
    ScanComplete {
        /// Generation the scan was dispatched with.
        generation: u64,
        /// Analyzed rows, or the rendered scan error.
        result: Result<Vec<AnalysisResult>, String>,
    },
    /// A version listing finished.
    VersionsLoaded {
        /// Secret the listing belongs to.
        name: String,
        /// Version rows, or the rendered error.
        result: Result<Vec<VersionRow>, String>,
    },
    /// A value fetch finished.
    ValueRevealed {
        /// Secret the value belongs to.
        name: String,
        /// Version the value belongs to.
        version_id: String,
        /// The value, or the rendered error.
        result: Result<String, String>,
    },
    /// A batch delete finished.
    DeleteComplete {
        /// Per-record outcomes, in attempt order.
        outcomes: Vec<DeleteOutcome>,
    },
    /// A clipboard copy finished.
    Copied {
        /// Whether the copy reached the clipboard.
        ok: bool,
    },
}

/// One version of the viewed secret, with its value masked until revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRow {
    /// Version identifier.
    pub version_id: String,
    /// Creation date label, `"-"` when unknown.
    pub created_label: String,
    /// Last-accessed date label, `"Never"` when absent.
    pub last_accessed_label: String,
    /// Staging labels attached to this version.
    pub stages: Vec<String>,
    /// The secret value; `None` until revealed on demand.
    pub value: Option<String>,
}

impl From<SecretVersion> for VersionRow {
    fn from(version: SecretVersion) -> Self {
        Self {
            version_id: version.version_id,
            created_label: date_label(version.created, "-"),
            last_accessed_label: date_label(version.last_accessed, "Never"),
            stages: version.stages,
            value: None,
        }
    }
}

fn date_label(when: Option<DateTime<Utc>>, absent: &str) -> String {
    when.map_or_else(|| absent.to_string(), |t| t.format("%Y-%m-%d").to_string())
}

/// An ordered result list with its index-aligned selection mask.
///
/// Invariant: `selected.len() == rows.len()` at all times; every mutation
/// keeps the two in lockstep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    /// Analysis results, in display order.
    pub rows: Vec<AnalysisResult>,
    /// Selection mask, index-aligned with `rows`.
    pub selected: Vec<bool>,
}

impl ResultSet {
    /// Create a result set with an all-unselected mask.
    #[must_use]
    pub fn new(rows: Vec<AnalysisResult>) -> Self {
        let selected = vec![false; rows.len()];
        Self { rows, selected }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Flip the selection bit at `index`. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if let Some(flag) = self.selected.get_mut(index) {
            *flag = !*flag;
        }
    }

    /// Number of selected rows.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|s| **s).count()
    }

    /// Names of the selected rows, in display order.
    #[must_use]
    pub fn selected_names(&self) -> Vec<String> {
        self.rows
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(row, _)| row.name.clone())
            .collect()
    }

    /// Reset the mask to all-unselected.
    pub fn clear_selection(&mut self) {
        self.selected.iter_mut().for_each(|s| *s = false);
    }

    /// Remove the named rows together with their mask entries.
    pub fn remove_names(&mut self, names: &HashSet<String>) {
        let keep: Vec<bool> = self
            .rows
            .iter()
            .map(|row| !names.contains(&row.name))
            .collect();

        let mut keep_rows = keep.iter().copied();
        self.rows.retain(|_| keep_rows.next().unwrap_or(true));
        let mut keep_mask = keep.iter().copied();
        self.selected.retain(|_| keep_mask.next().unwrap_or(true));
    }
}

/// Transient status line with its display start time.
#[derive(Debug, Clone)]
struct Status {
    text: String,
    since: Instant,
}

/// Session state.
///
/// The central state container for the interactive session. It is NOT
/// thread-safe and must only be touched from the UI thread; worker threads
/// communicate exclusively through [`Msg`]s.
pub struct App {
    mode: Mode,
    /// Full unfiltered scan output.
    base: ResultSet,
    /// What is displayed, possibly filtered.
    current: ResultSet,
    /// Restore point captured when a filter session opens.
    snapshot: Option<ResultSet>,
    /// Committed filter, if one is active.
    active_filter: Option<(FilterMode, String)>,
    /// Live filter edit buffer.
    filter_query: String,
    /// Cursor into `current`.
    cursor: usize,
    /// Cursor saved when leaving the result list, restored on return.
    saved_cursor: usize,
    /// Scroll offset for the result list.
    scroll: usize,
    /// Number of visible result rows, updated by the renderer.
    visible_rows: usize,
    /// Secret whose versions are being viewed.
    viewing: Option<String>,
    versions: Vec<VersionRow>,
    version_cursor: usize,
    versions_loading: bool,
    /// Whether the backing client finished initializing.
    backend_ready: bool,
    /// When the banner was (re-)entered, for the pacing delay.
    banner_since: Instant,
    /// Generation of the most recently dispatched scan.
    scan_generation: u64,
    /// Whether the next scan keeps only stale records.
    stale_only: bool,
    /// Batch delete in flight.
    deleting: bool,
    error_message: Option<String>,
    init_error: Option<String>,
    status: Option<Status>,
}

impl App {
    /// Create a new session, starting at the banner.
    #[must_use]
    pub fn new(now: Instant) -> Self {
        Self {
            mode: Mode::Banner,
            base: ResultSet::default(),
            current: ResultSet::default(),
            snapshot: None,
            active_filter: None,
            filter_query: String::new(),
            cursor: 0,
            saved_cursor: 0,
            scroll: 0,
            visible_rows: 20,
            viewing: None,
            versions: Vec::new(),
            version_cursor: 0,
            versions_loading: false,
            backend_ready: false,
            banner_since: now,
            scan_generation: 0,
            stale_only: true,
            deleting: false,
            error_message: None,
            init_error: None,
            status: None,
        }
    }

    // ==================== Read-only view ====================

    /// Current session mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Check if the session should quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.mode.is_done()
    }

    /// The displayed result set.
    #[must_use]
    pub fn current(&self) -> &ResultSet {
        &self.current
    }

    /// Cursor position in the result list.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Scroll offset for the result list.
    #[must_use]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Update the number of visible result rows (for scroll calculation).
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
    }

    /// The live filter query while a filter session is open, with its mode.
    #[must_use]
    pub fn editing_filter(&self) -> Option<(FilterMode, &str)> {
        match self.mode {
            Mode::FilterInclude => Some((FilterMode::Include, self.filter_query.as_str())),
            Mode::FilterExclude => Some((FilterMode::Exclude, self.filter_query.as_str())),
            _ => None,
        }
    }

    /// The committed filter, if one is active.
    #[must_use]
    pub fn active_filter(&self) -> Option<(FilterMode, &str)> {
        self.active_filter
            .as_ref()
            .map(|(mode, query)| (*mode, query.as_str()))
    }

    /// Name of the secret whose versions are being viewed.
    #[must_use]
    pub fn viewing(&self) -> Option<&str> {
        self.viewing.as_deref()
    }

    /// Version rows for the viewed secret.
    #[must_use]
    pub fn versions(&self) -> &[VersionRow] {
        &self.versions
    }

    /// Cursor position in the version list.
    #[must_use]
    pub fn version_cursor(&self) -> usize {
        self.version_cursor
    }

    /// Check if a version listing is still in flight.
    #[must_use]
    pub fn versions_loading(&self) -> bool {
        self.versions_loading
    }

    /// Check if a batch delete is in flight.
    #[must_use]
    pub fn deleting(&self) -> bool {
        self.deleting
    }

    /// Whether the next scan keeps only stale records.
    #[must_use]
    pub fn stale_only(&self) -> bool {
        self.stale_only
    }

    /// The current error message (if any).
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The initialization failure message (if any).
    #[must_use]
    pub fn init_error(&self) -> Option<&str> {
        self.init_error.as_deref()
    }

    /// Check if the session ended up in the init-failure dead end.
    #[must_use]
    pub fn init_failed(&self) -> bool {
        self.init_error.is_some()
    }

    /// The transient status text (if any).
    #[must_use]
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    // ==================== Timer ====================

    /// Advance time-driven state: banner pacing and status expiry.
    ///
    /// Returns the effects to dispatch (a scan, once the banner delay has
    /// elapsed and the backing client is ready).
    pub fn tick(&mut self, now: Instant) -> Vec<Effect> {
        if let Some(status) = &self.status {
            if now.duration_since(status.since) >= STATUS_TTL {
                self.status = None;
            }
        }

        if self.mode == Mode::Banner
            && self.backend_ready
            && now.duration_since(self.banner_since) >= BANNER_DELAY
        {
            return vec![self.begin_scan()];
        }

        Vec::new()
    }

    fn begin_scan(&mut self) -> Effect {
        self.scan_generation += 1;
        self.set_mode(Mode::Scanning);
        log::info!(
            "Dispatching scan generation {} (stale_only={})",
            self.scan_generation,
            self.stale_only
        );
        Effect::Scan {
            generation: self.scan_generation,
            stale_only: self.stale_only,
        }
    }

    // ==================== Actions ====================

    /// Handle a user action, returning the effects to dispatch.
    pub fn handle_action(&mut self, action: Action, now: Instant) -> Vec<Effect> {
        log::trace!("Action {:?} in mode {:?}", action, self.mode);

        if action == Action::Quit {
            self.set_mode(Mode::Quitting);
            return Vec::new();
        }

        match self.mode {
            Mode::Results => self.handle_results_action(action, now),
            Mode::FilterInclude | Mode::FilterExclude => self.handle_filter_action(action),
            Mode::ViewSecret => self.handle_view_action(action),
            Mode::ConfirmDelete => self.handle_confirm_action(action),
            // Banner, Scanning, Error and Quitting only react to Quit.
            _ => Vec::new(),
        }
    }

    fn handle_results_action(&mut self, action: Action, now: Instant) -> Vec<Effect> {
        match action {
            Action::NavigateUp => {
                self.cursor = self.cursor.saturating_sub(1);
                self.update_scroll();
            }
            Action::NavigateDown => {
                if self.cursor + 1 < self.current.len() {
                    self.cursor += 1;
                    self.update_scroll();
                }
            }
            Action::ToggleSelect => {
                self.current.toggle(self.cursor);
            }
            Action::OpenSecret => {
                if let Some(row) = self.current.rows.get(self.cursor) {
                    let name = row.name.clone();
                    self.saved_cursor = self.cursor;
                    self.viewing = Some(name.clone());
                    self.versions.clear();
                    self.version_cursor = 0;
                    self.versions_loading = true;
                    self.set_mode(Mode::ViewSecret);
                    return vec![Effect::LoadVersions { name }];
                }
            }
            Action::BeginFilterInclude => self.open_filter(Mode::FilterInclude),
            Action::BeginFilterExclude => self.open_filter(Mode::FilterExclude),
            Action::RequestDelete => {
                if self.current.selected_count() > 0 {
                    self.set_mode(Mode::ConfirmDelete);
                }
            }
            Action::RescanStale => self.rescan(true, now),
            Action::RescanAll => self.rescan(false, now),
            Action::Cancel => {
                self.error_message = None;
                if self.active_filter.take().is_some() {
                    self.current = self.base.clone();
                    self.cursor = 0;
                    self.scroll = 0;
                    log::debug!("Cleared active filter, restored base set");
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn open_filter(&mut self, mode: Mode) {
        self.saved_cursor = self.cursor;
        self.snapshot = Some(self.current.clone());
        self.filter_query.clear();
        self.cursor = 0;
        self.scroll = 0;
        self.set_mode(mode);
    }

    fn rescan(&mut self, stale_only: bool, now: Instant) {
        self.stale_only = stale_only;
        self.banner_since = now;
        self.error_message = None;
        self.status = None;
        self.set_mode(Mode::Banner);
        // The scan itself is dispatched by tick() after the pacing delay.
    }

    fn handle_filter_action(&mut self, action: Action) -> Vec<Effect> {
        let filter_mode = match self.mode {
            Mode::FilterExclude => FilterMode::Exclude,
            _ => FilterMode::Include,
        };

        match action {
            Action::Input(c) => {
                self.filter_query.push(c);
                self.recompute_preview(filter_mode);
            }
            Action::Backspace => {
                self.filter_query.pop();
                self.recompute_preview(filter_mode);
            }
            Action::Cancel => {
                if let Some(snapshot) = self.snapshot.take() {
                    self.current = snapshot;
                }
                self.filter_query.clear();
                self.cursor = self.saved_cursor.min(self.current.len().saturating_sub(1));
                self.update_scroll();
                self.set_mode(Mode::Results);
            }
            Action::Confirm => {
                self.current.clear_selection();
                self.active_filter = Some((filter_mode, std::mem::take(&mut self.filter_query)));
                self.snapshot = None;
                self.cursor = 0;
                self.scroll = 0;
                self.set_mode(Mode::Results);
                log::debug!(
                    "Committed {} filter: {} rows",
                    filter_mode.label(),
                    self.current.len()
                );
            }
            _ => {}
        }
        Vec::new()
    }

    fn recompute_preview(&mut self, mode: FilterMode) {
        if let Some(snapshot) = &self.snapshot {
            self.current = ResultSet::new(filter::apply(&snapshot.rows, &self.filter_query, mode));
            self.cursor = 0;
            self.scroll = 0;
        }
    }

    fn handle_view_action(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::NavigateUp => {
                self.version_cursor = self.version_cursor.saturating_sub(1);
            }
            Action::NavigateDown => {
                if self.version_cursor + 1 < self.versions.len() {
                    self.version_cursor += 1;
                }
            }
            Action::Reveal => {
                let Some(name) = self.viewing.clone() else {
                    return Vec::new();
                };
                if let Some(version) = self.versions.get(self.version_cursor) {
                    // Re-revealing an already revealed version is a no-op.
                    if version.value.is_none() {
                        return vec![Effect::RevealValue {
                            name,
                            version_id: version.version_id.clone(),
                        }];
                    }
                }
            }
            Action::CopyName => {
                if let Some(name) = &self.viewing {
                    return vec![Effect::CopyToClipboard { text: name.clone() }];
                }
            }
            Action::Cancel => {
                self.viewing = None;
                self.versions.clear();
                self.versions_loading = false;
                self.error_message = None;
                self.cursor = self.saved_cursor.min(self.current.len().saturating_sub(1));
                self.update_scroll();
                self.set_mode(Mode::Results);
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_confirm_action(&mut self, action: Action) -> Vec<Effect> {
        if self.deleting {
            // Only Quit (handled globally) is accepted mid-delete.
            return Vec::new();
        }

        match action {
            Action::Confirm => {
                let names = self.current.selected_names();
                if names.is_empty() {
                    self.set_mode(Mode::Results);
                    return Vec::new();
                }
                self.deleting = true;
                log::info!("Deleting {} selected secrets", names.len());
                return vec![Effect::DeleteSecrets { names }];
            }
            Action::Cancel => {
                self.set_mode(Mode::Results);
            }
            _ => {}
        }
        Vec::new()
    }

    // ==================== Completions ====================

    /// Merge an asynchronous completion into session state.
    pub fn apply_msg(&mut self, msg: Msg, now: Instant) {
        if self.mode == Mode::Quitting {
            return;
        }

        match msg {
            Msg::Ready(_) => {
                log::debug!("Backing client ready");
                self.backend_ready = true;
            }
            Msg::ConnectFailed(message) => {
                log::error!("Client initialization failed: {}", message);
                self.init_error = Some(message);
                self.set_mode(Mode::Error);
            }
            Msg::ScanComplete { generation, result } => {
                self.apply_scan_complete(generation, result);
            }
            Msg::VersionsLoaded { name, result } => {
                self.apply_versions_loaded(&name, result);
            }
            Msg::ValueRevealed {
                name,
                version_id,
                result,
            } => {
                self.apply_value_revealed(&name, &version_id, result);
            }
            Msg::DeleteComplete { outcomes } => {
                self.apply_delete_complete(outcomes, now);
            }
            Msg::Copied { ok } => {
                // Best-effort: no confirmation unless the copy succeeded.
                if ok {
                    self.set_status("Secret name copied to clipboard", now);
                }
            }
        }
    }

    fn apply_scan_complete(
        &mut self,
        generation: u64,
        result: Result<Vec<AnalysisResult>, String>,
    ) {
        if generation != self.scan_generation {
            log::debug!(
                "Discarding stale scan completion (generation {} != active {})",
                generation,
                self.scan_generation
            );
            return;
        }

        match result {
            Ok(rows) => {
                log::info!(
                    "Scan generation {} complete: {} results",
                    generation,
                    rows.len()
                );
                self.base = ResultSet::new(rows);
                self.current = self.base.clone();
                self.error_message = None;
            }
            Err(message) => {
                log::error!("Scan generation {} failed: {}", generation, message);
                self.base = ResultSet::default();
                self.current = ResultSet::default();
                self.error_message = Some(format!("Scan failed: {message}"));
            }
        }

        self.snapshot = None;
        self.active_filter = None;
        self.filter_query.clear();
        self.cursor = 0;
        self.scroll = 0;
        self.set_mode(Mode::Results);
    }

    fn apply_versions_loaded(&mut self, name: &str, result: Result<Vec<VersionRow>, String>) {
        if self.mode != Mode::ViewSecret || self.viewing.as_deref() != Some(name) {
            log::debug!("Dropping version listing for {}: view closed", name);
            return;
        }

        self.versions_loading = false;
        match result {
            Ok(versions) => {
                self.versions = versions;
                self.version_cursor = 0;
            }
            Err(message) => {
                self.error_message = Some(format!("Failed to load versions: {message}"));
            }
        }
    }

    fn apply_value_revealed(
        &mut self,
        name: &str,
        version_id: &str,
        result: Result<String, String>,
    ) {
        if self.mode != Mode::ViewSecret || self.viewing.as_deref() != Some(name) {
            log::debug!("Dropping revealed value for {}: view closed", name);
            return;
        }

        match result {
            Ok(value) => {
                if let Some(version) = self
                    .versions
                    .iter_mut()
                    .find(|v| v.version_id == version_id)
                {
                    version.value = Some(value);
                }
            }
            Err(message) => {
                self.error_message = Some(format!("Failed to fetch value: {message}"));
            }
        }
    }

    fn apply_delete_complete(&mut self, outcomes: Vec<DeleteOutcome>, now: Instant) {
        self.deleting = false;

        let mut deleted: HashSet<String> = HashSet::new();
        let mut failures: Vec<(String, String)> = Vec::new();
        for outcome in outcomes {
            match outcome.result {
                Ok(()) => {
                    deleted.insert(outcome.name);
                }
                Err(message) => failures.push((outcome.name, message)),
            }
        }

        self.current.remove_names(&deleted);
        self.base.remove_names(&deleted);
        self.cursor = self.cursor.min(self.current.len().saturating_sub(1));
        self.update_scroll();

        if failures.is_empty() {
            self.set_status(&format!("Deleted {} secret(s)", deleted.len()), now);
        } else {
            let detail: Vec<String> = failures
                .iter()
                .map(|(name, message)| format!("{name} ({message})"))
                .collect();
            self.error_message = Some(format!(
                "Failed to delete {} secret(s): {}",
                failures.len(),
                detail.join("; ")
            ));
        }

        log::info!(
            "Delete complete: {} removed, {} failed",
            deleted.len(),
            failures.len()
        );
        self.set_mode(Mode::Results);
    }

    // ==================== Internals ====================

    fn set_mode(&mut self, mode: Mode) {
        log::debug!("Mode transition: {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }

    fn set_status(&mut self, text: &str, now: Instant) {
        self.status = Some(Status {
            text: text.to_string(),
            since: now,
        });
    }

    /// Keep the cursor inside the visible window.
    fn update_scroll(&mut self) {
        if self.cursor >= self.scroll + self.visible_rows {
            self.scroll = self.cursor - self.visible_rows + 1;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
    }
}
