//! TUI layout and rendering with ratatui.
//!
//! # Overview
//!
//! Renders the session as a read-only snapshot: header with title and
//! counts, the result table (or banner / scanning / version views), a
//! status line, a key-hint footer, and the delete-confirmation modal.
//! The renderer never mutates session state; colors come from the
//! [`Theme`] value handed in by the runner.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::app::{App, Mode};
use super::keys;
use super::theme::Theme;

/// Maximum description column width, matching the results table setup.
const DESCRIPTION_WIDTH: usize = 47;

/// Render the session based on its current state.
pub fn render(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status line
            Constraint::Length(3), // Footer
        ])
        .split(area);

    render_header(frame, app, theme, chunks[0]);
    render_content(frame, app, theme, chunks[1]);
    render_status_line(frame, app, theme, chunks[2]);
    render_footer(frame, app, theme, chunks[3]);

    if app.mode() == Mode::ConfirmDelete {
        render_confirm_dialog(frame, app, theme, area);
    }
}

/// Render the header with title and result stats.
fn render_header(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let title = match app.mode() {
        Mode::Banner => "secretsweep".to_string(),
        Mode::Scanning => "secretsweep [Scanning...]".to_string(),
        Mode::FilterInclude => "secretsweep [Filter]".to_string(),
        Mode::FilterExclude => "secretsweep [Exclude]".to_string(),
        Mode::ViewSecret => format!(
            "secretsweep [{}]",
            truncate_string(app.viewing().unwrap_or(""), 40)
        ),
        Mode::ConfirmDelete => "secretsweep [Confirm Delete]".to_string(),
        Mode::Error => "secretsweep [Error]".to_string(),
        Mode::Results | Mode::Quitting => "secretsweep".to_string(),
    };

    let stats = if matches!(
        app.mode(),
        Mode::Results | Mode::FilterInclude | Mode::FilterExclude | Mode::ConfirmDelete
    ) {
        let scope = if app.stale_only() { "stale" } else { "all" };
        format!(
            " | {} secrets ({}), {} selected",
            app.current().len(),
            scope,
            app.current().selected_count()
        )
    } else {
        String::new()
    };

    let header = Paragraph::new(format!("{title}{stats}"))
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary)),
        );

    frame.render_widget(header, area);
}

/// Render the main content area based on current mode.
fn render_content(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    match app.mode() {
        Mode::Banner => render_banner(frame, app, theme, area),
        Mode::Scanning => render_scanning(frame, theme, area),
        Mode::ViewSecret => render_versions(frame, app, theme, area),
        Mode::Error => render_init_error(frame, app, theme, area),
        Mode::Quitting => {}
        _ => render_results(frame, app, theme, area),
    }
}

fn render_banner(frame: &mut Frame, _app: &App, theme: &Theme, area: Rect) {
    let hint = "Connecting to AWS Secrets Manager...";

    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            "secretsweep",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "find and prune stale secrets",
            Style::default().fg(theme.dim),
        )),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(theme.normal))),
    ]);

    let banner = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(banner, area);
}

fn render_scanning(frame: &mut Frame, theme: &Theme, area: Rect) {
    let scanning = Paragraph::new("Scanning secrets...")
        .style(Style::default().fg(theme.secondary))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(scanning, area);
}

fn render_init_error(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let message = app.init_error().unwrap_or("Initialization failed");

    let error = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Startup failed",
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message),
    ])
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.danger)),
    );
    frame.render_widget(error, area);
}

/// Render the result table (also the backdrop for filter entry and the
/// delete confirmation).
fn render_results(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    if app.current().is_empty() {
        let message = if app.editing_filter().is_some() {
            "No secrets match the filter."
        } else if app.stale_only() {
            "No stale secrets found."
        } else {
            "No secrets found."
        };
        let empty = Paragraph::new(message)
            .style(Style::default().fg(theme.dim))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Secrets"));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["", "Name", "Description", "Last Accessed", "Created"])
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let visible = area.height.saturating_sub(4) as usize; // borders + header row
    let end = (app.scroll() + visible.max(1)).min(app.current().len());

    let rows: Vec<Row> = (app.scroll()..end)
        .map(|index| {
            let result = &app.current().rows[index];
            let selected = app.current().selected[index];

            let marker = if selected { "[x]" } else { "[ ]" };
            let description = result.description.as_deref().unwrap_or("");

            let style = if index == app.cursor() {
                Style::default()
                    .fg(theme.inverted_fg)
                    .bg(theme.primary)
                    .add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default()
                    .fg(theme.secondary)
                    .add_modifier(Modifier::BOLD)
            } else if result.stale {
                Style::default().fg(theme.danger)
            } else {
                Style::default().fg(theme.normal)
            };

            Row::new(vec![
                Cell::from(marker),
                Cell::from(result.name.clone()),
                Cell::from(truncate_string(description, DESCRIPTION_WIDTH)),
                Cell::from(result.last_accessed_label.clone()),
                Cell::from(result.created_label.clone()),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(24),
            Constraint::Min(16),
            Constraint::Length(13),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Secrets"));

    frame.render_widget(table, area);
}

/// Render the version list and value panel for the viewed secret.
fn render_versions(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let items: Vec<ListItem> = app
        .versions()
        .iter()
        .enumerate()
        .map(|(index, version)| {
            let stages = if version.stages.is_empty() {
                String::new()
            } else {
                format!(" [{}]", version.stages.join(", "))
            };
            let revealed = if version.value.is_some() { " *" } else { "" };
            let line = format!(
                "{}{}  created {}  accessed {}{}",
                truncate_string(&version.version_id, 36),
                stages,
                version.created_label,
                version.last_accessed_label,
                revealed
            );

            let style = if index == app.version_cursor() {
                Style::default()
                    .fg(theme.inverted_fg)
                    .bg(theme.primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.normal)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!("Versions: {}", app.viewing().unwrap_or(""));
    let list = if app.versions_loading() {
        List::new(vec![ListItem::new("Loading versions...")
            .style(Style::default().fg(theme.dim))])
    } else if items.is_empty() {
        List::new(vec![
            ListItem::new("No versions found.").style(Style::default().fg(theme.dim))
        ])
    } else {
        List::new(items)
    };

    frame.render_widget(
        list.block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(theme.primary)),
        ),
        chunks[0],
    );

    let value_text = match app.versions().get(app.version_cursor()) {
        Some(version) => match &version.value {
            Some(value) => Text::from(value.as_str()),
            None => Text::from(Span::styled(
                "(hidden)  press v to reveal",
                Style::default().fg(theme.dim),
            )),
        },
        None => Text::from(""),
    };

    let value = Paragraph::new(value_text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Value"));
    frame.render_widget(value, chunks[1]);
}

/// Render the one-line status bar: filter input, errors, or status text.
fn render_status_line(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let line = if let Some((mode, query)) = app.editing_filter() {
        Line::from(vec![
            Span::styled(
                format!(" {} filter: ", mode.label()),
                Style::default().fg(theme.secondary),
            ),
            Span::styled(
                format!("{query}_"),
                Style::default()
                    .fg(theme.normal)
                    .add_modifier(Modifier::BOLD),
            ),
        ])
    } else if let Some(error) = app.error_message() {
        Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(theme.danger),
        ))
    } else if let Some(status) = app.status_text() {
        Line::from(Span::styled(
            format!(" {status}"),
            Style::default().fg(theme.success),
        ))
    } else if let Some((mode, query)) = app.active_filter() {
        Line::from(Span::styled(
            format!(" filter active ({}: {query})  Esc to clear", mode.label()),
            Style::default().fg(theme.dim),
        ))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the footer with the key hints for the current mode.
fn render_footer(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let spans: Vec<Span> = keys::footer_hints(app.mode())
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(
                    format!("[{key}]"),
                    Style::default()
                        .fg(theme.secondary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("{desc} "), Style::default().fg(theme.normal)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

/// Render the delete confirmation modal.
fn render_confirm_dialog(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let dialog_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, dialog_area);

    let names = app.current().selected_names();

    let mut lines = vec![
        Line::from(Span::styled(
            "Confirm Deletion",
            Style::default()
                .fg(theme.danger)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Permanently delete {} secret(s) without recovery?",
            names.len()
        )),
        Line::from(""),
    ];

    for name in names.iter().take(8) {
        lines.push(Line::from(format!("  {}", truncate_string(name, 50))));
    }
    if names.len() > 8 {
        lines.push(Line::from(format!("  ... and {} more", names.len() - 8)));
    }

    lines.push(Line::from(""));
    if app.deleting() {
        lines.push(Line::from(Span::styled(
            "Deleting...",
            Style::default().fg(theme.secondary),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "This action cannot be undone!",
            Style::default().fg(theme.danger),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[y] Delete    [n/Esc] Cancel",
            Style::default().fg(theme.primary),
        )));
    }

    let confirm = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm")
                .border_style(Style::default().fg(theme.danger)),
        );

    frame.render_widget(confirm, dialog_area);
}

// ==================== Helper Functions ====================

/// Truncate a string with ellipsis if it exceeds max length.
///
/// # Examples
///
/// ```
/// use secretsweep::tui::ui::truncate_string;
///
/// assert_eq!(truncate_string("hello", 10), "hello");
/// assert_eq!(truncate_string("hello world", 8), "hello...");
/// ```
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}

/// Create a centered rectangle with given percentage of parent.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
