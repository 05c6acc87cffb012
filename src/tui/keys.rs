//! Key event translation.
//!
//! Maps raw crossterm key events to session [`Action`]s, per mode. The key
//! map is fixed: `Ctrl+C` quits from everywhere, `q` quits from every mode
//! except the filter-entry modes (where it is query input).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{Action, Mode};

/// Translate a key event into an action for the given mode.
///
/// Returns `None` for unbound keys and for key release events (some
/// terminals send these).
#[must_use]
pub fn action_for_key(mode: Mode, key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C quits from every mode, including filter entry.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if mode.is_filtering() {
        return filter_action(key);
    }

    if key.code == KeyCode::Char('q') {
        return Some(Action::Quit);
    }

    match mode {
        Mode::Results => results_action(key),
        Mode::ViewSecret => view_action(key),
        Mode::ConfirmDelete => confirm_action(key),
        Mode::Error => match key.code {
            KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
        // Banner and Scanning only accept quit, handled above.
        _ => None,
    }
}

fn results_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::NavigateUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::NavigateDown),
        KeyCode::Char(' ') => Some(Action::ToggleSelect),
        KeyCode::Enter => Some(Action::OpenSecret),
        KeyCode::Char('/') => Some(Action::BeginFilterInclude),
        KeyCode::Char('?') => Some(Action::BeginFilterExclude),
        KeyCode::Char('D') => Some(Action::RequestDelete),
        KeyCode::Delete if key.modifiers.contains(KeyModifiers::SHIFT) => {
            Some(Action::RequestDelete)
        }
        KeyCode::Char('r') => Some(Action::RescanStale),
        KeyCode::Char('a') => Some(Action::RescanAll),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

fn filter_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::Input(c))
        }
        _ => None,
    }
}

fn view_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::NavigateUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::NavigateDown),
        KeyCode::Char('v') => Some(Action::Reveal),
        KeyCode::Char('c') => Some(Action::CopyName),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

fn confirm_action(key: &KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') => Some(Action::Confirm),
        KeyCode::Char('n') | KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

/// Footer hint pairs (key, description) for the given mode.
#[must_use]
pub fn footer_hints(mode: Mode) -> Vec<(&'static str, &'static str)> {
    match mode {
        Mode::Banner | Mode::Scanning => vec![("q", "Quit")],
        Mode::Results => vec![
            ("↑↓/jk", "Move"),
            ("Space", "Select"),
            ("Enter", "Inspect"),
            ("/", "Filter"),
            ("?", "Exclude"),
            ("D", "Delete"),
            ("r", "Rescan stale"),
            ("a", "Rescan all"),
            ("Esc", "Clear filter"),
            ("q", "Quit"),
        ],
        Mode::FilterInclude | Mode::FilterExclude => {
            vec![("Enter", "Apply"), ("Esc", "Cancel"), ("Ctrl+C", "Quit")]
        }
        Mode::ViewSecret => vec![
            ("↑↓/jk", "Move"),
            ("v", "Reveal"),
            ("c", "Copy name"),
            ("Esc", "Back"),
            ("q", "Quit"),
        ],
        Mode::ConfirmDelete => vec![("y", "Delete"), ("n/Esc", "Cancel")],
        Mode::Error => vec![("q/Esc", "Quit")],
        Mode::Quitting => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_results_bindings() {
        assert_eq!(
            action_for_key(Mode::Results, &key(KeyCode::Char('j'))),
            Some(Action::NavigateDown)
        );
        assert_eq!(
            action_for_key(Mode::Results, &key(KeyCode::Up)),
            Some(Action::NavigateUp)
        );
        assert_eq!(
            action_for_key(Mode::Results, &key(KeyCode::Char(' '))),
            Some(Action::ToggleSelect)
        );
        assert_eq!(
            action_for_key(Mode::Results, &key(KeyCode::Char('/'))),
            Some(Action::BeginFilterInclude)
        );
        assert_eq!(
            action_for_key(Mode::Results, &key(KeyCode::Char('?'))),
            Some(Action::BeginFilterExclude)
        );
        assert_eq!(
            action_for_key(Mode::Results, &key(KeyCode::Char('D'))),
            Some(Action::RequestDelete)
        );
        assert_eq!(
            action_for_key(Mode::Results, &key(KeyCode::Char('d'))),
            None,
            "lowercase d is unbound"
        );
        assert_eq!(
            action_for_key(
                Mode::Results,
                &KeyEvent::new(KeyCode::Delete, KeyModifiers::SHIFT)
            ),
            Some(Action::RequestDelete)
        );
        assert_eq!(
            action_for_key(Mode::Results, &key(KeyCode::Delete)),
            None,
            "plain delete is unbound"
        );
    }

    #[test]
    fn test_quit_bindings() {
        assert_eq!(
            action_for_key(Mode::Banner, &key(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
        assert_eq!(action_for_key(Mode::Scanning, &ctrl('c')), Some(Action::Quit));
        assert_eq!(
            action_for_key(Mode::ConfirmDelete, &key(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_filter_mode_treats_q_as_input() {
        assert_eq!(
            action_for_key(Mode::FilterInclude, &key(KeyCode::Char('q'))),
            Some(Action::Input('q'))
        );
        // Ctrl+C still quits.
        assert_eq!(
            action_for_key(Mode::FilterInclude, &ctrl('c')),
            Some(Action::Quit)
        );
        assert_eq!(
            action_for_key(Mode::FilterExclude, &key(KeyCode::Enter)),
            Some(Action::Confirm)
        );
        assert_eq!(
            action_for_key(Mode::FilterExclude, &key(KeyCode::Backspace)),
            Some(Action::Backspace)
        );
    }

    #[test]
    fn test_view_bindings() {
        assert_eq!(
            action_for_key(Mode::ViewSecret, &key(KeyCode::Char('v'))),
            Some(Action::Reveal)
        );
        assert_eq!(
            action_for_key(Mode::ViewSecret, &key(KeyCode::Char('c'))),
            Some(Action::CopyName)
        );
        assert_eq!(
            action_for_key(Mode::ViewSecret, &key(KeyCode::Esc)),
            Some(Action::Cancel)
        );
    }

    #[test]
    fn test_confirm_bindings() {
        assert_eq!(
            action_for_key(Mode::ConfirmDelete, &key(KeyCode::Char('y'))),
            Some(Action::Confirm)
        );
        assert_eq!(
            action_for_key(Mode::ConfirmDelete, &key(KeyCode::Char('n'))),
            Some(Action::Cancel)
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(action_for_key(Mode::Results, &release), None);
    }

    #[test]
    fn test_footer_hints_present_for_all_modes() {
        for mode in [
            Mode::Banner,
            Mode::Scanning,
            Mode::Results,
            Mode::FilterInclude,
            Mode::FilterExclude,
            Mode::ViewSecret,
            Mode::ConfirmDelete,
            Mode::Error,
        ] {
            assert!(!footer_hints(mode).is_empty(), "no hints for {mode:?}");
        }
    }
}
