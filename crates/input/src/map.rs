//! Key mapping from terminal events to game actions.

use crate::types::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Classify a key press into at most one action.
///
/// Priority: arrow keys move, Ctrl+W saves, Ctrl+X (or Ctrl+C) quits, `p`/`P`
/// pauses. Everything else maps to `None`.
pub fn classify(key: KeyEvent) -> Option<Action> {
    if let Some((dx, dy)) = direction(key.code) {
        return Some(Action::Move { dx, dy });
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Action::Save),
            KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Char('c') | KeyCode::Char('C') => {
                Some(Action::Quit)
            }
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Action::Pause),
        _ => None,
    }
}

fn direction(code: KeyCode) -> Option<(i32, i32)> {
    match code {
        KeyCode::Up => Some((0, -1)),
        KeyCode::Down => Some((0, 1)),
        KeyCode::Left => Some((-1, 0)),
        KeyCode::Right => Some((1, 0)),
        _ => None,
    }
}

/// Short human-readable key name, e.g. `UP`, `Ctrl+W`, `Q`.
pub fn describe_key(key: KeyEvent) -> String {
    let base = match key.code {
        KeyCode::Up => "UP".to_string(),
        KeyCode::Down => "DOWN".to_string(),
        KeyCode::Left => "LEFT".to_string(),
        KeyCode::Right => "RIGHT".to_string(),
        KeyCode::Enter => "ENTER".to_string(),
        KeyCode::Esc => "ESC".to_string(),
        KeyCode::Char(' ') => "SPACE".to_string(),
        KeyCode::Char(c) => c.to_uppercase().collect(),
        _ => "UNKNOWN".to_string(),
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        format!("Ctrl+{base}")
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            classify(KeyEvent::from(KeyCode::Up)),
            Some(Action::Move { dx: 0, dy: -1 })
        );
        assert_eq!(
            classify(KeyEvent::from(KeyCode::Down)),
            Some(Action::Move { dx: 0, dy: 1 })
        );
        assert_eq!(
            classify(KeyEvent::from(KeyCode::Left)),
            Some(Action::Move { dx: -1, dy: 0 })
        );
        assert_eq!(
            classify(KeyEvent::from(KeyCode::Right)),
            Some(Action::Move { dx: 1, dy: 0 })
        );
    }

    #[test]
    fn test_chord_keys() {
        assert_eq!(classify(ctrl('w')), Some(Action::Save));
        assert_eq!(classify(ctrl('x')), Some(Action::Quit));
        assert_eq!(classify(ctrl('c')), Some(Action::Quit));
        assert_eq!(classify(ctrl('p')), None);
    }

    #[test]
    fn test_pause_is_case_insensitive() {
        assert_eq!(classify(KeyEvent::from(KeyCode::Char('p'))), Some(Action::Pause));
        assert_eq!(classify(KeyEvent::from(KeyCode::Char('P'))), Some(Action::Pause));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(classify(KeyEvent::from(KeyCode::Char('w'))), None);
        assert_eq!(classify(KeyEvent::from(KeyCode::Char('q'))), None);
        assert_eq!(classify(KeyEvent::from(KeyCode::Enter)), None);
    }

    #[test]
    fn test_describe_key() {
        assert_eq!(describe_key(KeyEvent::from(KeyCode::Left)), "LEFT");
        assert_eq!(describe_key(ctrl('w')), "Ctrl+W");
        assert_eq!(describe_key(KeyEvent::from(KeyCode::Char('q'))), "Q");
    }
}
