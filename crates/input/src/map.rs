//! Key bindings from crossterm key codes to game controls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Control;

/// What a key means to the terminal frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Play(Control),
    Restart,
    Quit,
}

/// Map a key to its binding, ignoring the event kind.
pub fn map_key(key: KeyEvent) -> Option<KeyBinding> {
    if should_quit(key) {
        return Some(KeyBinding::Quit);
    }

    let control = match key.code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Control::Left,
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Control::Right,
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Control::Down,

        KeyCode::Up | KeyCode::Char('x' | 'X' | 'k' | 'K' | 'w' | 'W') => Control::RotateCw,
        KeyCode::Char('z' | 'Z') => Control::RotateCcw,

        KeyCode::Char('c' | 'C') => Control::Hold,
        KeyCode::Char(' ') => Control::HardDrop,

        KeyCode::Char('r' | 'R') => return Some(KeyBinding::Restart),
        _ => return None,
    };
    Some(KeyBinding::Play(control))
}

/// `q`, `Esc` or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q' | 'Q') | KeyCode::Esc)
        || (matches!(key.code, KeyCode::Char('c' | 'C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(code: KeyCode) -> Option<Control> {
        match map_key(KeyEvent::from(code)) {
            Some(KeyBinding::Play(control)) => Some(control),
            _ => None,
        }
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(play(KeyCode::Left), Some(Control::Left));
        assert_eq!(play(KeyCode::Right), Some(Control::Right));
        assert_eq!(play(KeyCode::Down), Some(Control::Down));
        assert_eq!(play(KeyCode::Char('H')), Some(Control::Left));
        assert_eq!(play(KeyCode::Char('d')), Some(Control::Right));
        assert_eq!(play(KeyCode::Char('j')), Some(Control::Down));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(play(KeyCode::Up), Some(Control::RotateCw));
        assert_eq!(play(KeyCode::Char('x')), Some(Control::RotateCw));
        assert_eq!(play(KeyCode::Char('Z')), Some(Control::RotateCcw));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(play(KeyCode::Char(' ')), Some(Control::HardDrop));
        assert_eq!(play(KeyCode::Char('c')), Some(Control::Hold));
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('r'))),
            Some(KeyBinding::Restart)
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::F(5))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyBinding::Quit)
        );
    }
}
