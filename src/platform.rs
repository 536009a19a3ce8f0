//! Platform-specific key bindings

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Modifier for the submit shortcut.
/// Ctrl on every platform; terminals on macOS rarely forward Cmd.
pub const SUBMIT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for form help text
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Quit shortcut display
pub const QUIT_SHORTCUT: &str = "Ctrl+C";

/// True for the submit shortcut
pub fn is_submit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('s') && key.modifiers.contains(SUBMIT_MODIFIER)
}

/// True for the global quit shortcut
pub fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_shortcut() {
        assert!(is_submit(&KeyEvent::new(KeyCode::Char('s'), SUBMIT_MODIFIER)));
        assert!(!is_submit(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_quit_shortcut() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
    }
}
