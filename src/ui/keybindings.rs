//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Player actions derived from key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    TogglePause,
    /// Jump to a tenth of the track (0 = start, 9 = 90%)
    JumpTenth(u8),
    Quit,
    None,
}

/// Convert a key event to a player action.
pub fn key_to_action(key: &KeyEvent) -> PlayerAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return PlayerAction::Quit;
    }

    match key.code {
        KeyCode::Char(' ') => PlayerAction::TogglePause,
        KeyCode::Char(c @ '0'..='9') => PlayerAction::JumpTenth(c as u8 - b'0'),
        KeyCode::Char('q') | KeyCode::Esc => PlayerAction::Quit,
        _ => PlayerAction::None,
    }
}
