//! Input handling - convert key events to UI commands

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the player asked the UI to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    /// Execute the choice in slot 0..=3 (keys 1-4).
    Slot(usize),
    /// Escape: leave the drop tray, or back out to the menu.
    Back,
    /// Quit immediately (Ctrl+C).
    Quit,
}

/// Convert a key event to a UI command.
pub fn key_to_command(key: KeyEvent) -> Option<UiCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(UiCommand::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(c @ '1'..='4') => Some(UiCommand::Slot(c as usize - '1' as usize)),
        KeyCode::Esc => Some(UiCommand::Back),
        _ => None,
    }
}
