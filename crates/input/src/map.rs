//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Release events (reported by some terminals) never map to an action.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let KeyCode::Char(c) = key.code else {
        return match key.code {
            KeyCode::Left => Some(GameAction::MoveLeft),
            KeyCode::Right => Some(GameAction::MoveRight),
            KeyCode::Down => Some(GameAction::SoftDrop),
            KeyCode::Up => Some(GameAction::RotateCw),
            _ => None,
        };
    };
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match c.to_ascii_lowercase() {
        'h' | 'a' => Some(GameAction::MoveLeft),
        'l' | 'd' => Some(GameAction::MoveRight),
        'j' | 's' => Some(GameAction::SoftDrop),
        'k' | 'w' | 'x' => Some(GameAction::RotateCw),
        'z' => Some(GameAction::RotateCcw),
        ' ' => Some(GameAction::InstantDrop),
        'u' => Some(GameAction::UpMove),
        'r' => Some(GameAction::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
