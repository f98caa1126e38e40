//! Key mapping from terminal events to per-tick game inputs.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameInput;

/// Driver-level action decoded from one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed this input to the board on the next tick.
    Play(GameInput),
    Pause,
    Restart,
}

/// Map a key press to an action.
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(KeyAction::Play(GameInput::SlideLeft)),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(KeyAction::Play(GameInput::SlideRight)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(KeyAction::Play(GameInput::SoftDrop)),

        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(KeyAction::Play(GameInput::RotateCw)),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(KeyAction::Play(GameInput::RotateCcw)),

        KeyCode::Char(' ') => Some(KeyAction::Play(GameInput::HardDrop)),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(KeyAction::Play(GameInput::Hold)),

        KeyCode::Char('p') | KeyCode::Char('P') => Some(KeyAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Restart),

        _ => None,
    }
}

/// Check if a key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
