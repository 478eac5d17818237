//! Key mapping from terminal events to intents.

use crate::types::{Intent, SessionState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to an intent for the given session state.
pub fn map_key(key: KeyEvent, state: SessionState) -> Option<Intent> {
    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Intent::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Intent::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Intent::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(Intent::Rotate),

        KeyCode::Char(' ') => Some(Intent::HardDrop),

        // Lifecycle
        KeyCode::Char('p') | KeyCode::Char('P') => match state {
            SessionState::Paused => Some(Intent::Resume),
            _ => Some(Intent::Pause),
        },
        KeyCode::Enter => match state {
            SessionState::Start => Some(Intent::Start),
            SessionState::Over => Some(Intent::Restart),
            SessionState::Paused => Some(Intent::Resume),
            SessionState::Playing => None,
        },
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Intent::Restart),
        KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => Some(Intent::ReturnToMenu),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn playing(code: KeyCode) -> Option<Intent> {
        map_key(KeyEvent::from(code), SessionState::Playing)
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(playing(KeyCode::Left), Some(Intent::MoveLeft));
        assert_eq!(playing(KeyCode::Right), Some(Intent::MoveRight));
        assert_eq!(playing(KeyCode::Down), Some(Intent::SoftDrop));

        assert_eq!(playing(KeyCode::Char('H')), Some(Intent::MoveLeft));
        assert_eq!(playing(KeyCode::Char('d')), Some(Intent::MoveRight));
        assert_eq!(playing(KeyCode::Char('J')), Some(Intent::SoftDrop));
    }

    #[test]
    fn test_rotation_and_drop_keys() {
        assert_eq!(playing(KeyCode::Up), Some(Intent::Rotate));
        assert_eq!(playing(KeyCode::Char('W')), Some(Intent::Rotate));
        assert_eq!(playing(KeyCode::Char(' ')), Some(Intent::HardDrop));
    }

    #[test]
    fn test_pause_key_toggles_by_state() {
        let p = KeyEvent::from(KeyCode::Char('p'));
        assert_eq!(map_key(p, SessionState::Playing), Some(Intent::Pause));
        assert_eq!(map_key(p, SessionState::Paused), Some(Intent::Resume));
    }

    #[test]
    fn test_enter_key_by_state() {
        let enter = KeyEvent::from(KeyCode::Enter);
        assert_eq!(map_key(enter, SessionState::Start), Some(Intent::Start));
        assert_eq!(map_key(enter, SessionState::Over), Some(Intent::Restart));
        assert_eq!(map_key(enter, SessionState::Paused), Some(Intent::Resume));
        assert_eq!(map_key(enter, SessionState::Playing), None);
    }

    #[test]
    fn test_menu_key() {
        assert_eq!(playing(KeyCode::Esc), Some(Intent::ReturnToMenu));
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('m')), SessionState::Over),
            Some(Intent::ReturnToMenu)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
