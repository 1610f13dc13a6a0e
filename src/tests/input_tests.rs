#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use crate::input::{InputEvent, InputSource, Key, KeyboardInput, key_from_code};

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_from_code(KeyCode::Left), Some(Key::Left));
        assert_eq!(key_from_code(KeyCode::Char('a')), Some(Key::Left));
        assert_eq!(key_from_code(KeyCode::Right), Some(Key::Right));
        assert_eq!(key_from_code(KeyCode::Char('s')), Some(Key::Down));
        assert_eq!(key_from_code(KeyCode::Up), Some(Key::Up));
        assert_eq!(key_from_code(KeyCode::Char(' ')), Some(Key::Confirm));
        assert_eq!(key_from_code(KeyCode::Enter), Some(Key::Confirm));
        assert_eq!(key_from_code(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_idle_keyboard_reports_nothing() {
        let mut keyboard = KeyboardInput::new();
        assert_eq!(keyboard.poll_event(), None);
        assert!(!keyboard.is_confirm_pressed());
    }

    #[test]
    fn test_held_movement_repeats() {
        let mut keyboard = KeyboardInput::new();
        keyboard.key_down(Key::Right);

        for _ in 0..3 {
            assert_eq!(keyboard.poll_event(), Some(InputEvent::MoveRight));
            keyboard.end_tick();
        }

        keyboard.key_up(Key::Right);
        assert_eq!(keyboard.poll_event(), None);
    }

    #[test]
    fn test_soft_drop_wins_over_sideways() {
        let mut keyboard = KeyboardInput::new();
        keyboard.key_down(Key::Left);
        keyboard.key_down(Key::Right);
        assert_eq!(keyboard.poll_event(), Some(InputEvent::MoveLeft));

        keyboard.key_down(Key::Down);
        assert_eq!(keyboard.poll_event(), Some(InputEvent::SoftDrop));
    }

    #[test]
    fn test_rotate_is_edge_triggered() {
        let mut keyboard = KeyboardInput::new();
        keyboard.key_down(Key::Up);
        assert_eq!(keyboard.poll_event(), Some(InputEvent::Rotate));
        keyboard.end_tick();

        // Still held, but no new press
        keyboard.key_down(Key::Up);
        assert!(keyboard.is_held(Key::Up));
        assert_eq!(keyboard.poll_event(), None);

        keyboard.key_up(Key::Up);
        keyboard.key_down(Key::Up);
        assert_eq!(keyboard.poll_event(), Some(InputEvent::Rotate));
    }

    #[test]
    fn test_confirm_is_edge_triggered() {
        let mut keyboard = KeyboardInput::new();
        keyboard.key_down(Key::Confirm);
        assert!(keyboard.is_confirm_pressed());
        assert_eq!(keyboard.poll_event(), None);

        keyboard.end_tick();
        assert!(!keyboard.is_confirm_pressed());
    }

    #[test]
    fn test_release_all() {
        let mut keyboard = KeyboardInput::new();
        keyboard.key_down(Key::Left);
        keyboard.key_down(Key::Down);
        keyboard.release_all();

        assert!(!keyboard.is_held(Key::Left));
        assert!(!keyboard.is_held(Key::Down));
    }
}
