#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use std::thread::sleep;
    use std::time::Duration;

    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    };

    use crate::app::App;
    use crate::controller::GameState;
    use crate::input::Key;
    use crate::tests::test_utils::quiet_config;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn playing_app() -> App {
        let mut app = App::new(quiet_config()).unwrap();
        app.game.start_play();
        app
    }

    #[test]
    fn test_app_starts_in_demo() {
        let app = App::new(quiet_config()).unwrap();

        assert!(!app.should_quit);
        assert!(app.game.is_attract_mode());
        assert_eq!(app.game.state(), GameState::Playing);
        assert_eq!(app.game.score(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new(quiet_config()).unwrap();
        app.handle_event(&press(KeyCode::Char('q')));
        assert!(app.should_quit);

        let mut app = App::new(quiet_config()).unwrap();
        app.handle_event(&press(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_confirm_key_leaves_demo() {
        let mut app = App::new(quiet_config()).unwrap();
        app.handle_event(&press(KeyCode::Char(' ')));
        app.on_tick();

        assert!(!app.game.is_attract_mode());
        assert_eq!(app.game.state(), GameState::Playing);
    }

    #[test]
    fn test_keys_expire_without_release_events() {
        let mut app = playing_app();
        app.handle_event(&press(KeyCode::Left));

        app.on_tick();
        assert_eq!(app.game.piece_position().x, 2);
        assert!(app.game.keyboard_mut().is_held(Key::Left));

        sleep(Duration::from_millis(100));
        app.on_tick();
        assert!(!app.game.keyboard_mut().is_held(Key::Left));

        let x = app.game.piece_position().x;
        app.on_tick();
        assert_eq!(app.game.piece_position().x, x);
    }

    #[test]
    fn test_release_events_end_holds() {
        let mut app = playing_app();
        app.set_release_events(true);

        app.handle_event(&press(KeyCode::Right));
        sleep(Duration::from_millis(100));
        app.on_tick();
        // Still held: the terminal reports releases, so nothing expires
        assert!(app.game.keyboard_mut().is_held(Key::Right));

        app.handle_event(&release(KeyCode::Right));
        assert!(!app.game.keyboard_mut().is_held(Key::Right));
    }

    #[test]
    fn test_focus_loss_releases_keys() {
        let mut app = playing_app();
        app.set_release_events(true);
        app.handle_event(&press(KeyCode::Left));
        app.handle_event(&press(KeyCode::Down));

        app.handle_event(&Event::FocusLost);

        assert!(!app.game.keyboard_mut().is_held(Key::Left));
        assert!(!app.game.keyboard_mut().is_held(Key::Down));
        let x = app.game.piece_position().x;
        app.on_tick();
        assert_eq!(app.game.piece_position().x, x);
    }

    #[test]
    fn test_short_click_reaches_confirm_button() {
        let mut app = App::new(quiet_config()).unwrap();
        app.game.touch_mut().set_area(0.0, 0.0, 240.0, 360.0);

        // Press and release between two ticks
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 201, 321));
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 201, 321));
        app.on_tick();

        assert!(!app.game.is_attract_mode());
        assert_eq!(app.game.state(), GameState::Playing);

        // The release was applied after the tick
        app.on_tick();
        assert!(!app.game.touch_mut().buttons()[4].is_pressed());
    }
}
