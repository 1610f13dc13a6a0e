#![warn(clippy::all, clippy::pedantic)]

use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use log::debug;

use crate::config::GameConfig;
use crate::controller::Game;
use crate::input::{Key, key_from_code};

// Without release events a key counts as held until it stops repeating.
const KEY_HOLD_WINDOW: Duration = Duration::from_millis(80);

pub struct App {
    pub game: Game,
    pub should_quit: bool,
    release_events: bool,
    key_seen: HashMap<Key, Instant>,
    pointer_seen_by_tick: bool,
    pointer_release_pending: Option<(f32, f32)>,
}

impl App {
    /// Creates the app and starts the attract-mode demo.
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut game = Game::new(config)?;
        game.start();

        Ok(Self {
            game,
            should_quit: false,
            release_events: false,
            key_seen: HashMap::new(),
            pointer_seen_by_tick: true,
            pointer_release_pending: None,
        })
    }

    /// Tells the app whether the terminal reports key releases.
    pub fn set_release_events(&mut self, enabled: bool) {
        self.release_events = enabled;
    }

    pub fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => {
                let (x, y) = (f32::from(mouse.column), f32::from(mouse.row));
                let touch = self.game.touch_mut();
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left)
                    | MouseEventKind::Drag(MouseButton::Left) => {
                        touch.set_pointer(x, y, true);
                        self.pointer_seen_by_tick = false;
                        self.pointer_release_pending = None;
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        // A click shorter than a tick still has to be seen.
                        if self.pointer_seen_by_tick {
                            touch.set_pointer(x, y, false);
                        } else {
                            self.pointer_release_pending = Some((x, y));
                        }
                    }
                    MouseEventKind::Moved => touch.set_pointer(x, y, false),
                    _ => {}
                }
            }
            // Releases that happen elsewhere are never reported back.
            Event::FocusLost => {
                self.game.keyboard_mut().release_all();
                self.key_seen.clear();
                debug!("Focus lost, released all keys");
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Press
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        {
            self.should_quit = true;
            return;
        }

        let Some(game_key) = key_from_code(key.code) else {
            return;
        };
        let keyboard = self.game.keyboard_mut();

        match key.kind {
            KeyEventKind::Release => {
                self.release_events = true;
                keyboard.key_up(game_key);
            }
            KeyEventKind::Press | KeyEventKind::Repeat => {
                keyboard.key_down(game_key);
                self.key_seen.insert(game_key, Instant::now());
            }
        }
        debug!("Key event: {key:?}");
    }

    /// Advances the game by one fixed step.
    pub fn on_tick(&mut self) {
        self.game.tick();

        self.pointer_seen_by_tick = true;
        if let Some((x, y)) = self.pointer_release_pending.take() {
            self.game.touch_mut().set_pointer(x, y, false);
        }

        if !self.release_events {
            self.expire_keys(Instant::now());
        }
    }

    fn expire_keys(&mut self, now: Instant) {
        let keyboard = self.game.keyboard_mut();
        self.key_seen.retain(|&key, &mut seen| {
            let alive = now.duration_since(seen) < KEY_HOLD_WINDOW;
            if !alive {
                keyboard.key_up(key);
            }
            alive
        });
    }
}
