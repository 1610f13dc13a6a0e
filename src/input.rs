//! Input sources feeding the game controller.
//!
//! Every source exposes the same two questions: "what happened since the last
//! poll?" and "was confirm pressed?". The controller never sees keys, mouse
//! coordinates or channels.

use std::collections::HashSet;

use crossterm::event::KeyCode;

/// A discrete gameplay command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

pub trait InputSource {
    /// At most one event per call.
    fn poll_event(&mut self) -> Option<InputEvent>;

    fn is_confirm_pressed(&mut self) -> bool;

    /// Called once at the end of every tick.
    fn end_tick(&mut self) {}
}

/// Physical keys the keyboard source understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Down,
    Up,
    Confirm,
}

/// Maps a terminal key code onto a game key. Arrows and WASD both work.
#[must_use]
pub fn key_from_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Key::Right),
        KeyCode::Down | KeyCode::Char('s') => Some(Key::Down),
        KeyCode::Up | KeyCode::Char('w') => Some(Key::Up),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Key::Confirm),
        _ => None,
    }
}

// Polled in this order; the first match wins.
const POLL_ORDER: [Key; 4] = [Key::Down, Key::Left, Key::Right, Key::Up];

/// Keyboard source.
///
/// Movement keys repeat for as long as they are held. Rotate (`Up`) and
/// `Confirm` only fire on the tick the key went down.
#[derive(Debug, Default, Clone)]
pub struct KeyboardInput {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
}

impl KeyboardInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }
}

impl InputSource for KeyboardInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        POLL_ORDER.iter().find_map(|&key| match key {
            Key::Up if self.is_just_pressed(key) => Some(InputEvent::Rotate),
            Key::Down if self.is_held(key) => Some(InputEvent::SoftDrop),
            Key::Left if self.is_held(key) => Some(InputEvent::MoveLeft),
            Key::Right if self.is_held(key) => Some(InputEvent::MoveRight),
            _ => None,
        })
    }

    fn is_confirm_pressed(&mut self) -> bool {
        self.is_just_pressed(Key::Confirm)
    }

    fn end_tick(&mut self) {
        self.just_pressed.clear();
    }
}
