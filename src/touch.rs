//! On-screen buttons driven by a mouse pointer or touch points.

use std::time::{Duration, Instant};

use log::debug;

use crate::input::{InputEvent, InputSource};

/// What a button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Event(InputEvent),
    Confirm,
}

/// A circular hit region.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub action: ButtonAction,
    pressed: bool,
    pressed_long: bool,
}

impl Button {
    #[must_use]
    pub fn new(x: f32, y: f32, radius: f32, action: ButtonAction) -> Self {
        Self {
            x,
            y,
            radius,
            action,
            pressed: false,
            pressed_long: false,
        }
    }

    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let (dx, dy) = (x - self.x, y - self.y);
        dx.hypot(dy) <= self.radius
    }

    /// A press held on two consecutive updates becomes a long press.
    pub fn update(&mut self, x: f32, y: f32, is_down: bool) {
        if is_down && self.contains(x, y) {
            self.pressed_long = self.pressed;
            self.pressed = true;
        } else {
            self.pressed = false;
            self.pressed_long = false;
        }
    }

    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    #[must_use]
    pub fn is_long_pressed(&self) -> bool {
        self.pressed_long
    }
}

/// Positions the five buttons inside the rectangle `(x, y, width, height)`:
/// a diamond of small buttons at the bottom left and a large confirm button
/// in the bottom right corner.
#[must_use]
pub fn layout_buttons(x: f32, y: f32, width: f32, height: f32) -> Vec<Button> {
    let small = width * 0.08;
    let margin = width * 0.04;

    let base_y = y + height - margin * 2.0 - small * 2.0;
    let left_x = x + margin + small;
    let right_x = left_x + margin * 2.0 + small * 2.0;
    let mid_x = left_x + small * 1.5;

    let large = small * 1.5;

    vec![
        Button::new(left_x, base_y, small, ButtonAction::Event(InputEvent::MoveLeft)),
        Button::new(mid_x, base_y - small * 1.5, small, ButtonAction::Event(InputEvent::Rotate)),
        Button::new(right_x, base_y, small, ButtonAction::Event(InputEvent::MoveRight)),
        Button::new(mid_x, base_y + small * 1.5, small, ButtonAction::Event(InputEvent::SoftDrop)),
        Button::new(
            x + width - margin - large,
            y + height - margin - large,
            large,
            ButtonAction::Confirm,
        ),
    ]
}

/// Pointer/touch source.
///
/// The first active touch point wins over the mouse pointer. Accepted presses
/// are spaced by at least `cooldown`; the timestamp lives with the confirm
/// button so a directional press also holds off confirm and vice versa.
#[derive(Debug, Clone)]
pub struct TouchInput {
    buttons: Vec<Button>,
    area: Option<(f32, f32, f32, f32)>,
    pointer: (f32, f32),
    pointer_down: bool,
    touches: Vec<(f32, f32)>,
    cooldown: Duration,
    confirm_last_fired: Option<Instant>,
    confirm_fired: bool,
}

impl TouchInput {
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            buttons: Vec::new(),
            area: None,
            pointer: (0.0, 0.0),
            pointer_down: false,
            touches: Vec::new(),
            cooldown,
            confirm_last_fired: None,
            confirm_fired: false,
        }
    }

    /// Lays out the buttons for a screen area. Press state survives calls
    /// with an unchanged area.
    pub fn set_area(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let area = (x, y, width, height);
        if self.area != Some(area) {
            self.area = Some(area);
            self.buttons = layout_buttons(x, y, width, height);
        }
    }

    #[must_use]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn set_pointer(&mut self, x: f32, y: f32, is_down: bool) {
        self.pointer = (x, y);
        self.pointer_down = is_down;
    }

    pub fn set_touches(&mut self, touches: &[(f32, f32)]) {
        self.touches.clear();
        self.touches.extend_from_slice(touches);
    }

    /// Polls with an explicit clock reading.
    pub fn poll_at(&mut self, now: Instant) -> Option<InputEvent> {
        self.confirm_fired = false;

        let ((x, y), is_down) = match self.touches.first() {
            Some(&touch) => (touch, true),
            None => (self.pointer, self.pointer_down),
        };

        for button in &mut self.buttons {
            button.update(x, y, is_down);
        }

        // Directional buttons first, in layout order; confirm last.
        let button = self
            .buttons
            .iter()
            .filter(|b| b.is_pressed())
            .min_by_key(|b| b.action == ButtonAction::Confirm)?;
        let (action, long) = (button.action, button.is_long_pressed());

        // Holding confirm does not repeat it.
        if action == ButtonAction::Confirm && long {
            return None;
        }

        if self
            .confirm_last_fired
            .is_some_and(|last| now.duration_since(last) < self.cooldown)
        {
            return None;
        }
        self.confirm_last_fired = Some(now);

        match action {
            ButtonAction::Event(event) => {
                debug!("Touch button fired {event:?}");
                Some(event)
            }
            ButtonAction::Confirm => {
                debug!("Touch confirm fired");
                self.confirm_fired = true;
                None
            }
        }
    }
}

impl InputSource for TouchInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.poll_at(Instant::now())
    }

    /// True when the last poll fired the confirm button.
    fn is_confirm_pressed(&mut self) -> bool {
        self.confirm_fired
    }
}
