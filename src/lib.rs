pub mod app;
pub mod attract;
pub mod components;
pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod input;
pub mod touch;
pub mod ui;

#[cfg(test)]
mod tests;

use std::time::{Duration, Instant};

pub use controller::{Game, GameState, GameView};
pub use error::SetupError;

// Longest backlog worked off in one go after a stall
const MAX_CATCH_UP_STEPS: u32 = 5;

/// Fixed-step clock. Accumulates wall-clock time and hands out whole steps.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    accumulated: Duration,
    last_update: Instant,
}

impl FixedStep {
    #[must_use]
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            accumulated: Duration::default(),
            last_update: Instant::now(),
        }
    }

    #[must_use]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Number of steps due since the previous call.
    pub fn update(&mut self) -> u32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_update);
        self.last_update = now;
        self.advance(delta)
    }

    /// Adds `delta` to the clock and returns how many steps it completed.
    /// A long stall is capped so the game does not fast-forward.
    pub fn advance(&mut self, delta: Duration) -> u32 {
        if self.step.is_zero() {
            return 0;
        }

        self.accumulated += delta;
        let mut steps = 0;
        while self.accumulated >= self.step {
            self.accumulated -= self.step;
            steps += 1;
            if steps == MAX_CATCH_UP_STEPS {
                self.accumulated = Duration::default();
                break;
            }
        }
        steps
    }

    /// Time left until the next step is due.
    #[must_use]
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulated + self.last_update.elapsed())
    }
}
