pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::attract::AttractConfirmPolicy;
use crate::error::SetupError;
use crate::game;

/// Everything the controller and the host loop need at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub timing: TimingConfig,
    pub attract: AttractConfig,
    pub touch: TouchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: game::BOARD_WIDTH,
            height: game::BOARD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub ticks_per_second: u32,
    pub drop_ticks: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: game::TICKS_PER_SECOND,
            drop_ticks: game::DROP_TICKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttractConfig {
    pub interval_ms: u64,
    pub confirm_policy: AttractConfirmPolicy,
}

impl Default for AttractConfig {
    fn default() -> Self {
        Self {
            interval_ms: game::ATTRACT_INTERVAL_MS,
            confirm_policy: AttractConfirmPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchConfig {
    pub cooldown_ms: u64,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: game::TOUCH_COOLDOWN_MS,
        }
    }
}

impl GameConfig {
    /// Checks the preconditions the game relies on.
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.board.width == 0 || self.board.height == 0 {
            return Err(SetupError::EmptyBoard {
                width: self.board.width,
                height: self.board.height,
            });
        }
        if self.board.width > game::MAX_BOARD_WIDTH || self.board.height > game::MAX_BOARD_HEIGHT {
            return Err(SetupError::BoardTooLarge {
                width: self.board.width,
                height: self.board.height,
                max_width: game::MAX_BOARD_WIDTH,
                max_height: game::MAX_BOARD_HEIGHT,
            });
        }
        if self.timing.drop_ticks == 0 {
            return Err(SetupError::ZeroDropInterval);
        }
        if self.timing.ticks_per_second == 0 {
            return Err(SetupError::ZeroTickRate);
        }
        if self.attract.interval_ms == 0 {
            return Err(SetupError::ZeroAttractInterval);
        }
        Ok(())
    }

    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.timing.ticks_per_second.max(1)
    }

    #[must_use]
    pub fn attract_interval(&self) -> Duration {
        Duration::from_millis(self.attract.interval_ms)
    }

    #[must_use]
    pub fn touch_cooldown(&self) -> Duration {
        Duration::from_millis(self.touch.cooldown_ms)
    }
}
