#![warn(clippy::all, clippy::pedantic)]

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 24;
pub const MAX_BOARD_WIDTH: usize = 64;
pub const MAX_BOARD_HEIGHT: usize = 64;

// Game timing
pub const TICKS_PER_SECOND: u32 = 18;
pub const DROP_TICKS: u32 = 4; // Gravity pulls the piece down once every DROP_TICKS + 1 ticks
pub const ATTRACT_INTERVAL_MS: u64 = 50; // Cadence of the demo input ticker
pub const TOUCH_COOLDOWN_MS: u64 = 100; // Minimum gap between two accepted button presses

// Line clear scoring
pub const POINTS_PER_LINE: u32 = 100;
pub const MULTI_LINE_BONUS_START: u32 = POINTS_PER_LINE / 2; // Doubles after every cleared line

/// Points awarded for clearing `lines` rows with a single lock.
///
/// Linear 100 per line, plus an escalating bonus when more than one line
/// goes at once: 50 for the first line, doubled for each line after it.
#[must_use]
pub fn line_clear_points(lines: u32) -> u32 {
    let mut points = lines.saturating_mul(POINTS_PER_LINE);

    if lines > 1 {
        let mut bonus = MULTI_LINE_BONUS_START;
        for _ in 0..lines {
            points = points.saturating_add(bonus);
            bonus = bonus.saturating_mul(2);
        }
    }

    points
}
