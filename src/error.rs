use thiserror::Error;

/// Reasons a game cannot be set up from the given configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },
    #[error("board may be at most {max_width}x{max_height}, got {width}x{height}")]
    BoardTooLarge {
        width: usize,
        height: usize,
        max_width: usize,
        max_height: usize,
    },
    #[error("drop interval must be at least one tick")]
    ZeroDropInterval,
    #[error("tick rate must be at least one step per second")]
    ZeroTickRate,
    #[error("attract input interval must be non-zero")]
    ZeroAttractInterval,
    #[error("shape catalog is empty")]
    EmptyCatalog,
}
