//! The game state machine: board, active piece, next piece and score,
//! advanced one fixed tick at a time.

#![allow(
    // Board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use log::{debug, info};

use crate::attract::AttractInput;
use crate::components::{Board, CATALOG, Piece, Position, ShapeKind};
use crate::config::GameConfig;
use crate::error::SetupError;
use crate::game::line_clear_points;
use crate::input::{InputEvent, InputSource, KeyboardInput};
use crate::touch::TouchInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    GameOver,
    Playing,
}

/// Read-only state handed to renderers after each update.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub board: &'a Board,
    pub piece: Option<(&'a Piece, Position)>,
    pub next: Option<&'a Piece>,
    pub score: u32,
    pub state: GameState,
    pub attract_mode: bool,
}

impl GameView<'_> {
    /// Every filled cell on screen: locked board cells, then the active
    /// piece's cells, as `(position, kind)`.
    #[must_use]
    pub fn blocks(&self) -> Vec<(Position, ShapeKind)> {
        let mut blocks: Vec<_> = self
            .board
            .rows()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter().enumerate().filter_map(move |(x, cell)| {
                    cell.map(|kind| (Position::new(x as i32, y as i32), kind))
                })
            })
            .collect();

        if let Some((piece, position)) = self.piece {
            blocks.extend(
                piece
                    .cells()
                    .map(|(dx, dy)| (position.offset(dx, dy), piece.kind())),
            );
        }

        blocks
    }
}

pub struct Game {
    config: GameConfig,
    board: Board,
    current: Option<Piece>,
    next: Option<Piece>,
    position: Position,
    score: u32,
    state: GameState,
    attract_mode: bool,
    elapsed_drop: u32,
    rng: fastrand::Rng,
    keyboard: KeyboardInput,
    touch: TouchInput,
    attract: Option<AttractInput>,
}

impl Game {
    /// Allocates an empty game. Nothing is spawned until [`Game::start`] or
    /// [`Game::start_play`].
    pub fn new(config: GameConfig) -> Result<Self, SetupError> {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// Same as [`Game::new`] with a reproducible piece sequence.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, SetupError> {
        Self::with_rng(config, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(config: GameConfig, rng: fastrand::Rng) -> Result<Self, SetupError> {
        config.validate()?;
        if CATALOG.is_empty() {
            return Err(SetupError::EmptyCatalog);
        }

        let board = Board::new(config.board.width, config.board.height)?;
        let touch = TouchInput::new(config.touch_cooldown());

        Ok(Self {
            config,
            board,
            current: None,
            next: None,
            position: Position::default(),
            score: 0,
            state: GameState::GameOver,
            attract_mode: false,
            elapsed_drop: 0,
            rng,
            keyboard: KeyboardInput::new(),
            touch,
            attract: None,
        })
    }

    /// Starts an unattended demo game driven by random input.
    pub fn start(&mut self) {
        if self.attract.is_none() {
            self.attract = Some(AttractInput::spawn(
                self.config.attract_interval(),
                self.config.attract.confirm_policy,
            ));
        }
        self.reset(true);
        info!("Attract mode started");
    }

    /// Starts a game controlled by the player.
    pub fn start_play(&mut self) {
        // Dropping the source stops its ticker thread.
        self.attract = None;
        self.reset(false);
        info!("Game started");
    }

    /// Like [`Game::start`] but with a caller-provided demo source.
    pub fn start_with_attract(&mut self, attract: AttractInput) {
        self.attract = Some(attract);
        self.reset(true);
        info!("Attract mode started");
    }

    fn reset(&mut self, attract_mode: bool) {
        self.score = 0;
        self.board.clear();
        self.state = GameState::Playing;
        self.attract_mode = attract_mode;
        self.elapsed_drop = 0;

        self.next = Some(self.random_piece());
        if !self.fetch_next_piece() {
            self.state = GameState::GameOver;
            info!("First piece does not fit, game over");
        }
    }

    fn random_piece(&mut self) -> Piece {
        CATALOG[self.rng.usize(..CATALOG.len())].clone()
    }

    /// Promotes the next piece to current at the spawn position and draws a
    /// fresh next piece. Returns `false` if the new piece does not fit.
    fn fetch_next_piece(&mut self) -> bool {
        let piece = match self.next.take() {
            Some(piece) => piece,
            None => self.random_piece(),
        };
        self.next = Some(self.random_piece());

        let width = self.board.width() as i32;
        self.position = Position::new((width - piece.width() as i32) / 2, 0);
        let fits = !self.board.would_collide(&piece, self.position);
        self.current = Some(piece);
        fits
    }

    /// Advances the game by one fixed step.
    pub fn tick(&mut self) {
        self.elapsed_drop = self.elapsed_drop.saturating_add(1);

        if self.state == GameState::Playing {
            // Gravity overrides any input this tick.
            if self.elapsed_drop > self.config.timing.drop_ticks {
                self.apply_event(InputEvent::SoftDrop);
                self.elapsed_drop = 0;
                self.end_tick();
                return;
            }

            if let Some(event) = self.active_source().poll_event() {
                self.apply_event(event);
            }
        }

        if let Some(event) = self.touch.poll_event() {
            self.apply_event(event);
        }
        let touch_confirm = self.touch.is_confirm_pressed();

        if self.attract_mode && (self.keyboard.is_confirm_pressed() || touch_confirm) {
            self.start_play();
        } else if self.state == GameState::GameOver
            && (touch_confirm || self.active_source().is_confirm_pressed())
        {
            if self.attract_mode {
                self.start();
            } else {
                self.start_play();
            }
        }

        self.end_tick();
    }

    fn end_tick(&mut self) {
        self.keyboard.end_tick();
        self.touch.end_tick();
        if let Some(attract) = self.attract.as_mut() {
            attract.end_tick();
        }
    }

    fn active_source(&mut self) -> &mut dyn InputSource {
        match self.attract.as_mut() {
            Some(attract) if self.attract_mode => attract as &mut dyn InputSource,
            _ => &mut self.keyboard,
        }
    }

    /// Applies one command to the active piece. Ignored unless playing.
    pub fn apply_event(&mut self, event: InputEvent) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(piece) = self.current.as_ref() else {
            return;
        };

        match event {
            InputEvent::SoftDrop => {
                let below = self.position.offset(0, 1);
                if self.board.would_collide(piece, below) {
                    self.lock_piece();
                } else {
                    self.position = below;
                }
            }
            InputEvent::MoveLeft | InputEvent::MoveRight => {
                let dx = if event == InputEvent::MoveLeft { -1 } else { 1 };
                let target = self.position.offset(dx, 0);
                if !self.board.would_collide(piece, target) {
                    self.position = target;
                }
            }
            InputEvent::Rotate => {
                let rotated = piece.rotate();
                if !self.board.would_collide(&rotated, self.position) {
                    self.current = Some(rotated);
                }
            }
        }
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        self.board.commit(&piece, self.position);
        let lines = self.board.clear_full_lines();
        self.add_score(u32::try_from(lines).unwrap_or(u32::MAX));
        debug!(
            "Locked {:?} at ({}, {}), cleared {lines} line(s)",
            piece.kind(),
            self.position.x,
            self.position.y
        );

        if !self.fetch_next_piece() {
            self.state = GameState::GameOver;
            info!("Game over with score {}", self.score);
        }
    }

    /// Adds the points for `lines` simultaneously cleared rows.
    pub fn add_score(&mut self, lines: u32) {
        self.score = self.score.saturating_add(line_clear_points(lines));
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn is_attract_mode(&self) -> bool {
        self.attract_mode
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for hosts that seed a position, e.g. puzzles.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    #[must_use]
    pub fn piece_position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn keyboard_mut(&mut self) -> &mut KeyboardInput {
        &mut self.keyboard
    }

    pub fn touch_mut(&mut self) -> &mut TouchInput {
        &mut self.touch
    }

    #[must_use]
    pub fn touch(&self) -> &TouchInput {
        &self.touch
    }

    #[cfg(test)]
    pub(crate) fn attract_input(&self) -> Option<&AttractInput> {
        self.attract.as_ref()
    }

    #[must_use]
    pub fn view(&self) -> GameView<'_> {
        GameView {
            board: &self.board,
            piece: self.current.as_ref().map(|piece| (piece, self.position)),
            next: self.next.as_ref(),
            score: self.score,
            state: self.state,
            attract_mode: self.attract_mode,
        }
    }
}
