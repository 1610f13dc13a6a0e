#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use once_cell::sync::Lazy;

use crate::error::SetupError;

/// Identifies which of the seven catalog shapes a block came from.
///
/// Gameplay never looks at the kind; it only exists so renderers can color
/// locked cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl ShapeKind {
    pub const ALL: [Self; 7] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
    ];

    /// The square never changes under rotation.
    #[must_use]
    pub fn is_rotation_invariant(self) -> bool {
        self == ShapeKind::D
    }
}

/// Board offset of a piece's top-left cell. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A block matrix. Rows are indexed first, `blocks[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    blocks: Vec<Vec<bool>>,
}

impl Piece {
    fn from_template(kind: ShapeKind, template: &[[u8; 4]; 2]) -> Self {
        let blocks = template
            .iter()
            .map(|row| row.iter().map(|&v| v == 1).collect())
            .collect();
        Self { kind, blocks }
    }

    /// Fresh owned copy of the catalog template for `kind`.
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        CATALOG[kind as usize].clone()
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn blocks(&self) -> &[Vec<bool>] {
        &self.blocks
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.blocks.len()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.blocks.first().map_or(0, Vec::len)
    }

    /// Offsets `(dx, dy)` of every filled cell relative to the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.blocks.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, filled)| *filled)
                .map(move |(dx, _)| (dx as i32, dy as i32))
        })
    }

    /// Returns the piece turned 90 degrees clockwise.
    ///
    /// Column `j` of the source, read from the bottom row up, becomes row `j`
    /// of the result.
    #[must_use]
    pub fn rotate(&self) -> Piece {
        if self.kind.is_rotation_invariant() {
            return self.clone();
        }

        let blocks = (0..self.width())
            .map(|col| self.blocks.iter().rev().map(|row| row[col]).collect())
            .collect();

        Piece {
            kind: self.kind,
            blocks,
        }
    }
}

// Read-only templates; every spawn clones out of here.
static TEMPLATES: [(ShapeKind, [[u8; 4]; 2]); 7] = [
    (ShapeKind::A, [[1, 1, 1, 1], [0, 0, 0, 0]]),
    (ShapeKind::B, [[1, 0, 0, 0], [1, 1, 1, 1]]),
    (ShapeKind::C, [[0, 0, 0, 1], [1, 1, 1, 1]]),
    (ShapeKind::D, [[1, 1, 0, 0], [1, 1, 0, 0]]),
    (ShapeKind::E, [[0, 1, 1, 0], [1, 1, 0, 0]]),
    (ShapeKind::F, [[0, 1, 0, 0], [1, 1, 1, 0]]),
    (ShapeKind::G, [[1, 1, 0, 0], [0, 1, 1, 0]]),
];

/// The seven shapes, in `ShapeKind` order.
pub static CATALOG: Lazy<Vec<Piece>> = Lazy::new(|| {
    TEMPLATES
        .iter()
        .map(|(kind, template)| Piece::from_template(*kind, template))
        .collect()
});

/// Contents of one board cell: empty, or the kind of the piece that filled it.
pub type Cell = Option<ShapeKind>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// `cells[row][col]`, row 0 is the top.
    cells: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Self, SetupError> {
        if width == 0 || height == 0 {
            return Err(SetupError::EmptyBoard { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![vec![None; width]; height],
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(None);
        }
    }

    /// `None` when `(row, col)` is off the board.
    #[must_use]
    pub fn cell_at(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Overwrites one cell. Returns `false` if `(row, col)` is off the board.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        matches!(self.cell_at(row, col), Some(Some(_)))
    }

    /// Board index for a signed coordinate, if it lies on the board.
    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (col, row) = (x as usize, y as usize);
        (col < self.width && row < self.height).then_some((row, col))
    }

    /// True if any filled cell of `piece` at `position` is off the board or
    /// lands on an occupied cell.
    #[must_use]
    pub fn would_collide(&self, piece: &Piece, position: Position) -> bool {
        piece.cells().any(|(dx, dy)| {
            match self.index(position.x + dx, position.y + dy) {
                Some((row, col)) => self.cells[row][col].is_some(),
                None => true,
            }
        })
    }

    /// Writes every filled cell of `piece` into the grid.
    pub fn commit(&mut self, piece: &Piece, position: Position) {
        for (dx, dy) in piece.cells() {
            if let Some((row, col)) = self.index(position.x + dx, position.y + dy) {
                self.cells[row][col] = Some(piece.kind());
            }
        }
    }

    /// Removes every full row at once and returns how many were removed.
    pub fn clear_full_lines(&mut self) -> usize {
        let before = self.cells.len();
        self.cells.retain(|row| row.iter().any(Option::is_none));
        let cleared = before - self.cells.len();

        if cleared > 0 {
            let width = self.width;
            self.cells
                .splice(0..0, std::iter::repeat_with(|| vec![None; width]).take(cleared));
        }

        cleared
    }
}
