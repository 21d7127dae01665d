use serde::{Serialize, Serializer};

use super::{
    falling_block::FallingBlock,
    tetromino::{Color, Tetromino},
};

/// Number of columns of the playfield.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows of the playfield.
pub const BOARD_HEIGHT: usize = 20;

/// A single board cell: empty, or holding the color of a landed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // `null` for empty cells, the color name otherwise
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Filled(color) => serializer.serialize_some(color),
        }
    }
}

type BoardRow = [Cell; BOARD_WIDTH];

const EMPTY_ROW: BoardRow = [Cell::Empty; BOARD_WIDTH];

/// Result of [`Board::cleared_rows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowClear {
    pub board: Board,
    pub cleared: usize,
}

/// The fixed-size playfield holding landed blocks.
///
/// The grid is stored inline as `BOARD_HEIGHT` rows of `BOARD_WIDTH` cells, so the
/// dimensions are part of the type and can never change; only cell contents do.
/// Row 0 is the top of the board.
///
/// Operations that produce a new board (`merged`, `cleared_rows`) leave `self`
/// untouched.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Tetromino, TetrominoKind};
///
/// let board = Board::new();
/// let piece = Tetromino::new(TetrominoKind::O);
///
/// assert!(board.can_place(&piece, 0, 0));
/// assert!(!board.can_place(&piece, 9, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.rows.iter())
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    /// Creates a board with every cell empty.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the cell at column `x`, row `y`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Sets a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `(x, y)` is outside the grid.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Cell; BOARD_WIDTH]> {
        self.rows.iter()
    }

    fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.cell(x, y)
    }

    /// Tests whether `tetromino` fits with its matrix's top-left corner at `(x, y)`.
    ///
    /// Only occupied shape cells are checked: each must land inside the grid and
    /// on an empty cell. Empty shape cells may hang outside the board.
    #[must_use]
    pub fn can_place(&self, tetromino: &Tetromino, x: i32, y: i32) -> bool {
        tetromino.shape().occupied_cells().all(|(dx, dy)| {
            let (Ok(dx), Ok(dy)) = (i32::try_from(dx), i32::try_from(dy)) else {
                return false;
            };
            self.cell_at(x + dx, y + dy)
                .is_some_and(|cell| cell.is_empty())
        })
    }

    /// Returns a copy of the board with `block` written into it.
    ///
    /// Occupied cells falling outside the grid are skipped. Callers validate
    /// placement with [`Board::can_place`] first, so this never happens for a
    /// live block.
    #[must_use]
    pub fn merged(&self, block: &FallingBlock) -> Self {
        let mut board = self.clone();
        board.fill_block(block);
        board
    }

    fn fill_block(&mut self, block: &FallingBlock) {
        let cell = Cell::Filled(block.tetromino().color());
        for (x, y) in block.occupied_positions() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                && x < BOARD_WIDTH
                && y < BOARD_HEIGHT
            {
                self.rows[y][x] = cell;
            }
        }
    }

    /// Removes every full row and returns the compacted board with the count.
    ///
    /// Remaining rows keep their relative order and the same number of empty rows
    /// is inserted at the top, so the board stays `BOARD_HEIGHT` rows tall.
    #[must_use]
    pub fn cleared_rows(&self) -> RowClear {
        let mut board = Self::EMPTY;
        let mut dest = BOARD_HEIGHT;
        for row in self.rows.iter().rev() {
            if row.iter().all(|cell| cell.is_filled()) {
                continue;
            }
            dest -= 1;
            board.rows[dest] = *row;
        }
        RowClear { board, cleared: dest }
    }
}
