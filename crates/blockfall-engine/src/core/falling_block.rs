use serde::Serialize;

use super::{
    board::{BOARD_WIDTH, Board},
    tetromino::Tetromino,
};

/// The piece currently under player control.
///
/// `x`/`y` locate the top-left corner of the tetromino's shape matrix on the
/// board. Like [`Tetromino`], a block is a value: moving or rotating returns a
/// new block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FallingBlock {
    #[serde(flatten)]
    tetromino: Tetromino,
    x: i32,
    y: i32,
}

impl FallingBlock {
    #[must_use]
    pub fn new(tetromino: Tetromino, x: i32, y: i32) -> Self {
        Self { tetromino, x, y }
    }

    /// Places `tetromino` horizontally centered on the top row.
    #[must_use]
    pub fn spawn(tetromino: Tetromino) -> Self {
        let width = tetromino.shape().width();
        let x = i32::try_from(BOARD_WIDTH.saturating_sub(width) / 2).unwrap_or(0);
        Self::new(tetromino, x, 0)
    }

    #[must_use]
    pub fn tetromino(&self) -> &Tetromino {
        &self.tetromino
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Absolute board coordinates of the occupied shape cells.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.tetromino
            .shape()
            .occupied_cells()
            .filter_map(move |(dx, dy)| {
                let dx = i32::try_from(dx).ok()?;
                let dy = i32::try_from(dy).ok()?;
                Some((self.x + dx, self.y + dy))
            })
    }

    #[must_use]
    pub fn fits(&self, board: &Board) -> bool {
        board.can_place(&self.tetromino, self.x, self.y)
    }

    #[must_use]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.tetromino.clone(), self.x + dx, self.y + dy)
    }

    /// Rotates the shape clockwise in place; the offset is not adjusted.
    #[must_use]
    pub fn rotated(&self) -> Self {
        Self::new(self.tetromino.rotated(), self.x, self.y)
    }

    /// Returns the lowest position reachable by moving straight down.
    ///
    /// Starting from the current row, the block advances while the next row
    /// still fits.
    #[must_use]
    pub fn dropped(&self, board: &Board) -> Self {
        let mut y = self.y;
        while board.can_place(&self.tetromino, self.x, y + 1) {
            y += 1;
        }
        Self::new(self.tetromino.clone(), self.x, y)
    }
}
