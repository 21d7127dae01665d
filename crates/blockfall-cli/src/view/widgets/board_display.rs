use std::iter;

use blockfall_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board, FallingBlock};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use super::{BlockDisplay, Tile};

type TileGrid = [[Tile; BOARD_WIDTH]; BOARD_HEIGHT];

/// The playfield with the active block and, optionally, its landing spot.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<&'a FallingBlock>,
    falling_block: Option<&'a FallingBlock>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            falling_block: None,
            block: None,
        }
    }

    pub fn ghost(self, ghost: &'a FallingBlock) -> Self {
        Self {
            ghost: Some(ghost),
            ..self
        }
    }

    pub fn falling_block(self, falling_block: &'a FallingBlock) -> Self {
        Self {
            falling_block: Some(falling_block),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        10 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        20 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    fn tiles(&self) -> TileGrid {
        let mut tiles = [[Tile::Empty; BOARD_WIDTH]; BOARD_HEIGHT];
        for (tile_row, row) in iter::zip(&mut tiles, self.board.rows()) {
            for (tile, cell) in iter::zip(tile_row, row) {
                *tile = Tile::from(*cell);
            }
        }
        if let Some(ghost) = self.ghost {
            paint(&mut tiles, ghost, Tile::Ghost);
        }
        if let Some(falling) = self.falling_block {
            paint(&mut tiles, falling, Tile::Block(falling.tetromino().color()));
        }
        tiles
    }
}

fn paint(tiles: &mut TileGrid, block: &FallingBlock, tile: Tile) {
    for (x, y) in block.occupied_positions() {
        if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
            && let Some(slot) = tiles.get_mut(y).and_then(|row| row.get_mut(x))
        {
            *slot = tile;
        }
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..BOARD_WIDTH).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..BOARD_HEIGHT).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let grid_cells = area
            .layout::<BOARD_HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_WIDTH>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.tiles()) {
            for (grid_cell, tile) in iter::zip(grid_row, row) {
                BlockDisplay::from_tile(tile, true).render(grid_cell, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{Cell, Color, Tetromino, TetrominoKind};

    use super::*;

    #[test]
    fn test_falling_block_drawn_over_ghost() {
        let mut board = Board::new();
        board.set_cell(0, 19, Cell::Filled(Color::Red));
        let falling = FallingBlock::spawn(Tetromino::new(TetrominoKind::O));
        let ghost = falling.dropped(&board);
        let display = BoardDisplay::new(&board)
            .ghost(&ghost)
            .falling_block(&falling);

        let tiles = display.tiles();
        assert_eq!(tiles[19][0], Tile::Block(Color::Red));
        assert_eq!(tiles[0][4], Tile::Block(Color::Yellow));
        assert_eq!(tiles[18][5], Tile::Ghost);
        assert_eq!(tiles[10][5], Tile::Empty);
    }

    #[test]
    fn test_size_includes_border() {
        let board = Board::new();
        let display = BoardDisplay::new(&board).block(BlockWidget::bordered());
        assert_eq!(display.width(), 22);
        assert_eq!(display.height(), 22);
    }
}
