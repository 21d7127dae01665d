use blockfall_engine::Tetromino;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::{BlockDisplay, Tile};

/// Preview of a single tetromino, cropped to its occupied cells.
#[derive(Debug, Default)]
pub struct PieceDisplay<'a> {
    piece: Option<&'a Tetromino>,
    block: Option<BlockWidget<'a>>,
}

/// Occupied cells of a piece relative to their bounding box, with the box size.
fn cropped(piece: &Tetromino) -> (Vec<(usize, usize)>, (u16, u16)) {
    let cells: Vec<_> = piece.shape().occupied_cells().collect();
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
    let cells: Vec<_> = cells.into_iter().map(|(x, y)| (x - min_x, y - min_y)).collect();
    let width = cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0);
    let height = cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0);
    let size = (
        u16::try_from(width).unwrap_or(u16::MAX),
        u16::try_from(height).unwrap_or(u16::MAX),
    );
    (cells, size)
}

impl<'a> PieceDisplay<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn piece(self, piece: &'a Tetromino) -> Self {
        Self {
            piece: Some(piece),
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
        4 * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        2 * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let Some(piece) = self.piece else {
            return;
        };
        let (cells, (width, height)) = cropped(piece);
        let piece_area = area.centered(
            Constraint::Length(width * BlockDisplay::width()),
            Constraint::Length(height * BlockDisplay::height()),
        );

        let col_constraints = (0..width).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints = (0..height).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);
        let grid_rows = piece_area
            .layout_vec(&vertical)
            .into_iter()
            .map(|row| row.layout_vec(&horizontal));

        let empty = BlockDisplay::from_tile(Tile::Empty, false);
        let occupied = BlockDisplay::from_tile(Tile::Block(piece.color()), false);
        for (y, grid_row) in grid_rows.enumerate() {
            for (x, grid_cell) in grid_row.into_iter().enumerate() {
                if cells.contains(&(x, y)) {
                    Widget::render(&occupied, grid_cell, buf);
                } else {
                    Widget::render(&empty, grid_cell, buf);
                }
            }
        }
    }
}
