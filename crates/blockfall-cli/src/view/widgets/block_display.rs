use blockfall_engine::{Cell as BoardCell, Color};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// What a single board square shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty,
    /// Landing spot of the active block.
    Ghost,
    Block(Color),
}

impl From<BoardCell> for Tile {
    fn from(cell: BoardCell) -> Self {
        match cell {
            BoardCell::Empty => Self::Empty,
            BoardCell::Filled(color) => Self::Block(color),
        }
    }
}

/// One board square, two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub const fn from_tile(tile: Tile, show_dots: bool) -> Self {
        match tile {
            Tile::Empty if show_dots => Self::new(style::EMPTY_DOT, "."),
            Tile::Empty => Self::new(style::EMPTY, ""),
            Tile::Ghost => Self::new(style::GHOST, "[]"),
            Tile::Block(color) => Self::new(style::block(color), ""),
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not just the symbol cells
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
