use blockfall_engine::GameState;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, PieceDisplay, StatsDisplay, style};

/// Full game screen: stats left of the board, next piece preview right of it.
///
/// A banner over the board shows when the game is paused or over.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    state: &'a GameState,
    paused: bool,
}

impl<'a> GameDisplay<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            paused: false,
        }
    }

    pub fn paused(self, paused: bool) -> Self {
        Self { paused, ..self }
    }

    fn banner(&self) -> Option<(&'static str, ratatui::style::Style)> {
        if self.state.is_game_over() {
            Some(("GAME OVER", style::GAME_OVER))
        } else if self.paused {
            Some(("PAUSED", style::PAUSED))
        } else {
            None
        }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let border = style::border(self.paused, state.is_game_over());
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(border)
                .style(style::DEFAULT)
        };

        let ghost = state.drop_position();
        let board = {
            let widget = BoardDisplay::new(state.board())
                .falling_block(state.current())
                .block(Block::bordered().border_style(border).style(style::DEFAULT));
            if state.is_game_over() {
                widget
            } else {
                widget.ghost(&ghost)
            }
        };
        let stats = StatsDisplay::new(state).block(panel("STATS"));
        let next = PieceDisplay::new().piece(state.next()).block(panel("NEXT"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
            Constraint::Length(next.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] =
            Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next.height())]).areas(right_column);

        let board_width = board.width();
        stats.render(stats_area, buf);
        board.render(board_area, buf);
        next.render(next_area, buf);

        if let Some((text, style)) = self.banner() {
            let block = Block::new().style(style);
            let text = Text::styled(text, style).centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::PieceSeed;

    use super::*;

    #[test]
    fn test_banner_prefers_game_over() {
        let state = GameState::with_seed(PieceSeed::from(5_u128));
        assert_eq!(GameDisplay::new(&state).banner(), None);
        assert_eq!(
            GameDisplay::new(&state).paused(true).banner().map(|(text, _)| text),
            Some("PAUSED")
        );

        let mut over = state;
        while !over.is_game_over() {
            over = over.update(blockfall_engine::Action::Drop);
        }
        assert_eq!(
            GameDisplay::new(&over).paused(true).banner().map(|(text, _)| text),
            Some("GAME OVER")
        );
    }

    #[test]
    fn test_render_shows_panels() {
        let state = GameState::with_seed(PieceSeed::from(5_u128));
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        GameDisplay::new(&state).paused(true).render(area, &mut buf);

        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("NEXT"));
        assert!(text.contains("STATS"));
        assert!(text.contains("PAUSED"));
    }
}
