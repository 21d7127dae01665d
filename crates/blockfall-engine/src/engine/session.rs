use std::ops::ControlFlow;

use super::{action::Action, config::GameConfig, generator::PieceGenerator, state::GameState};

/// Owner of the latest game state, folding an action stream through the reducer.
///
/// A session accepts actions until a transition ends the game. The state that
/// ended it is kept; every later action is refused without being applied, and
/// playing again needs a new session.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Action, GameConfig, GameSession, PieceSeed};
///
/// let config = GameConfig {
///     seed: Some(PieceSeed::from(1_u128)),
///     ..GameConfig::default()
/// };
/// let mut session = GameSession::new(&config);
/// session.fold([Action::Left, Action::Tick, Action::Drop]);
///
/// assert_eq!(session.applied_actions(), 3);
/// assert_eq!(session.state().locked_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    applied_actions: u64,
}

impl GameSession {
    /// Starts a session from a fresh state, seeded when the config has a seed.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let generator = config
            .seed
            .map_or_else(PieceGenerator::new, PieceGenerator::with_seed);
        Self::from_state(GameState::from_generator(generator))
    }

    #[must_use]
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            applied_actions: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Number of actions folded into the state so far.
    #[must_use]
    pub fn applied_actions(&self) -> u64 {
        self.applied_actions
    }

    /// Applies one action.
    ///
    /// Returns `Break` once the game is over, including for the action that
    /// ended it; the caller should stop feeding the session then.
    pub fn apply(&mut self, action: Action) -> ControlFlow<()> {
        if self.is_over() {
            tracing::trace!(%action, "action after game over ignored");
            return ControlFlow::Break(());
        }
        self.state = self.state.update(action);
        self.applied_actions += 1;
        if self.is_over() {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Applies actions in order, stopping at game over.
    pub fn fold<I>(&mut self, actions: I) -> ControlFlow<()>
    where
        I: IntoIterator<Item = Action>,
    {
        for action in actions {
            self.apply(action)?;
        }
        ControlFlow::Continue(())
    }

    /// Like [`Self::fold`], reporting every resulting state to `observer`.
    pub fn fold_with<I, F>(&mut self, actions: I, mut observer: F) -> ControlFlow<()>
    where
        I: IntoIterator<Item = Action>,
        F: FnMut(Action, &GameState),
    {
        for action in actions {
            if self.is_over() {
                return ControlFlow::Break(());
            }
            let flow = self.apply(action);
            observer(action, &self.state);
            flow?;
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Board, Cell, Color, FallingBlock, PieceSeed, Tetromino, TetrominoKind,
        engine::generator::PieceGenerator,
    };

    use super::*;

    fn blocked_session() -> GameSession {
        // Any O spawn at column 4 collides with this cell
        let mut board = Board::new();
        board.set_cell(4, 0, Cell::Filled(Color::Blue));
        GameSession::from_state(GameState::from_parts(
            board,
            FallingBlock::new(Tetromino::new(TetrominoKind::O), 0, 18),
            Tetromino::new(TetrominoKind::O),
            PieceGenerator::with_seed(PieceSeed::from(1_u128)),
        ))
    }

    #[test]
    fn test_apply_counts_actions() {
        let mut session = GameSession::new(&GameConfig::default());
        assert!(session.apply(Action::Tick).is_continue());
        assert!(session.apply(Action::Left).is_continue());
        assert_eq!(session.applied_actions(), 2);
        assert_eq!(session.state().current().y(), 1);
    }

    #[test]
    fn test_stream_stops_at_game_over() {
        let mut session = blocked_session();
        let flow = session.fold([Action::Tick, Action::Left, Action::Drop]);

        assert!(flow.is_break());
        assert!(session.is_over());
        assert_eq!(session.applied_actions(), 1);

        let frozen = session.state().clone();
        assert!(session.apply(Action::Drop).is_break());
        assert_eq!(session.state(), &frozen);
        assert_eq!(session.applied_actions(), 1);
    }

    #[test]
    fn test_fold_with_reports_final_state() {
        let mut session = blocked_session();
        let mut seen = Vec::new();
        let flow = session.fold_with([Action::Tick, Action::Tick], |action, state| {
            seen.push((action, state.is_game_over()));
        });

        assert!(flow.is_break());
        assert_eq!(seen, vec![(Action::Tick, true)]);
    }

    #[test]
    fn test_same_seed_same_states() {
        let config = GameConfig {
            seed: Some(PieceSeed::from(1234_u128)),
            ..GameConfig::default()
        };
        let actions = [
            Action::Drop,
            Action::Left,
            Action::Rotate,
            Action::Drop,
            Action::Right,
            Action::Tick,
            Action::Drop,
        ];

        let mut a = GameSession::new(&config);
        let mut b = GameSession::new(&config);
        for action in actions {
            let _ = a.apply(action);
            let _ = b.apply(action);
            assert_eq!(a.state(), b.state());
        }
    }
}
