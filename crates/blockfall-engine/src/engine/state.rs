use serde::Serialize;

use crate::core::{
    board::{Board, RowClear},
    falling_block::FallingBlock,
    tetromino::Tetromino,
};

use super::{
    action::Action,
    generator::{PieceGenerator, PieceSeed},
};

/// Points awarded per cleared row. Multi-row clears scale linearly.
pub const POINTS_PER_ROW: u64 = 100;

/// Snapshot of a game: board, active block, preview, score and game-over flag.
///
/// A `GameState` is never modified in place by the game rules. Each call to
/// [`GameState::update`] returns a new state and leaves `self` as it was, so a
/// renderer may hold on to any snapshot it received.
///
/// The piece generator travels with the state, which makes `update` a pure
/// function: the same state and action always produce the same result.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Action, GameState, PieceSeed};
///
/// let state = GameState::with_seed(PieceSeed::from(1_u128));
/// let next = state.update(Action::Drop);
///
/// assert_eq!(next.locked_pieces(), 1);
/// assert_eq!(state.locked_pieces(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    current: FallingBlock,
    next: Tetromino,
    score: u64,
    game_over: bool,
    cleared_rows: u64,
    locked_pieces: u64,
    #[serde(skip)]
    generator: PieceGenerator,
}

impl GameState {
    /// Starts a game with a randomly seeded piece generator.
    #[must_use]
    pub fn new() -> Self {
        Self::from_generator(PieceGenerator::new())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::from_generator(PieceGenerator::with_seed(seed))
    }

    /// Empty board, a spawned block and a preview piece, both drawn from `generator`.
    #[must_use]
    pub fn from_generator(mut generator: PieceGenerator) -> Self {
        let current = FallingBlock::spawn(generator.next_tetromino());
        let next = generator.next_tetromino();
        Self::from_parts(Board::new(), current, next, generator)
    }

    /// Assembles a state from explicit parts, e.g. to resume from a prepared board.
    ///
    /// Score and statistics start at zero. The state is marked game over when
    /// `current` does not fit on `board`.
    #[must_use]
    pub fn from_parts(
        board: Board,
        current: FallingBlock,
        next: Tetromino,
        generator: PieceGenerator,
    ) -> Self {
        let game_over = !current.fits(&board);
        Self {
            board,
            current,
            next,
            score: 0,
            game_over,
            cleared_rows: 0,
            locked_pieces: 0,
            generator,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn current(&self) -> &FallingBlock {
        &self.current
    }

    #[must_use]
    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Total number of rows cleared so far.
    #[must_use]
    pub fn cleared_rows(&self) -> u64 {
        self.cleared_rows
    }

    /// Number of blocks locked into the board so far.
    #[must_use]
    pub fn locked_pieces(&self) -> u64 {
        self.locked_pieces
    }

    /// Where the active block would come to rest on a hard drop.
    #[must_use]
    pub fn drop_position(&self) -> FallingBlock {
        self.current.dropped(&self.board)
    }

    /// Computes the state that follows `action`.
    ///
    /// Moves and rotations that would collide are ignored and return an equal
    /// state. Once the game is over every action is ignored.
    #[must_use]
    pub fn update(&self, action: Action) -> Self {
        if self.game_over {
            return self.clone();
        }
        match action {
            Action::Left => self.try_move(self.current.shifted(-1, 0)),
            Action::Right => self.try_move(self.current.shifted(1, 0)),
            Action::Rotate => self.try_move(self.current.rotated()),
            Action::Down | Action::Tick => {
                let below = self.current.shifted(0, 1);
                if below.fits(&self.board) {
                    self.with_current(below)
                } else {
                    self.lock(&self.current)
                }
            }
            Action::Drop => self.lock(&self.drop_position()),
        }
    }

    fn try_move(&self, candidate: FallingBlock) -> Self {
        if candidate.fits(&self.board) {
            self.with_current(candidate)
        } else {
            self.clone()
        }
    }

    fn with_current(&self, current: FallingBlock) -> Self {
        Self {
            current,
            ..self.clone()
        }
    }

    fn lock(&self, block: &FallingBlock) -> Self {
        let RowClear { board, cleared } = self.board.merged(block).cleared_rows();
        let cleared = u64::try_from(cleared).unwrap_or(u64::MAX);
        let score = self.score.saturating_add(cleared.saturating_mul(POINTS_PER_ROW));

        let mut generator = self.generator.clone();
        let current = FallingBlock::spawn(self.next.clone());
        let next = generator.next_tetromino();
        let game_over = !current.fits(&board);

        tracing::debug!(
            kind = ?block.tetromino().kind(),
            x = block.x(),
            y = block.y(),
            cleared,
            score,
            "block locked"
        );
        if game_over {
            tracing::info!(score, spawn = ?current.tetromino().kind(), "game over");
        }

        Self {
            board,
            current,
            next,
            score,
            game_over,
            cleared_rows: self.cleared_rows + cleared,
            locked_pieces: self.locked_pieces + 1,
            generator,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Free-function form of [`GameState::update`].
#[must_use]
pub fn update_state(state: &GameState, action: Action) -> GameState {
    state.update(action)
}
