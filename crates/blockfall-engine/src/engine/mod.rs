//! Game rules and the state pipeline built on the core geometry.
//!
//! - [`GameState`] - Immutable snapshot with the pure transition [`GameState::update`]
//! - [`Action`] - Discrete inputs fed to the reducer (moves, rotation, timer tick, drops)
//! - [`GameSession`] - Fold point owning the latest state, stops at game over
//! - [`PieceGenerator`] / [`PieceSeed`] - Seedable source of random tetrominoes
//! - [`GameConfig`] - Tick period and seed shared by the frontends
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] (empty board, spawned block, preview piece)
//! 2. Turn timer events and player input into [`Action`]s, in arrival order
//! 3. Apply each action; moves that collide are ignored
//! 4. A block that cannot fall any further is locked, full rows are cleared
//!    and scored, and the preview piece spawns at the top
//! 5. The game ends when a spawned block does not fit
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Action, GameConfig, GameSession};
//!
//! let mut session = GameSession::new(&GameConfig::default());
//! while session.apply(Action::Drop).is_continue() {}
//!
//! assert!(session.state().is_game_over());
//! ```

pub use self::{action::*, config::*, generator::*, session::*, state::*};

mod action;
mod config;
mod generator;
mod session;
mod state;
