pub use self::{board::*, falling_block::*, tetromino::*};

pub(crate) mod board;
pub(crate) mod falling_block;
pub(crate) mod tetromino;
