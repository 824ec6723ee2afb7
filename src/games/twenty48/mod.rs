//! 2048: slide-and-merge on a 4×4 grid with win flag and undo.

mod board;
mod game;

pub use board::{can_merge, slide_row, Board, Direction, MoveOutcome, Tiles, SIZE};
pub use game::{
    TileRound, TwentyFortyEightGame, TwentyFortyEightGameBuilder, UndoSnapshot, STARTING_TILES,
    TWENTY48_SLUG,
};
