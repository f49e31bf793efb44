//! `flipside-othello` is the rules engine behind the flipside Othello player.
//!
//! This package implements two levels of abstraction:
//!
//!  - [`bitboard`] contains the raw, unchecked operations for working with Othello boards:
//!    direction shifts, move generation and capture computation.
//!  - [`Board`] is the checked game state. It enforces legality, flips captured discs,
//!    applies the pass rule and detects the end of the game. Boards are small `Copy`
//!    values, so searches can clone one per explored move.
//!
//! Locations use (row, col) coordinates with (0, 0) in the upper-left corner.

pub mod bitboard;
pub mod test_utils;

mod board;
mod direction;
mod game;
mod location;
mod utils;

pub use board::*;
pub use direction::*;
pub use game::*;
pub use location::*;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
