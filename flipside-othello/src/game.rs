//! Game-level Othello concepts: players, cell contents and how a game ends.

use derive_more::{Display, Error};
use std::fmt;

/// One of the two players in a game.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Default for Player {
    /// Gets the starting player (black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Player {
    type Output = Self;

    /// Gets the other player.
    fn not(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }
}

#[derive(Debug, Display, Error, PartialEq)]
#[display(fmt = "invalid player string")]
pub struct ParsePlayerError;

/// Parse a player from its name ("black" / "white") or its numeric code (1 / 2).
impl std::str::FromStr for Player {
    type Err = ParsePlayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" | "b" | "1" => Ok(Player::Black),
            "white" | "w" | "2" => Ok(Player::White),
            _ => Err(ParsePlayerError),
        }
    }
}

/// The contents of a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// The player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    /// Character used when rendering a board.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Black => '#',
            Cell::White => 'O',
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// Disc counts for each cell state. The three counts always sum to 64.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DiscCount {
    pub empty: u8,
    pub black: u8,
    pub white: u8,
}

impl DiscCount {
    /// Number of cells in state `cell`.
    pub fn of(self, cell: Cell) -> u8 {
        match cell {
            Cell::Empty => self.empty,
            Cell::Black => self.black,
            Cell::White => self.white,
        }
    }

    /// Number of discs `player` has on the board.
    pub fn player(self, player: Player) -> u8 {
        self.of(player.into())
    }

    pub(crate) fn player_mut(&mut self, player: Player) -> &mut u8 {
        match player {
            Player::Black => &mut self.black,
            Player::White => &mut self.white,
        }
    }

    /// The result implied by comparing disc counts.
    pub fn leader(self) -> Outcome {
        use std::cmp::Ordering;
        match self.black.cmp(&self.white) {
            Ordering::Greater => Outcome::Win(Player::Black),
            Ordering::Less => Outcome::Win(Player::White),
            Ordering::Equal => Outcome::Draw,
        }
    }
}

/// The result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(player) => write!(f, "{} wins", player),
            Outcome::Draw => f.write_str("draw"),
        }
    }
}

/// Where a game is in its lifecycle. Every state except `InProgress` is final.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    InProgress,
    /// Neither player can move; the outcome follows from the disc counts.
    Finished(Outcome),
    /// A player attempted an illegal move and lost.
    Forfeited { winner: Player },
}

impl Default for Status {
    fn default() -> Self {
        Status::InProgress
    }
}

impl Status {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Status::InProgress
    }

    /// The outcome of the game, or None while it is still in progress.
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Status::InProgress => None,
            Status::Finished(outcome) => Some(outcome),
            Status::Forfeited { winner } => Some(Outcome::Win(winner)),
        }
    }
}
