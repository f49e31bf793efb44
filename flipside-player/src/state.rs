//! Text format exchanged with the game host.
//!
//! A state file holds whitespace-separated integers: the side to move
//! (1 = Black, 2 = White), 64 cell codes in row-major order (0 = empty,
//! 1 = Black, 2 = White), the number of legal moves, then that many
//! `row col` pairs. The reply written to the action file is a single
//! `row col` line.

use derive_more::{Display, Error};
use flipside_othello::{Board, Cell, Location, Player, EDGE_LENGTH};
use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

/// One decision request: the position and the moves the host considers legal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub player: Player,
    pub cells: [[Cell; EDGE_LENGTH]; EDGE_LENGTH],
    /// In the order the host listed them.
    pub legal_moves: Vec<Location>,
}

#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum ParseStateError {
    #[display(fmt = "unexpected end of input while reading {}", expected)]
    Truncated { expected: &'static str },
    #[display(fmt = "invalid {} {:?}", what, token)]
    Invalid { what: &'static str, token: String },
    #[display(fmt = "move ({}, {}) is off the board", row, col)]
    OffBoard { row: usize, col: usize },
    #[display(fmt = "unexpected trailing input {:?}", token)]
    Trailing { token: String },
}

impl GameState {
    /// The request the host would send for `board`.
    pub fn from_board(board: &Board) -> Self {
        Self {
            player: board.active_player(),
            cells: board.cells(),
            legal_moves: board.legal_moves().collect(),
        }
    }

    pub fn board(&self) -> Board {
        Board::from_cells(&self.cells, self.player)
    }
}

fn player_code(player: Player) -> u8 {
    match player {
        Player::Black => 1,
        Player::White => 2,
    }
}

fn cell_code(cell: Cell) -> u8 {
    match cell {
        Cell::Empty => 0,
        Cell::Black => 1,
        Cell::White => 2,
    }
}

/// Pulls typed tokens off a whitespace-separated input.
struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next_token(&mut self, expected: &'static str) -> Result<&'a str, ParseStateError> {
        self.inner
            .next()
            .ok_or(ParseStateError::Truncated { expected })
    }

    fn next_number(&mut self, what: &'static str) -> Result<usize, ParseStateError> {
        let token = self.next_token(what)?;
        token.parse().map_err(|_| ParseStateError::Invalid {
            what,
            token: token.to_owned(),
        })
    }
}

impl FromStr for GameState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = Tokens {
            inner: s.split_whitespace(),
        };

        let player = match tokens.next_token("player")? {
            "1" => Player::Black,
            "2" => Player::White,
            token => {
                return Err(ParseStateError::Invalid {
                    what: "player",
                    token: token.to_owned(),
                })
            }
        };

        let mut cells = [[Cell::Empty; EDGE_LENGTH]; EDGE_LENGTH];
        for row in cells.iter_mut() {
            for cell in row.iter_mut() {
                *cell = match tokens.next_token("cell")? {
                    "0" => Cell::Empty,
                    "1" => Cell::Black,
                    "2" => Cell::White,
                    token => {
                        return Err(ParseStateError::Invalid {
                            what: "cell",
                            token: token.to_owned(),
                        })
                    }
                };
            }
        }

        let count = tokens.next_number("move count")?;
        let mut legal_moves = Vec::with_capacity(count.min(EDGE_LENGTH * EDGE_LENGTH));
        for _ in 0..count {
            let row = tokens.next_number("move row")?;
            let col = tokens.next_number("move column")?;
            let loc =
                Location::from_coords(row, col).ok_or(ParseStateError::OffBoard { row, col })?;
            legal_moves.push(loc);
        }

        if let Some(token) = tokens.inner.next() {
            return Err(ParseStateError::Trailing {
                token: token.to_owned(),
            });
        }

        Ok(Self {
            player,
            cells,
            legal_moves,
        })
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", player_code(self.player))?;
        for row in self.cells.iter() {
            writeln!(f, "{}", row.iter().map(|&cell| cell_code(cell)).join(" "))?;
        }
        writeln!(f, "{}", self.legal_moves.len())?;
        for loc in self.legal_moves.iter() {
            let (row, col) = loc.to_coords();
            writeln!(f, "{} {}", row, col)?;
        }
        Ok(())
    }
}

/// The action file contents for playing `loc`.
pub fn encode_action(loc: Location) -> String {
    let (row, col) = loc.to_coords();
    format!("{} {}\n", row, col)
}
