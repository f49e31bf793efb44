//! The Othello rules engine.
//!
//! A [`Board`] is a small `Copy` value holding the full game state: both
//! players' discs, whose turn it is, disc counts, the cached legal moves for
//! the side to move, and whether the game has ended. Search code is expected
//! to copy a board per explored branch rather than undo moves.

use crate::bitboard::{self, Bitboard, BLACK_START, WHITE_START};
use crate::game::{Cell, DiscCount, Outcome, Player, Status};
use crate::location::{Location, LocationList};
use crate::{utils, EDGE_LENGTH, NUM_SPACES};
use derive_more::{Display, Error};
use std::fmt;

/// A complete game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
    active_player: Player,
    disc_count: DiscCount,
    legal_moves: LocationList,
    status: Status,
}

/// Why [`Board::apply_move`] refused a move.
#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum MoveError {
    /// The move was not legal. The board is now forfeited to the opponent.
    #[display(fmt = "{} cannot play {}", player, location)]
    Illegal { location: Location, player: Player },
    /// The board was already terminal and has not been changed.
    #[display(fmt = "the game is already over")]
    GameOver,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting position, with Black to move.
    pub fn new() -> Self {
        Self::from_bitboards(BLACK_START, WHITE_START, Player::Black)
    }

    /// Build a board from each player's discs.
    ///
    /// If neither player can move, the board is immediately finished. If only
    /// the opponent can move, the board is in progress with no legal moves and
    /// the active player has to [`pass`](Self::pass).
    pub fn from_bitboards(black: Bitboard, white: Bitboard, active_player: Player) -> Self {
        debug_assert!((black & white).is_empty(), "players share a location");

        let black_count = black.count_occupied();
        let white_count = white.count_occupied();
        let mut board = Self {
            black,
            white,
            active_player,
            disc_count: DiscCount {
                empty: NUM_SPACES as u8 - black_count - white_count,
                black: black_count,
                white: white_count,
            },
            legal_moves: LocationList::default(),
            status: Status::InProgress,
        };

        board.legal_moves = board.legal_moves_for(active_player);
        if board.legal_moves.is_empty() && board.legal_moves_for(!active_player).is_empty() {
            board.status = Status::Finished(board.disc_count.leader());
        }

        board
    }

    /// Build a board from a grid of cells indexed as `cells[row][col]`.
    pub fn from_cells(cells: &[[Cell; EDGE_LENGTH]; EDGE_LENGTH], active_player: Player) -> Self {
        let mut black = Bitboard::EMPTY;
        let mut white = Bitboard::EMPTY;

        for (row, line) in cells.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                let mask = Location::from_coords(row, col)
                    .map(Bitboard::from)
                    .unwrap_or(Bitboard::EMPTY);
                match cell {
                    Cell::Black => black |= mask,
                    Cell::White => white |= mask,
                    Cell::Empty => {}
                }
            }
        }

        Self::from_bitboards(black, white, active_player)
    }

    /// The contents of one cell.
    #[inline]
    pub fn cell(&self, loc: Location) -> Cell {
        let mask = Bitboard::from(loc);
        if !(self.black & mask).is_empty() {
            Cell::Black
        } else if !(self.white & mask).is_empty() {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    /// The whole grid, indexed as `cells[row][col]`.
    pub fn cells(&self) -> [[Cell; EDGE_LENGTH]; EDGE_LENGTH] {
        let mut cells = [[Cell::Empty; EDGE_LENGTH]; EDGE_LENGTH];
        for index in 0..NUM_SPACES as u8 {
            let loc = Location::from_index(index);
            let (row, col) = loc.to_coords();
            cells[row][col] = self.cell(loc);
        }
        cells
    }

    /// The discs belonging to `player`.
    #[inline]
    pub fn bitboard(&self, player: Player) -> Bitboard {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Mask of every empty location.
    #[inline]
    pub fn empty_mask(&self) -> Bitboard {
        !(self.black | self.white)
    }

    /// The player whose turn it is.
    #[inline]
    pub fn active_player(&self) -> Player {
        self.active_player
    }

    #[inline]
    pub fn disc_count(&self) -> DiscCount {
        self.disc_count
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The outcome of the game, or None while it is undecided.
    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.status.outcome()
    }

    /// The legal moves for the active player, in row-major order.
    /// Empty when the active player has to pass or the game is over.
    #[inline]
    pub fn legal_moves(&self) -> LocationList {
        self.legal_moves
    }

    /// Compute the legal moves for any player. Does not modify the board.
    #[inline]
    pub fn legal_moves_for(&self, player: Player) -> LocationList {
        let active = self.bitboard(player);
        let opponent = self.bitboard(!player);
        bitboard::get_move_mask(active, opponent).into()
    }

    /// Whether `player` could place a disc at `loc`: the cell is empty and at
    /// least one direction from it crosses opponent discs and ends on one of
    /// `player`'s discs.
    pub fn is_legal_move(&self, loc: Location, player: Player) -> bool {
        self.cell(loc) == Cell::Empty && !self.flips_for(loc, player).is_empty()
    }

    /// The discs `player` would flip by playing at `loc`.
    /// Meaningless if `loc` is occupied.
    #[inline]
    pub fn flips_for(&self, loc: Location, player: Player) -> Bitboard {
        bitboard::get_flips(self.bitboard(player), self.bitboard(!player), loc.into())
    }

    /// Place a disc for the active player and flip every captured disc.
    /// Returns the flipped discs.
    ///
    /// After the move the turn goes to the opponent, unless the opponent has
    /// no legal move, in which case it stays with the mover. If neither side
    /// can move, the game is finished and decided by disc count.
    ///
    /// An illegal move ends the game as a forfeit won by the opponent.
    pub fn apply_move(&mut self, loc: Location) -> Result<Bitboard, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let player = self.active_player;
        if !self.legal_moves.contains(loc) {
            self.status = Status::Forfeited { winner: !player };
            self.legal_moves = LocationList::default();
            return Err(MoveError::Illegal {
                location: loc,
                player,
            });
        }

        let move_mask = Bitboard::from(loc);
        let flips = self.flips_for(loc, player);
        let active = self.bitboard(player) ^ flips | move_mask;
        let opponent = self.bitboard(!player) ^ flips;
        match player {
            Player::Black => {
                self.black = active;
                self.white = opponent;
            }
            Player::White => {
                self.white = active;
                self.black = opponent;
            }
        }

        let flipped = flips.count_occupied();
        self.disc_count.empty -= 1;
        *self.disc_count.player_mut(player) += 1 + flipped;
        *self.disc_count.player_mut(!player) -= flipped;

        self.active_player = !player;
        self.legal_moves = self.legal_moves_for(self.active_player);

        if self.legal_moves.is_empty() {
            // Opponent is stuck: the mover goes again.
            self.active_player = player;
            self.legal_moves = self.legal_moves_for(player);

            if self.legal_moves.is_empty() {
                self.status = Status::Finished(self.disc_count.leader());
            }
        }

        Ok(flips)
    }

    /// Hand the turn to the opponent without placing a disc.
    /// Does nothing once the game is over.
    pub fn pass(&mut self) {
        if self.is_terminal() {
            return;
        }

        self.active_player = !self.active_player;
        self.legal_moves = self.legal_moves_for(self.active_player);
    }
}

/// Render the grid with legal moves marked `*`, followed by the game status.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let legal_moves = self.legal_moves;
        let symbols = (0..NUM_SPACES as u8).rev().map(|index| {
            let loc = Location::from_index(index);
            if legal_moves.contains(loc) {
                '*'
            } else {
                self.cell(loc).symbol()
            }
        });
        utils::format_grid(symbols, f)?;

        let count = self.disc_count;
        write!(f, "\n#: {}; O: {}; ", count.black, count.white)?;
        match self.status {
            Status::InProgress => write!(f, "{} to move", self.active_player),
            Status::Finished(outcome) => write!(f, "{}", outcome),
            Status::Forfeited { winner } => write!(f, "{} wins by forfeit", winner),
        }
    }
}
