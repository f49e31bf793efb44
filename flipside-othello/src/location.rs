//! Code for working with [`Location`]s on the Othello board.

use crate::bitboard::Bitboard;
use crate::direction::Direction;
use crate::EDGE_LENGTH;
use derive_more::{Display, Error, From, Into};
use itertools::Itertools;
use std::fmt::{self, Formatter, Write};

/// A location on the Othello board, stored as a one-hot [`Bitboard`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Into)]
pub struct Location(Bitboard);

/// A set of locations on the Othello board.
/// Iterates in row-major order: row 0 left to right, then row 1, and so on.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, From, Into)]
pub struct LocationList(Bitboard);

impl Location {
    /// Convert from a bit index: 63 for the upper-left corner, 0 for the lower-right.
    #[inline]
    pub fn from_index(index: u8) -> Self {
        Self(Bitboard::from(1u64 << index))
    }

    /// Convert into a bit index.
    #[inline]
    pub fn to_index(self) -> u8 {
        let bitboard: u64 = self.0.into();
        bitboard.trailing_zeros() as u8
    }

    /// Convert from row and column coordinates.
    /// Returns None if the coordinates are off the board.
    pub fn from_coords(row: usize, col: usize) -> Option<Self> {
        if row >= EDGE_LENGTH || col >= EDGE_LENGTH {
            return None;
        }

        let index = (TOP_LEFT_INDEX - (row * EDGE_LENGTH + col)) as u8;
        Some(Self::from_index(index))
    }

    /// Get the row and column coordinates.
    pub fn to_coords(self) -> (usize, usize) {
        let square = TOP_LEFT_INDEX - self.to_index() as usize;
        (square / EDGE_LENGTH, square % EDGE_LENGTH)
    }

    /// Step one square in `dir`, or None when that leaves the board.
    pub fn offset(self, dir: Direction) -> Option<Self> {
        let (row, col) = self.to_coords();
        let (d_row, d_col) = dir.delta();
        let row = row as isize + d_row as isize;
        let col = col as isize + d_col as isize;
        if row < 0 || col < 0 {
            return None;
        }
        Self::from_coords(row as usize, col as usize)
    }
}

// Bit index of row 0, column 0.
const TOP_LEFT_INDEX: usize = crate::NUM_SPACES - 1;

/// Convert this [`Location`] into string notation ("A4": column letter, row number).
impl fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_coords();
        let row_str = "12345678".chars().nth(row).ok_or(fmt::Error)?;
        let col_str = "ABCDEFGH".chars().nth(col).ok_or(fmt::Error)?;
        f.write_char(col_str)?;
        f.write_char(row_str)
    }
}

impl LocationList {
    /// Returns whether the list is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether `loc` is in this list.
    pub fn contains(self, loc: Location) -> bool {
        !(self.0 & loc.0).is_empty()
    }

    /// This list with `loc` added.
    #[inline]
    pub fn with(self, loc: Location) -> Self {
        Self(self.0 | loc.0)
    }
}

#[derive(Debug, Display, Error, PartialEq)]
#[display(fmt = "invalid location string")]
pub struct ParseLocationError;

/// Build a [`Location`] from a 1-indexed string notation ("A4").
impl std::str::FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let col_str = chars.next().ok_or(ParseLocationError)?.to_ascii_uppercase();
        let col = "ABCDEFGH".find(col_str).ok_or(ParseLocationError)?;
        let row = chars
            .next()
            .ok_or(ParseLocationError)?
            .to_digit(10)
            .ok_or(ParseLocationError)? as usize;

        if row == 0 || chars.next().is_some() {
            return Err(ParseLocationError);
        }

        Self::from_coords(row - 1, col).ok_or(ParseLocationError)
    }
}

impl ExactSizeIterator for LocationList {
    fn len(&self) -> usize {
        self.0.count_occupied() as usize
    }
}

impl Iterator for LocationList {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        if self.0.is_empty() {
            return None;
        }

        // The highest set bit comes first in row-major order.
        let bitboard: u64 = self.0.into();
        let next_move: Bitboard = (1u64 << (63 - bitboard.leading_zeros())).into();
        self.0 ^= next_move;

        Some(Location(next_move))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }
}

impl fmt::Display for LocationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut locations = *self;
        write!(f, "[{}]", locations.join(", "))
    }
}
