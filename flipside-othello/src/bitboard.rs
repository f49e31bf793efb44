//! Low-level bitboard operations.
//!
//! These are the raw building blocks of the rules engine. They are unchecked:
//! passing overlapping player masks or a non-one-hot move mask produces
//! meaningless results rather than an error.
//!
//! Under the hood, all these operations work on u64 bitboards. By convention,
//! the MSB is the upper-left of the board (row 0, column 0), and bits proceed
//! in row-major order.

use crate::direction::Direction;
use crate::{utils, NUM_SPACES};
use derive_more::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, From, Into, Not,
};
use std::fmt::{self, Display, Formatter};

/// Holds a single bit per location on an Othello board.
/// Wraps [`u64`] for efficient bit-twiddling, but avoids mixing with numerics.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Default,
    From,
    Into,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

/// Starting bitboard for Black: (3, 4) and (4, 3).
pub const BLACK_START: Bitboard = Bitboard(0x0000000810000000);

/// Starting bitboard for White: (3, 3) and (4, 4).
pub const WHITE_START: Bitboard = Bitboard(0x0000001008000000);

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        utils::format_grid(
            self.into_iter().map(|bit| match bit {
                false => '.',
                true => '#',
            }),
            f,
        )
    }
}

impl Bitboard {
    /// A bitboard with no locations set.
    pub const EMPTY: Self = Self(0);

    /// Count the number of occupied spaces in the bitboard.
    #[inline]
    pub fn count_occupied(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Count the number of empty spaces in the bitboard.
    #[inline]
    pub fn count_empty(self) -> u8 {
        self.0.count_zeros() as u8
    }

    /// Return true if this bitboard is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Move every set bit one step in `dir`, dropping bits that leave the board.
    #[inline]
    pub fn shift(self, dir: Direction) -> Self {
        // Masks clearing the leftmost and rightmost columns.
        const NOT_FIRST_COL: u64 = 0x7f7f7f7f7f7f7f7f;
        const NOT_LAST_COL: u64 = 0xfefefefefefefefe;

        let bits = self.0;
        Self(match dir {
            Direction::North => bits << 8,
            Direction::South => bits >> 8,
            Direction::East => (bits >> 1) & NOT_FIRST_COL,
            Direction::West => (bits << 1) & NOT_LAST_COL,
            Direction::NorthEast => (bits << 7) & NOT_FIRST_COL,
            Direction::NorthWest => (bits << 9) & NOT_LAST_COL,
            Direction::SouthEast => (bits >> 9) & NOT_FIRST_COL,
            Direction::SouthWest => (bits >> 7) & NOT_LAST_COL,
        })
    }
}

/// Compute a mask of the legal moves for the active player from
/// masks of the active player's pieces and the opponent's pieces.
///
/// A move is legal when, in at least one direction, it is followed by one or
/// more opponent discs and then a disc of the active player.
#[inline]
pub fn get_move_mask(active: Bitboard, opponent: Bitboard) -> Bitboard {
    let empties = !(active | opponent);
    let mut moves = Bitboard::EMPTY;

    for &dir in Direction::ALL.iter() {
        // Smear our pieces across runs of opponent pieces. A run is at most
        // six discs long, so five extra steps cover every case.
        let mut run = active.shift(dir) & opponent;
        for _ in 0..5 {
            run |= run.shift(dir) & opponent;
        }

        moves |= run.shift(dir) & empties;
    }

    moves
}

/// Compute the discs flipped in one direction when the active player plays `move_mask`.
/// Returns an empty bitboard when the ray is not closed by one of the active player's discs.
#[inline]
pub fn get_ray_flips(
    active: Bitboard,
    opponent: Bitboard,
    move_mask: Bitboard,
    dir: Direction,
) -> Bitboard {
    let mut flips = Bitboard::EMPTY;
    let mut cursor = move_mask.shift(dir);

    while !(cursor & opponent).is_empty() {
        flips |= cursor;
        cursor = cursor.shift(dir);
    }

    if (cursor & active).is_empty() {
        Bitboard::EMPTY
    } else {
        flips
    }
}

/// Compute every disc flipped when the active player plays `move_mask`.
/// `move_mask` must be a one-hot bitboard on an empty location.
#[inline]
pub fn get_flips(active: Bitboard, opponent: Bitboard, move_mask: Bitboard) -> Bitboard {
    Direction::ALL
        .iter()
        .fold(Bitboard::EMPTY, |flips, &dir| {
            flips | get_ray_flips(active, opponent, move_mask, dir)
        })
}

/// Iterator for the bits in a [`Bitboard`].
#[derive(Clone, Copy, Debug)]
pub struct Bits {
    remaining: usize,
    bitboard: Bitboard,
}

impl Iterator for Bits {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let bitmask = Bitboard::from(1u64 << (self.remaining - 1));
        let bit = !(self.bitboard & bitmask).is_empty();
        self.remaining -= 1;

        Some(bit)
    }
}

impl ExactSizeIterator for Bits {
    fn len(&self) -> usize {
        self.remaining
    }
}

/// Iterate over the bits in row-major order.
impl IntoIterator for Bitboard {
    type Item = bool;
    type IntoIter = Bits;

    fn into_iter(self) -> Self::IntoIter {
        Bits {
            remaining: NUM_SPACES,
            bitboard: self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_drops_wraparound() {
        // Rightmost column of every row.
        let last_col = Bitboard(0x0101010101010101);
        assert_eq!(last_col.shift(Direction::East), Bitboard::EMPTY);
        assert_eq!(last_col.shift(Direction::NorthEast), Bitboard::EMPTY);
        assert_eq!(last_col.shift(Direction::SouthEast), Bitboard::EMPTY);

        let first_col = Bitboard(0x8080808080808080);
        assert_eq!(first_col.shift(Direction::West), Bitboard::EMPTY);
        assert_eq!(first_col.shift(Direction::NorthWest), Bitboard::EMPTY);
        assert_eq!(first_col.shift(Direction::SouthWest), Bitboard::EMPTY);

        assert_eq!(Bitboard(0xff).shift(Direction::South), Bitboard::EMPTY);
        assert_eq!(
            Bitboard(0xff00000000000000).shift(Direction::North),
            Bitboard::EMPTY
        );
    }

    #[test]
    fn starting_move_mask() {
        // Black's openings: (2, 3), (3, 2), (4, 5), (5, 4).
        let expected = Bitboard((1 << 44) | (1 << 37) | (1 << 26) | (1 << 19));
        assert_eq!(get_move_mask(BLACK_START, WHITE_START), expected);
    }

    #[test]
    fn opening_move_flips() {
        // Black plays (2, 3), flipping (3, 3).
        let flips = get_flips(BLACK_START, WHITE_START, Bitboard(1 << 44));
        assert_eq!(flips, Bitboard(1 << 36));
    }

    #[test]
    fn open_ray_flips_nothing() {
        // Opponent run to the edge with no closing disc.
        let active = Bitboard::EMPTY;
        let opponent = Bitboard(0x7f00000000000000);
        let mv = Bitboard(1 << 63);
        assert_eq!(
            get_ray_flips(active, opponent, mv, Direction::East),
            Bitboard::EMPTY
        );
    }

    #[test]
    fn count_and_display() {
        assert_eq!(BLACK_START.count_occupied(), 2);
        assert_eq!(BLACK_START.count_empty(), 62);
        assert_eq!(
            BLACK_START.to_string(),
            "   A B C D E F G H\
             \n 1 . . . . . . . . \
             \n 2 . . . . . . . . \
             \n 3 . . . . . . . . \
             \n 4 . . . . # . . . \
             \n 5 . . . # . . . . \
             \n 6 . . . . . . . . \
             \n 7 . . . . . . . . \
             \n 8 . . . . . . . . "
        );
    }
}
