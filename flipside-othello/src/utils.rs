//! Miscellaneous project utilities.

use crate::EDGE_LENGTH;
use std::fmt::{self, Formatter};

/// Write 64 symbols as a labelled grid, one board row per line.
/// `symbols` must yield exactly 64 items in row-major order.
pub fn format_grid(mut symbols: impl Iterator<Item = char>, f: &mut Formatter) -> fmt::Result {
    write!(f, "   A B C D E F G H")?;

    for row in 0..EDGE_LENGTH {
        write!(f, "\n {} ", row + 1)?;
        for _ in 0..EDGE_LENGTH {
            write!(f, "{} ", symbols.next().ok_or(fmt::Error)?)?;
        }
    }

    match symbols.next() {
        None => Ok(()),
        Some(_) => Err(fmt::Error),
    }
}
