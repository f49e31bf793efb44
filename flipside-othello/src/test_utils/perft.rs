//! "Perft" performance test: count the number of leaves at a given depth.
//! Useful for validating move generation.
//! See: http://www.aartbik.com/MISC/reversi.html
//!
//! Passes are folded into [`Board::apply_move`], so counts agree with the
//! published table only up to depth 8, before the first forced pass.

use crate::board::Board;

pub fn run_perft(depth: u64) -> u64 {
    leaves_below(Board::new(), depth)
}

fn leaves_below(board: Board, depth: u64) -> u64 {
    // Leaf node for this depth, or the game is over
    if depth == 0 || board.is_terminal() {
        return 1;
    }

    board
        .legal_moves()
        .map(|mv| {
            let mut child = board;
            match child.apply_move(mv) {
                Ok(_) => leaves_below(child, depth - 1),
                Err(_) => 1,
            }
        })
        .sum()
}

#[test]
fn perft_01() {
    assert_eq!(run_perft(1), 4);
}

#[test]
fn perft_02() {
    assert_eq!(run_perft(2), 12);
}

#[test]
fn perft_03() {
    assert_eq!(run_perft(3), 56);
}

#[test]
fn perft_04() {
    assert_eq!(run_perft(4), 244);
}

#[test]
fn perft_05() {
    assert_eq!(run_perft(5), 1396);
}
