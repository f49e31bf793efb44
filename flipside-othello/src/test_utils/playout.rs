//! Seeded random games, used to reach varied positions in tests and benchmarks.

use crate::board::Board;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

/// Play up to `plies` uniformly random legal moves from `board`.
/// Returns every position visited, starting with `board` itself.
/// Stops early when the game ends.
pub fn random_playout<R: Rng + ?Sized>(board: Board, plies: usize, rng: &mut R) -> Vec<Board> {
    let mut positions = vec![board];
    let mut current = board;

    for _ in 0..plies {
        if current.is_terminal() {
            break;
        }

        match current.legal_moves().choose(rng) {
            Some(mv) => {
                if current.apply_move(mv).is_err() {
                    break;
                }
            }
            None => current.pass(),
        }
        positions.push(current);
    }

    positions
}

/// The position reached after `plies` random moves from the opening, seeded for reproducibility.
pub fn random_position(seed: u64, plies: usize) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let positions = random_playout(Board::new(), plies, &mut rng);
    positions.last().copied().unwrap_or_default()
}
