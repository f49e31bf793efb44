//! One move decision: reconcile the host's view of the position with ours,
//! then search.

use crate::eval::Evaluator;
use crate::search::{self, Scored};
use crate::state::GameState;
use flipside_othello::{Location, LocationList};
use itertools::Itertools;
use tracing::{info, warn};

/// How to search for the move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies below the current position.
    pub depth: u8,
    /// Skip pruning and visit the whole tree.
    pub exhaustive: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            exhaustive: false,
        }
    }
}

/// Pick a move for `state`, or None when there is nothing to play.
///
/// An empty move list from the host means pass and is answered with None.
/// Otherwise legal moves are recomputed from the cells; when they disagree
/// with the host's list a warning is logged and the recomputed moves are
/// searched. Moves are always searched in row-major order, not the host's
/// order, so ties go to the first tied move in row-major order.
pub fn decide<E: Evaluator + ?Sized>(
    state: &GameState,
    config: SearchConfig,
    evaluator: &E,
) -> Option<Location> {
    if state.legal_moves.is_empty() {
        info!(player = %state.player, "no legal moves supplied; passing");
        return None;
    }

    let board = state.board();
    let supplied = state
        .legal_moves
        .iter()
        .fold(LocationList::default(), |list, &loc| list.with(loc));

    if supplied != board.legal_moves() {
        warn!(
            supplied = %supplied,
            computed = %board.legal_moves(),
            "supplied legal moves disagree with the board; using computed moves"
        );
    }

    if board.legal_moves().is_empty() {
        warn!(player = %state.player, "no legal moves on this board; passing");
        return None;
    }

    let Scored { best_move, score } = if config.exhaustive {
        search::best_move_exhaustive(&board, config.depth, evaluator)
    } else {
        search::best_move(&board, config.depth, evaluator)
    };

    if let Some(mv) = best_move {
        info!(
            player = %state.player,
            depth = config.depth,
            %mv,
            score,
            candidates = %board.legal_moves().map(|loc| loc.to_string()).join(" "),
            "chose move"
        );
    }

    best_move
}
