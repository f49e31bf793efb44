//! Depth-limited minimax search with alpha-beta pruning.
//!
//! Every explored move is played on its own copy of the parent board, so
//! sibling branches never share state. Scores are always from the point of
//! view of the player the search was started for: nodes where that player is
//! to move maximize, all others minimize.

use crate::eval::Evaluator;
use flipside_othello::{Board, Location, Player};
use tracing::{debug, warn};

/// The result of searching a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scored {
    /// The first move reaching `score`. None at leaves and at pass nodes.
    pub best_move: Option<Location>,
    pub score: i32,
}

/// Counters collected over one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Every node visited, leaves included.
    pub nodes: u64,
    /// Nodes scored by the evaluator.
    pub leaves: u64,
    /// Times the remaining siblings of a node were skipped.
    pub cutoffs: u64,
}

/// A search for one root player with one evaluator.
pub struct Search<'e, E: ?Sized> {
    evaluator: &'e E,
    root_player: Player,
    stats: SearchStats,
}

impl<'e, E: Evaluator + ?Sized> Search<'e, E> {
    pub fn new(evaluator: &'e E, root_player: Player) -> Self {
        Self {
            evaluator,
            root_player,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Alpha-beta search `depth` plies below `board`.
    ///
    /// `alpha` is the score the maximizing side is already guaranteed
    /// elsewhere in the tree and `beta` the score the minimizing side is; the
    /// root call uses `i32::MIN` and `i32::MAX`. Both bounds are threaded
    /// through the siblings of a node, so later siblings are searched with
    /// the tightened window.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> Scored {
        self.stats.nodes += 1;

        if depth == 0 || board.is_terminal() {
            return self.leaf(board);
        }

        // Side to move is stuck but the game goes on: a single pass child.
        if board.legal_moves().is_empty() {
            let mut child = *board;
            child.pass();
            let score = self.alpha_beta(&child, depth - 1, alpha, beta).score;
            return Scored {
                best_move: None,
                score,
            };
        }

        let maximizing = board.active_player() == self.root_player;
        let mut best = Scored {
            best_move: None,
            score: if maximizing { i32::MIN } else { i32::MAX },
        };

        for mv in board.legal_moves() {
            let child = play(board, mv);
            let score = self.alpha_beta(&child, depth - 1, alpha, beta).score;

            if maximizing {
                if best.best_move.is_none() || score > best.score {
                    best = Scored {
                        best_move: Some(mv),
                        score,
                    };
                }
                alpha = alpha.max(best.score);
                if alpha >= beta {
                    self.stats.cutoffs += 1;
                    break;
                }
            } else {
                if best.best_move.is_none() || score < best.score {
                    best = Scored {
                        best_move: Some(mv),
                        score,
                    };
                }
                beta = beta.min(best.score);
                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break;
                }
            }
        }

        best
    }

    /// Plain minimax over the full tree, with the same move order, pass
    /// handling and tie-breaking as [`alpha_beta`](Self::alpha_beta).
    pub fn minimax(&mut self, board: &Board, depth: u8) -> Scored {
        self.stats.nodes += 1;

        if depth == 0 || board.is_terminal() {
            return self.leaf(board);
        }

        if board.legal_moves().is_empty() {
            let mut child = *board;
            child.pass();
            return Scored {
                best_move: None,
                score: self.minimax(&child, depth - 1).score,
            };
        }

        let maximizing = board.active_player() == self.root_player;
        let mut best: Option<Scored> = None;

        for mv in board.legal_moves() {
            let score = self.minimax(&play(board, mv), depth - 1).score;
            let improves = match best {
                None => true,
                Some(current) if maximizing => score > current.score,
                Some(current) => score < current.score,
            };
            if improves {
                best = Some(Scored {
                    best_move: Some(mv),
                    score,
                });
            }
        }

        best.unwrap_or_else(|| self.leaf(board))
    }

    fn leaf(&mut self, board: &Board) -> Scored {
        self.stats.leaves += 1;
        Scored {
            best_move: None,
            score: self.evaluator.evaluate(board, self.root_player),
        }
    }
}

/// Copy `board` and play `mv` on the copy.
/// A rejected move leaves the copy forfeited, which the search scores like any finished game.
fn play(board: &Board, mv: Location) -> Board {
    let mut child = *board;
    if let Err(err) = child.apply_move(mv) {
        warn!(%err, "generated move rejected; scoring the forfeited position");
    }
    child
}

/// Search `depth` plies with alpha-beta pruning for the side to move on `board`.
pub fn best_move<E: Evaluator + ?Sized>(board: &Board, depth: u8, evaluator: &E) -> Scored {
    let mut search = Search::new(evaluator, board.active_player());
    let result = search.alpha_beta(board, depth, i32::MIN, i32::MAX);
    log_result(board, depth, &result, search.stats());
    result
}

/// Like [`best_move`], but without pruning.
pub fn best_move_exhaustive<E: Evaluator + ?Sized>(
    board: &Board,
    depth: u8,
    evaluator: &E,
) -> Scored {
    let mut search = Search::new(evaluator, board.active_player());
    let result = search.minimax(board, depth);
    log_result(board, depth, &result, search.stats());
    result
}

fn log_result(board: &Board, depth: u8, result: &Scored, stats: SearchStats) {
    debug!(
        player = %board.active_player(),
        depth,
        best_move = ?result.best_move.map(|mv| mv.to_string()),
        score = result.score,
        nodes = stats.nodes,
        leaves = stats.leaves,
        cutoffs = stats.cutoffs,
        "search finished"
    );
}
