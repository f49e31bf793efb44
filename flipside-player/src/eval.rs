//! Static position evaluation, consulted by the search at its horizon.

use crate::weights::{EvalWeights, SquareTable};
use flipside_othello::{Board, Direction, Location, LocationList, Outcome, Player};

/// Scores positions from a fixed player's point of view.
///
/// Implementations must be pure: the score may depend only on the board and
/// the perspective player.
pub trait Evaluator {
    /// Score `board` for `perspective`. Larger is better for `perspective`.
    fn evaluate(&self, board: &Board, perspective: Player) -> i32;
}

impl<F> Evaluator for F
where
    F: Fn(&Board, Player) -> i32,
{
    fn evaluate(&self, board: &Board, perspective: Player) -> i32 {
        self(board, perspective)
    }
}

/// The hand-tuned evaluator: a weighted sum of disc, positional, corner,
/// mobility and end-of-game terms.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Heuristic {
    weights: EvalWeights,
}

impl Heuristic {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }
}

impl Evaluator for Heuristic {
    fn evaluate(&self, board: &Board, perspective: Player) -> i32 {
        let w = &self.weights;

        // Weights loaded from a file can be arbitrarily large.
        let discs = i64::from(disc_differential(board, perspective));
        let squares = square_score(&w.squares, board, perspective);
        let terminal = i64::from(terminal_score(board, perspective));
        let terms = [
            i64::from(w.disc).saturating_mul(discs),
            i64::from(w.square).saturating_mul(squares),
            corner_score(w, board, perspective),
            i64::from(w.terminal).saturating_mul(terminal),
        ];
        let fixed = terms
            .iter()
            .fold(0i64, |sum, &term| sum.saturating_add(term))
            .clamp(i32::MIN.into(), i32::MAX.into());

        (fixed as f64 + w.mobility * mobility(board, perspective)) as i32
    }
}

/// # my discs - # opponent discs.
pub fn disc_differential(board: &Board, perspective: Player) -> i32 {
    let count = board.disc_count();
    count.player(perspective) as i32 - count.player(!perspective) as i32
}

/// Sum of table weights over my discs minus the sum over opponent discs.
pub fn square_score(squares: &SquareTable, board: &Board, perspective: Player) -> i64 {
    let sum = |player: Player| -> i64 {
        LocationList::from(board.bitboard(player))
            .map(|loc| {
                let (row, col) = loc.to_coords();
                i64::from(squares[row][col])
            })
            .sum()
    };

    sum(perspective) - sum(!perspective)
}

/// Normalized mobility in [-100, 100]: 100 * (mine - theirs) / (mine + theirs).
/// Zero when neither side can move.
pub fn mobility(board: &Board, perspective: Player) -> f64 {
    let mine = board.legal_moves_for(perspective).len() as f64;
    let theirs = board.legal_moves_for(!perspective).len() as f64;

    if mine + theirs == 0.0 {
        0.0
    } else {
        100.0 * (mine - theirs) / (mine + theirs)
    }
}

/// +1 for a won finished game, -1 for a lost one, 0 otherwise.
pub fn terminal_score(board: &Board, perspective: Player) -> i32 {
    match board.outcome() {
        Some(Outcome::Win(winner)) if winner == perspective => 1,
        Some(Outcome::Win(_)) => -1,
        Some(Outcome::Draw) | None => 0,
    }
}

/// A corner with the two edges leaving it and the diagonal toward the center.
struct Corner {
    row: usize,
    col: usize,
    edges: [Direction; 2],
    diagonal: Direction,
}

const CORNERS: [Corner; 4] = [
    Corner {
        row: 0,
        col: 0,
        edges: [Direction::East, Direction::South],
        diagonal: Direction::SouthEast,
    },
    Corner {
        row: 0,
        col: 7,
        edges: [Direction::West, Direction::South],
        diagonal: Direction::SouthWest,
    },
    Corner {
        row: 7,
        col: 0,
        edges: [Direction::East, Direction::North],
        diagonal: Direction::NorthEast,
    },
    Corner {
        row: 7,
        col: 7,
        edges: [Direction::West, Direction::North],
        diagonal: Direction::NorthWest,
    },
];

/// Corner ownership, edge runs from owned corners, and discs risking an empty corner.
pub fn corner_score(weights: &EvalWeights, board: &Board, perspective: Player) -> i64 {
    let sign = |player: Player| if player == perspective { 1 } else { -1 };
    let mut score = 0;

    for corner in CORNERS.iter() {
        let at = match Location::from_coords(corner.row, corner.col) {
            Some(at) => at,
            None => continue,
        };

        match board.cell(at).owner() {
            Some(owner) => {
                let mut value = i64::from(weights.corner);
                for &dir in corner.edges.iter() {
                    let run = edge_run(board, at, dir, owner);
                    value += i64::from(weights.edge_run) * run;
                    if run == 7 {
                        value += i64::from(weights.full_edge);
                    }
                }
                score += sign(owner) * value;
            }
            None => {
                let neighbors = corner
                    .edges
                    .iter()
                    .map(|&dir| (dir, 1))
                    .chain(std::iter::once((corner.diagonal, 2)));

                for (dir, factor) in neighbors {
                    let owner = at.offset(dir).and_then(|loc| board.cell(loc).owner());
                    if let Some(owner) = owner {
                        score -= sign(owner) * i64::from(weights.corner_adjacent) * factor;
                    }
                }
            }
        }
    }

    score
}

/// Number of consecutive `owner` discs walking from `corner` along `dir`, excluding the corner.
/// Seven means the run reaches the opposite corner of that edge.
fn edge_run(board: &Board, corner: Location, dir: Direction, owner: Player) -> i64 {
    let mut run = 0;
    let mut cursor = corner.offset(dir);

    while let Some(loc) = cursor {
        if board.cell(loc).owner() != Some(owner) {
            break;
        }
        run += 1;
        cursor = loc.offset(dir);
    }

    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipside_othello::test_utils::random_position;
    use flipside_othello::{Cell, EDGE_LENGTH};

    fn board_from(rows: [&str; 8], active: Player) -> Board {
        let mut cells = [[Cell::Empty; EDGE_LENGTH]; EDGE_LENGTH];
        for (row, line) in rows.iter().enumerate() {
            for (col, symbol) in line.chars().enumerate() {
                cells[row][col] = match symbol {
                    '#' => Cell::Black,
                    'O' => Cell::White,
                    _ => Cell::Empty,
                };
            }
        }
        Board::from_cells(&cells, active)
    }

    fn only(weights: EvalWeights) -> Heuristic {
        Heuristic::new(weights)
    }

    fn zero_weights() -> EvalWeights {
        EvalWeights {
            squares: [[0; 8]; 8],
            square: 0,
            disc: 0,
            corner: 0,
            edge_run: 0,
            full_edge: 0,
            corner_adjacent: 0,
            mobility: 0.0,
            terminal: 0,
        }
    }

    #[test]
    fn opening_is_balanced() {
        let board = Board::new();
        let eval = Heuristic::default();
        assert_eq!(eval.evaluate(&board, Player::Black), 0);
        assert_eq!(eval.evaluate(&board, Player::White), 0);
    }

    #[test]
    fn disc_term() {
        let mut board = Board::new();
        board
            .apply_move(Location::from_coords(2, 3).unwrap())
            .unwrap();
        let eval = only(EvalWeights {
            disc: 1,
            ..zero_weights()
        });
        assert_eq!(eval.evaluate(&board, Player::Black), 3);
        assert_eq!(eval.evaluate(&board, Player::White), -3);
    }

    #[test]
    fn square_term_uses_table() {
        let board = board_from(
            [
                "#......O", "........", "........", "...##...", "...OO...", "........",
                "........", "........",
            ],
            Player::Black,
        );
        let mut weights = zero_weights();
        weights.square = 1;
        weights.squares[0][0] = 30;
        weights.squares[0][7] = 5;
        weights.squares[3][3] = 2;
        weights.squares[4][4] = 1;
        // Black: 30 + 2 + 0, White: 5 + 0 + 1.
        assert_eq!(only(weights).evaluate(&board, Player::Black), 26);
    }

    #[test]
    fn corner_with_full_edge() {
        let board = board_from(
            [
                "########", "#.......", "#.......", "...#O...", "...O#...", "........",
                "........", "........",
            ],
            Player::White,
        );
        let weights = EvalWeights {
            corner: 100,
            edge_run: 3,
            full_edge: 10,
            ..zero_weights()
        };
        // (0, 0): east run 7 (+21 +10), south run 2 (+6).
        // (0, 7): west run 7 (+21 +10), south run 0.
        let expected = (100 + 21 + 10 + 6) + (100 + 21 + 10);
        assert_eq!(corner_score(&weights, &board, Player::Black), expected);
        assert_eq!(corner_score(&weights, &board, Player::White), -expected);
    }

    #[test]
    fn discs_next_to_empty_corner_penalized() {
        let board = board_from(
            [
                ".#......", ".O......", "........", "...#O...", "...O#...", "........",
                "......O.", "........",
            ],
            Player::Black,
        );
        let weights = EvalWeights {
            corner_adjacent: 10,
            ..zero_weights()
        };
        // Black C-square at (0, 1): -10. White X-squares at (1, 1) and (6, 6): +20 each.
        assert_eq!(corner_score(&weights, &board, Player::Black), 30);
    }

    #[test]
    fn mobility_zero_when_nobody_moves() {
        let board = board_from(
            [
                "#.......", "........", "........", "........", "........", "........",
                "........", ".......O",
            ],
            Player::Black,
        );
        assert!(board.is_terminal());
        assert_eq!(mobility(&board, Player::Black), 0.0);
    }

    #[test]
    fn mobility_normalized() {
        let mut board = Board::new();
        board
            .apply_move(Location::from_coords(2, 3).unwrap())
            .unwrap();
        // Both sides have three replies here.
        let mine = board.legal_moves_for(Player::Black).len() as f64;
        let theirs = board.legal_moves_for(Player::White).len() as f64;
        let expected = 100.0 * (mine - theirs) / (mine + theirs);
        assert_eq!(mobility(&board, Player::Black), expected);
        assert_eq!(mobility(&board, Player::White), -expected);
    }

    #[test]
    fn mobility_truncates_toward_zero() {
        let eval = only(EvalWeights {
            mobility: 1.0,
            ..zero_weights()
        });
        for seed in 0..20 {
            let board = random_position(seed, 15);
            for &player in [Player::Black, Player::White].iter() {
                let raw = mobility(&board, player);
                assert_eq!(eval.evaluate(&board, player), raw.trunc() as i32);
            }
        }
    }

    #[test]
    fn terminal_bonus() {
        let board = board_from(
            [
                "#.......", "........", "........", "........", "........", "........",
                "......OO", ".......O",
            ],
            Player::Black,
        );
        assert_eq!(board.outcome(), Some(Outcome::Win(Player::White)));
        assert_eq!(terminal_score(&board, Player::White), 1);
        assert_eq!(terminal_score(&board, Player::Black), -1);
    }

    #[test]
    fn huge_weights_saturate() {
        let mut board = Board::new();
        board
            .apply_move(Location::from_coords(2, 3).unwrap())
            .unwrap();
        let eval = only(EvalWeights::from_json(r#"{ "disc": 1000000000 }"#).unwrap());
        assert_eq!(eval.evaluate(&board, Player::Black), i32::MAX);
        assert_eq!(eval.evaluate(&board, Player::White), i32::MIN);

        let mut weights = zero_weights();
        weights.square = i32::MAX;
        weights.squares = [[i32::MAX; 8]; 8];
        weights.corner_adjacent = i32::MAX;
        let eval = only(weights);
        assert_eq!(eval.evaluate(&board, Player::Black), i32::MAX);
        assert_eq!(eval.evaluate(&board, Player::White), i32::MIN);
    }

    #[test]
    fn closures_are_evaluators() {
        let eval = |board: &Board, perspective: Player| disc_differential(board, perspective);
        assert_eq!(eval.evaluate(&Board::new(), Player::White), 0);
    }
}
