//! Tunable parameters for the heuristic evaluator.
//!
//! Weights come from a named [`Preset`] or from a JSON file. Fields missing
//! from a file keep their [`Default`] value.

use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Per-square weights indexed as `squares[row][col]`.
pub type SquareTable = [[i32; 8]; 8];

/// Corners high, squares next to corners negative.
pub const BALANCED_SQUARES: SquareTable = [
    [30, -3, 11, 8, 8, 11, -3, 30],
    [-3, -7, -4, 1, 1, -4, -7, -3],
    [11, -4, 2, 2, 2, 2, -4, 11],
    [8, 1, 2, -3, -3, 2, 1, 8],
    [8, 1, 2, -3, -3, 2, 1, 8],
    [11, -4, 2, 2, 2, 2, -4, 11],
    [-3, -7, -4, 1, 1, -4, -7, -3],
    [30, -3, 11, 8, 8, 11, -3, 30],
];

/// Very strong corners, strongly negative X-squares.
pub const CLASSIC_SQUARES: SquareTable = [
    [100, -5, 11, 6, 6, 11, -5, 100],
    [-5, -10, 1, 3, 3, 1, -10, -5],
    [11, 1, 5, 4, 4, 5, 1, 11],
    [6, 3, 4, 2, 2, 4, 3, 6],
    [6, 3, 4, 2, 2, 4, 3, 6],
    [11, 1, 5, 4, 4, 5, 1, 11],
    [-5, -10, 1, 3, 3, 1, -10, -5],
    [100, -5, 11, 6, 6, 11, -5, 100],
];

/// All squares positive, rising toward the edges.
pub const EDGES_SQUARES: SquareTable = [
    [10, 2, 4, 4, 4, 4, 2, 10],
    [2, 1, 2, 2, 2, 2, 1, 2],
    [4, 2, 3, 3, 3, 3, 2, 4],
    [4, 2, 3, 3, 3, 3, 2, 4],
    [4, 2, 3, 3, 3, 3, 2, 4],
    [4, 2, 3, 3, 3, 3, 2, 4],
    [2, 1, 2, 2, 2, 2, 1, 2],
    [10, 2, 4, 4, 4, 4, 2, 10],
];

/// Small-magnitude table, for tunings dominated by disc count.
pub const GREEDY_SQUARES: SquareTable = [
    [4, -3, 2, 2, 2, 2, -3, 4],
    [-3, -4, -1, -1, -1, -1, -4, -3],
    [2, -1, 1, 0, 0, 1, -1, 2],
    [2, -1, 0, 1, 1, 0, -1, 2],
    [2, -1, 0, 1, 1, 0, -1, 2],
    [2, -1, 1, 0, 0, 1, -1, 2],
    [-3, -4, -1, -1, -1, -1, -4, -3],
    [4, -3, 2, 2, 2, 2, -3, 4],
];

/// Weights for each term of the heuristic evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalWeights {
    /// Positional value of each square.
    pub squares: SquareTable,
    /// Multiplier on the positional table sum.
    pub square: i32,
    /// Per disc of disc differential.
    pub disc: i32,
    /// Per owned corner.
    pub corner: i32,
    /// Per disc in an unbroken run along an edge leaving an owned corner.
    pub edge_run: i32,
    /// Extra bonus when such a run reaches the next corner.
    pub full_edge: i32,
    /// Penalty per disc on a square next to an empty corner. Diagonal squares count double.
    pub corner_adjacent: i32,
    /// Multiplier on the mobility term, which ranges over [-100, 100].
    pub mobility: f64,
    /// Bonus for a finished game won, penalty for one lost.
    pub terminal: i32,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Preset::Balanced.weights()
    }
}

/// Built-in tunings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    #[default]
    Balanced,
    Classic,
    Edges,
    Greedy,
}

impl Preset {
    pub fn weights(self) -> EvalWeights {
        let balanced = EvalWeights {
            squares: BALANCED_SQUARES,
            square: 4,
            disc: 1,
            corner: 100,
            edge_run: 3,
            full_edge: 10,
            corner_adjacent: 12,
            mobility: 0.8,
            terminal: 100_000,
        };

        match self {
            Preset::Balanced => balanced,
            Preset::Classic => EvalWeights {
                squares: CLASSIC_SQUARES,
                square: 2,
                corner: 0,
                edge_run: 2,
                ..balanced
            },
            Preset::Edges => EvalWeights {
                squares: EDGES_SQUARES,
                square: 6,
                corner_adjacent: 20,
                ..balanced
            },
            Preset::Greedy => EvalWeights {
                squares: GREEDY_SQUARES,
                disc: 10,
                mobility: 0.2,
                ..balanced
            },
        }
    }
}

#[derive(Debug, Display, Error, From)]
pub enum LoadWeightsError {
    #[display(fmt = "cannot read weights file: {}", _0)]
    Io(std::io::Error),
    #[display(fmt = "invalid weights file: {}", _0)]
    Json(serde_json::Error),
}

impl EvalWeights {
    /// Parse weights from JSON. Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, LoadWeightsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load weights from a JSON file.
    pub fn load(path: &Path) -> Result<Self, LoadWeightsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
