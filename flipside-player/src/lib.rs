//! `flipside-player` chooses Othello moves by depth-limited alpha-beta search.
//!
//!  - [`eval`] scores positions with a weighted heuristic; any
//!    `Fn(&Board, Player) -> i32` also works as an evaluator.
//!  - [`weights`] holds the tunable weights, built-in presets and JSON loading.
//!  - [`search`] is the minimax search itself, with and without pruning.
//!  - [`state`] reads and writes the text format exchanged with the game host.
//!  - [`driver`] ties these together for one move decision.

pub mod driver;
pub mod eval;
pub mod search;
pub mod state;
pub mod weights;

pub use driver::{decide, SearchConfig};
pub use eval::{Evaluator, Heuristic};
pub use search::{best_move, best_move_exhaustive, Scored, Search, SearchStats};
pub use state::{encode_action, GameState, ParseStateError};
pub use weights::{EvalWeights, LoadWeightsError, Preset};
