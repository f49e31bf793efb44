use anyhow::Context;
use clap::Parser;
use flipside_player::{
    decide, encode_action, EvalWeights, GameState, Heuristic, Preset, SearchConfig,
};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "flipside", about = "Choose an Othello move by alpha-beta search")]
struct Args {
    /// State file: side to move, board cells and the legal moves
    state: PathBuf,

    /// Action file the chosen "row col" line is written to
    action: PathBuf,

    /// Search depth in plies
    #[arg(long, default_value_t = 4)]
    depth: u8,

    /// Built-in evaluator weights
    #[arg(long, value_enum, default_value_t = Preset::Balanced)]
    preset: Preset,

    /// JSON weights file; takes precedence over --preset
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Search the full tree without alpha-beta pruning
    #[arg(long)]
    exhaustive: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let text = fs::read_to_string(&args.state)
        .with_context(|| format!("reading state file {}", args.state.display()))?;
    let state: GameState = text
        .parse()
        .with_context(|| format!("parsing state file {}", args.state.display()))?;

    let weights = match &args.weights {
        Some(path) => EvalWeights::load(path)
            .with_context(|| format!("loading weights from {}", path.display()))?,
        None => args.preset.weights(),
    };

    let config = SearchConfig {
        depth: args.depth,
        exhaustive: args.exhaustive,
    };

    match decide(&state, config, &Heuristic::new(weights)) {
        Some(mv) => {
            fs::write(&args.action, encode_action(mv))
                .with_context(|| format!("writing action file {}", args.action.display()))?;
        }
        None => info!("nothing to play; action file left untouched"),
    }

    Ok(())
}
