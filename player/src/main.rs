//! Player - pick a chess move for one position.
//!
//! Parses a FEN, evaluates it, and either plays a confident prior directly
//! or runs MCTS and picks from the root visit distribution. The chosen move
//! is printed to stdout in UCI form.

use anyhow::{Context, Result};
use clap::Parser;
use games_chess::{ChessPosition, ChessRules, MaterialEvaluator, UniformEvaluator};
use mcts::{choose_move, policy_move, Decision, Evaluator};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info};

mod config;

use crate::config::{Config, EvaluatorKind};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn decide<E: Evaluator<ChessPosition>>(
    config: &Config,
    evaluator: &E,
    position: &ChessPosition,
) -> Result<Decision> {
    let decision = if config.policy_only {
        policy_move(&ChessRules, evaluator, position, config.top_k)?
    } else {
        let mcts_config = config.mcts_config();
        let mut rng = ChaCha20Rng::seed_from_u64(mcts_config.seed);
        choose_move(&ChessRules, evaluator, &mcts_config, position, &mut rng)?
    };
    Ok(decision)
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let position: ChessPosition = config
        .fen
        .parse()
        .with_context(|| format!("cannot start from '{}'", config.fen))?;

    info!(
        fen = %position,
        evaluator = ?config.evaluator,
        num_simulations = config.num_simulations,
        top_k = config.top_k,
        "Choosing move"
    );

    let decision = match config.evaluator {
        EvaluatorKind::Uniform => decide(&config, &UniformEvaluator::new(), &position)?,
        EvaluatorKind::Material => decide(&config, &MaterialEvaluator::default(), &position)?,
    };

    for entry in decision.distribution.iter() {
        debug!(mv = %entry.mv, index = entry.move_index, weight = entry.weight, "Candidate");
    }
    info!(
        mv = %decision.mv,
        source = ?decision.source,
        value = decision.value,
        simulations = decision.simulations,
        candidates = decision.distribution.len(),
        "Move chosen"
    );

    println!("bestmove {}", decision.mv);

    Ok(())
}
