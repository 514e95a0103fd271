//! Command-line configuration for the player.
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use engine_config::{load_config, CentralConfig};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}
fn default_num_simulations() -> u32 {
    CENTRAL_CONFIG.mcts.num_simulations
}
fn default_top_k() -> usize {
    CENTRAL_CONFIG.mcts.top_k
}
fn default_c_puct() -> f32 {
    CENTRAL_CONFIG.mcts.c_puct as f32
}
fn default_unseen_prior() -> f32 {
    CENTRAL_CONFIG.mcts.unseen_prior as f32
}
fn default_confidence_threshold() -> f32 {
    CENTRAL_CONFIG.mcts.confidence_threshold as f32
}
fn default_temperature() -> f32 {
    CENTRAL_CONFIG.mcts.temperature as f32
}
fn default_seed() -> u64 {
    CENTRAL_CONFIG.mcts.seed
}

/// Which built-in evaluator scores positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EvaluatorKind {
    /// Uniform priors over legal moves, value 0
    Uniform,
    /// Capture-weighted priors, material-balance value
    Material,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "chess-mcts")]
#[command(about = "Pick a chess move with PUCT Monte Carlo Tree Search")]
#[command(
    long_about = "Evaluates a FEN position with a policy/value evaluator and runs
MCTS over the 4672-entry move-index space to choose a move.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Position to move from, as FEN
    #[arg(default_value = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")]
    pub fen: String,

    /// Evaluator used for priors and values
    #[arg(long, value_enum, default_value_t = EvaluatorKind::Material)]
    pub evaluator: EvaluatorKind,

    /// Number of MCTS simulations
    #[arg(long, default_value_t = default_num_simulations())]
    pub num_simulations: u32,

    /// Candidate moves kept per node
    #[arg(long, default_value_t = default_top_k())]
    pub top_k: usize,

    /// PUCT exploration constant
    #[arg(long, default_value_t = default_c_puct())]
    pub c_puct: f32,

    /// Prior for a child missing from its parent's top-k
    #[arg(long, default_value_t = default_unseen_prior())]
    pub unseen_prior: f32,

    /// Play the top prior without searching when it reaches this value
    /// (above 1.0 always searches)
    #[arg(long, default_value_t = default_confidence_threshold())]
    pub confidence_threshold: f32,

    /// Sampling temperature over visit frequencies (0 = most visited)
    #[arg(long, default_value_t = default_temperature())]
    pub temperature: f32,

    /// Seed for temperature sampling
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Skip the search and play the best legal prior
    #[arg(long)]
    pub policy_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.fen.trim().is_empty() {
            return Err(anyhow!("fen cannot be empty"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        self.mcts_config().validate()?;

        Ok(())
    }

    /// Search parameters for the engine.
    pub fn mcts_config(&self) -> mcts::MctsConfig {
        mcts::MctsConfig::default()
            .with_simulations(self.num_simulations)
            .with_top_k(self.top_k)
            .with_c_puct(self.c_puct)
            .with_unseen_prior(self.unseen_prior)
            .with_confidence_threshold(self.confidence_threshold)
            .with_temperature(self.temperature)
            .with_seed(self.seed)
    }
}
