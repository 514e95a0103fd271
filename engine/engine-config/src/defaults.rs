//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time so
//! every binary starts from the same values.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    num_simulations: u32,
    top_k: usize,
    c_puct: f64,
    unseen_prior: f64,
    confidence_threshold: f64,
    temperature: f64,
    seed: u64,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn num_simulations() -> u32 {
    DEFAULTS.mcts.num_simulations
}
pub fn top_k() -> usize {
    DEFAULTS.mcts.top_k
}
pub fn c_puct() -> f64 {
    DEFAULTS.mcts.c_puct
}
pub fn unseen_prior() -> f64 {
    DEFAULTS.mcts.unseen_prior
}
pub fn confidence_threshold() -> f64 {
    DEFAULTS.mcts.confidence_threshold
}
pub fn temperature() -> f64 {
    DEFAULTS.mcts.temperature
}
pub fn seed() -> u64 {
    DEFAULTS.mcts.seed
}
