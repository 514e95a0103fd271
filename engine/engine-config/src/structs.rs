//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_num_sims() -> u32 {
    defaults::num_simulations()
}
fn d_top_k() -> usize {
    defaults::top_k()
}
fn d_c_puct() -> f64 {
    defaults::c_puct()
}
fn d_unseen_prior() -> f64 {
    defaults::unseen_prior()
}
fn d_confidence_threshold() -> f64 {
    defaults::confidence_threshold()
}
fn d_temperature() -> f64 {
    defaults::temperature()
}
fn d_seed() -> u64 {
    defaults::seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
}

/// Settings shared by every binary
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    /// Default tracing filter; `RUST_LOG` takes precedence when set
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_num_sims")]
    pub num_simulations: u32,
    #[serde(default = "d_top_k")]
    pub top_k: usize,
    #[serde(default = "d_c_puct")]
    pub c_puct: f64,
    #[serde(default = "d_unseen_prior")]
    pub unseen_prior: f64,
    /// Prior at or above which the top move is played without searching
    #[serde(default = "d_confidence_threshold")]
    pub confidence_threshold: f64,
    #[serde(default = "d_temperature")]
    pub temperature: f64,
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: defaults::num_simulations(),
            top_k: defaults::top_k(),
            c_puct: defaults::c_puct(),
            unseen_prior: defaults::unseen_prior(),
            confidence_threshold: defaults::confidence_threshold(),
            temperature: defaults::temperature(),
            seed: defaults::seed(),
        }
    }
}
