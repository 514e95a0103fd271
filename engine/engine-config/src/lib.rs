//! Centralized configuration loading from config.toml.
//!
//! This crate provides the configuration structs and loading logic used by
//! the player binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`CHESS_MCTS_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! Command-line flags of the binary sit above all three.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! CHESS_MCTS_<SECTION>_<KEY>=value
//!
//! Examples:
//!     CHESS_MCTS_COMMON_LOG_LEVEL=debug
//!     CHESS_MCTS_MCTS_NUM_SIMULATIONS=1600
//!     CHESS_MCTS_MCTS_CONFIDENCE_THRESHOLD=1.1
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_ENV, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
