//! Standard chess for the MCTS engine.
//!
//! This crate plugs the `chess` crate's move generator into the search's
//! collaborator traits and provides two reference evaluators.
//!
//! # Usage
//!
//! ```rust
//! use games_chess::{ChessPosition, ChessRules, UniformEvaluator};
//! use mcts::{run_mcts, MctsConfig};
//!
//! let position: ChessPosition = "7k/8/8/8/8/8/8/KR6 w - - 0 1".parse().unwrap();
//! let result = run_mcts(
//!     &ChessRules,
//!     &UniformEvaluator,
//!     MctsConfig::for_testing().with_simulations(20),
//!     position,
//! )
//! .unwrap();
//! assert!(!result.distribution.is_empty());
//! ```

mod evaluators;
mod position;
mod rules;

pub use evaluators::{material_balance, MaterialEvaluator, UniformEvaluator};
pub use position::{to_chess_move, to_codec_move, ChessPosition, PositionError};
pub use rules::ChessRules;

#[cfg(test)]
mod tests;
