//! Monte Carlo Tree Search (MCTS) for AlphaZero-style chess move selection.
//!
//! This crate is game-agnostic at the seams: positions, legality and game
//! end come from a [`RulesEngine`], priors and values from an [`Evaluator`].
//! Moves cross the evaluator boundary as indices into the 4672-entry policy
//! space defined by `move-codec`.
//!
//! # Overview
//!
//! Each simulation consists of:
//!
//! 1. **Selection**: Descend from the root by PUCT, counting a visit on every
//!    expanded node passed through
//! 2. **Evaluation**: Call the evaluator on the first unvisited node (or take
//!    the fixed value of a terminal one)
//! 3. **Expansion**: Turn an evaluated node's top-k priors into children,
//!    keeping only moves that decode and are legal
//! 4. **Backpropagation**: Add the value to every ancestor, flipping its sign
//!    each ply
//!
//! Values are always stored from the perspective of the side to move at the
//! node, so a parent scores a child as `-Q + c_puct * P * sqrt(N) / (1 + n)`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use games_chess::{ChessPosition, ChessRules, UniformEvaluator};
//! use mcts::{choose_move, run_mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let rules = ChessRules;
//! let evaluator = UniformEvaluator;
//! let config = MctsConfig::for_testing();
//!
//! let result = run_mcts(&rules, &evaluator, config.clone(), ChessPosition::starting()).unwrap();
//! println!("Best: {:?}", result.distribution.best());
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(config.seed);
//! let decision = choose_move(&rules, &evaluator, &config, &ChessPosition::starting(), &mut rng).unwrap();
//! println!("Play {}", decision.mv);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_simulations`: Number of simulations per search (default: 800)
//! - `top_k`: Candidate moves kept per node (default: 10)
//! - `c_puct`: Exploration constant (default: 2.5)
//! - `unseen_prior`: Prior for a child missing from the cached top-k (default: 0.1)
//! - `confidence_threshold`: Prior above which search is skipped (default: 0.95)
//! - `temperature`: Temperature for move selection (1.0 = proportional, 0.0 = greedy)

pub mod config;
pub mod decision;
pub mod distribution;
pub mod evaluator;
pub mod node;
pub mod rules;
pub mod search;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main types
pub use config::MctsConfig;
pub use decision::{choose_move, policy_move, Decision, DecisionSource};
pub use distribution::{MoveDistribution, MoveWeight};
pub use evaluator::{rank_policy, EvalResult, Evaluator, EvaluatorError};
pub use node::{MctsNode, NodeId, NodeState};
pub use rules::{RulesEngine, RulesError, TerminalStatus};
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
