//! Evaluator trait for position evaluation.
//!
//! The evaluator provides a policy over the 4672-entry move-index space and a
//! value estimate for a position. In production this is a neural network;
//! the search only sees it through [`Evaluator`].

use std::cmp::Ordering;

use move_codec::{MoveIndex, POLICY_SIZE};
use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Invalid evaluator output: {0}")]
    InvalidOutput(String),

    #[error("Model error: {0}")]
    ModelError(String),
}

/// Result of evaluating a position.
#[derive(Debug, Clone)]
pub struct EvalResult {
    /// Probability distribution over move indices, length [`POLICY_SIZE`].
    pub policy: Vec<f32>,

    /// Value estimate for the side to move.
    /// Range: -1.0 (certain loss) to +1.0 (certain win).
    pub value: f32,
}

impl EvalResult {
    /// Check the output shape and ranges the search relies on.
    pub fn validate(&self) -> Result<(), EvaluatorError> {
        if self.policy.len() != POLICY_SIZE {
            return Err(EvaluatorError::InvalidOutput(format!(
                "policy has {} entries, expected {}",
                self.policy.len(),
                POLICY_SIZE
            )));
        }
        if !self.value.is_finite() || !(-1.0..=1.0).contains(&self.value) {
            return Err(EvaluatorError::InvalidOutput(format!(
                "value {} outside [-1, 1]",
                self.value
            )));
        }
        if let Some(i) = self.policy.iter().position(|p| !p.is_finite()) {
            return Err(EvaluatorError::InvalidOutput(format!(
                "policy entry {} is not finite",
                i
            )));
        }
        if let Some(i) = self.policy.iter().position(|&p| p < 0.0) {
            return Err(EvaluatorError::InvalidOutput(format!(
                "policy entry {} is negative ({})",
                i, self.policy[i]
            )));
        }
        Ok(())
    }

    /// All move indices ordered by descending probability.
    /// Equal probabilities keep ascending index order.
    pub fn ranked(&self) -> Vec<(MoveIndex, f32)> {
        rank_policy(&self.policy)
    }

    /// The `k` most probable move indices, highest first.
    pub fn top_k(&self, k: usize) -> Vec<(MoveIndex, f32)> {
        let mut ranked = self.ranked();
        ranked.truncate(k);
        ranked
    }
}

/// Sort a policy vector into `(index, probability)` pairs, highest first.
pub fn rank_policy(policy: &[f32]) -> Vec<(MoveIndex, f32)> {
    let mut ranked: Vec<(MoveIndex, f32)> = policy
        .iter()
        .enumerate()
        .map(|(i, &p)| (i as MoveIndex, p))
        .collect();
    // Stable sort: ties stay in index order.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked
}

/// Trait for position evaluators.
///
/// Implementations must be deterministic for a given position within one
/// search; the engine calls [`Evaluator::evaluate`] at most once per node.
pub trait Evaluator<P> {
    /// Evaluate a single position.
    fn evaluate(&self, position: &P) -> Result<EvalResult, EvaluatorError>;
}

impl<P, E: Evaluator<P> + ?Sized> Evaluator<P> for &E {
    fn evaluate(&self, position: &P) -> Result<EvalResult, EvaluatorError> {
        (**self).evaluate(position)
    }
}
