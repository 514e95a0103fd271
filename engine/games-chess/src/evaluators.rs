//! Reference evaluators for chess.
//!
//! Neither of these is a trained network. They give the search something
//! deterministic to work with in tests, benchmarks and the CLI.

use chess::{Board, ChessMove, Color, MoveGen, Piece, ALL_PIECES};
use mcts::{EvalResult, Evaluator, EvaluatorError};
use move_codec::{encode, POLICY_SIZE};
use tracing::trace;

use crate::position::{to_codec_move, ChessPosition};

/// Policy index of a legal `chess` move.
fn policy_index(mv: ChessMove) -> Option<usize> {
    let codec_move = to_codec_move(mv)?;
    encode(&codec_move).ok().map(|index| index as usize)
}

/// Uniform evaluator for testing.
///
/// Returns a uniform policy over the legal moves and a value of 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformEvaluator;

impl UniformEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator<ChessPosition> for UniformEvaluator {
    fn evaluate(&self, position: &ChessPosition) -> Result<EvalResult, EvaluatorError> {
        let mut policy = vec![0.0; POLICY_SIZE];

        let indices: Vec<usize> = MoveGen::new_legal(position.board())
            .filter_map(policy_index)
            .collect();

        if indices.is_empty() {
            // No legal moves - terminal state
            return Ok(EvalResult { policy, value: 0.0 });
        }

        let prob = 1.0 / indices.len() as f32;
        for index in indices {
            policy[index] = prob;
        }

        Ok(EvalResult { policy, value: 0.0 })
    }
}

fn piece_value(piece: Piece) -> f32 {
    match piece {
        Piece::Pawn => 1.0,
        Piece::Knight => 3.0,
        Piece::Bishop => 3.0,
        Piece::Rook => 5.0,
        Piece::Queen => 9.0,
        Piece::King => 0.0,
    }
}

/// Material balance in pawns, positive when `color` is ahead.
pub fn material_balance(board: &Board, color: Color) -> f32 {
    ALL_PIECES
        .iter()
        .map(|&piece| {
            let ours = (board.pieces(piece) & board.color_combined(color)).popcnt();
            let theirs = (board.pieces(piece) & board.color_combined(!color)).popcnt();
            piece_value(piece) * (ours as f32 - theirs as f32)
        })
        .sum()
}

/// Material-counting evaluator.
///
/// The value is `tanh(balance / scale)` for the side to move. Priors favour
/// captures of valuable pieces by cheap ones and promotions, then are
/// normalised over the legal moves.
#[derive(Debug, Clone, Copy)]
pub struct MaterialEvaluator {
    /// Pawns of advantage that map to a value of tanh(1) ≈ 0.76.
    pub scale: f32,
}

impl Default for MaterialEvaluator {
    fn default() -> Self {
        Self { scale: 8.0 }
    }
}

impl MaterialEvaluator {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    /// Unnormalised prior weight of a legal move.
    fn move_weight(board: &Board, mv: ChessMove) -> f32 {
        let mut weight = 1.0;

        if let Some(victim) = board.piece_on(mv.get_dest()) {
            let attacker = board.piece_on(mv.get_source()).unwrap_or(Piece::Pawn);
            // MVV-LVA: most valuable victim first, cheapest attacker breaks ties
            weight += 2.0 * piece_value(victim) - 0.1 * piece_value(attacker);
        }

        if let Some(promotion) = mv.get_promotion() {
            weight += piece_value(promotion);
        }

        weight.max(0.1)
    }
}

impl Evaluator<ChessPosition> for MaterialEvaluator {
    fn evaluate(&self, position: &ChessPosition) -> Result<EvalResult, EvaluatorError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(EvaluatorError::ModelError(format!(
                "material scale must be positive, got {}",
                self.scale
            )));
        }

        let board = position.board();
        let mut policy = vec![0.0; POLICY_SIZE];

        let weighted: Vec<(usize, f32)> = MoveGen::new_legal(board)
            .filter_map(|mv| policy_index(mv).map(|index| (index, Self::move_weight(board, mv))))
            .collect();

        let total: f32 = weighted.iter().map(|(_, w)| w).sum();
        if total > 0.0 {
            for (index, weight) in weighted {
                policy[index] = weight / total;
            }
        }

        let balance = material_balance(board, board.side_to_move());
        let value = (balance / self.scale).tanh();
        trace!(fen = %position, balance, value, "Material evaluation");

        Ok(EvalResult { policy, value })
    }
}
