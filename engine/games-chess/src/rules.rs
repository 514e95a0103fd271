//! Standard chess rules backed by the `chess` crate's move generator.

use chess::{BoardStatus, MoveGen};
use mcts::{RulesEngine, RulesError, TerminalStatus};
use move_codec::Move;

use crate::position::{to_chess_move, to_codec_move, ChessPosition};

/// Rules of standard chess.
///
/// Game end is checkmate, stalemate, or bare kings. Repetition and the
/// fifty-move rule need game history, which a single position does not carry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessRules;

impl RulesEngine for ChessRules {
    type Position = ChessPosition;

    fn legal_moves(&self, position: &ChessPosition) -> Vec<Move> {
        MoveGen::new_legal(position.board())
            .filter_map(to_codec_move)
            .collect()
    }

    fn is_legal(&self, position: &ChessPosition, mv: &Move) -> bool {
        position.board().legal(to_chess_move(mv))
    }

    fn apply(&self, position: &ChessPosition, mv: &Move) -> Result<ChessPosition, RulesError> {
        let chess_move = to_chess_move(mv);
        if !position.board().legal(chess_move) {
            return Err(RulesError::IllegalMove {
                mv: *mv,
                position: position.to_string(),
            });
        }
        Ok(ChessPosition::from_board(
            position.board().make_move_new(chess_move),
        ))
    }

    fn terminal_status(&self, position: &ChessPosition) -> TerminalStatus {
        let board = position.board();
        match board.status() {
            BoardStatus::Checkmate => TerminalStatus::Checkmate,
            BoardStatus::Stalemate => TerminalStatus::Stalemate,
            BoardStatus::Ongoing if board.combined().popcnt() == 2 => TerminalStatus::Draw,
            BoardStatus::Ongoing => TerminalStatus::Ongoing,
        }
    }
}
