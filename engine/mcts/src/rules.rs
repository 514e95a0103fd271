//! Rules engine trait.
//!
//! The search never interprets positions itself. Legal move generation,
//! move application and game-end detection are delegated to a
//! [`RulesEngine`]; the only position detail the engine touches directly is
//! the pawn lookup the move codec needs, via [`BoardView`].

use move_codec::{BoardView, Move};
use thiserror::Error;

/// Errors reported by a rules engine.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Illegal move {mv} in position {position}")]
    IllegalMove { mv: Move, position: String },
}

/// Game status of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    Ongoing,
    /// The side to move is checkmated.
    Checkmate,
    Stalemate,
    /// Any other drawn ending (insufficient material, repetition, ...).
    Draw,
}

impl TerminalStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, TerminalStatus::Ongoing)
    }

    /// Fixed value of a finished game for the side to move.
    pub fn terminal_value(self) -> Option<f32> {
        match self {
            TerminalStatus::Ongoing => None,
            TerminalStatus::Checkmate => Some(-1.0),
            TerminalStatus::Stalemate | TerminalStatus::Draw => Some(0.0),
        }
    }
}

/// Game rules consumed by the search.
///
/// Implementations must be free of hidden state: calling any method twice
/// with the same arguments gives the same answer. A position classified
/// [`TerminalStatus::Ongoing`] must have at least one legal move.
pub trait RulesEngine {
    type Position: Clone + BoardView;

    /// All legal moves in `position`.
    fn legal_moves(&self, position: &Self::Position) -> Vec<Move>;

    /// Whether `mv` is legal in `position`.
    fn is_legal(&self, position: &Self::Position, mv: &Move) -> bool {
        self.legal_moves(position).contains(mv)
    }

    /// Position reached by playing `mv`. Never mutates `position`.
    fn apply(&self, position: &Self::Position, mv: &Move) -> Result<Self::Position, RulesError>;

    fn terminal_status(&self, position: &Self::Position) -> TerminalStatus;
}

impl<R: RulesEngine + ?Sized> RulesEngine for &R {
    type Position = R::Position;

    fn legal_moves(&self, position: &Self::Position) -> Vec<Move> {
        (**self).legal_moves(position)
    }

    fn is_legal(&self, position: &Self::Position, mv: &Move) -> bool {
        (**self).is_legal(position, mv)
    }

    fn apply(&self, position: &Self::Position, mv: &Move) -> Result<Self::Position, RulesError> {
        (**self).apply(position, mv)
    }

    fn terminal_status(&self, position: &Self::Position) -> TerminalStatus {
        (**self).terminal_status(position)
    }
}
