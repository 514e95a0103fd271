//! Chess positions and conversions to the codec's board primitives.

use std::fmt;
use std::str::FromStr;

use chess::{Board, ChessMove, File, Piece, Rank};
use move_codec::{BoardView, Color, Move, Promotion, Square};
use thiserror::Error;

/// Errors from building a position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },
}

/// A full chess position (placement, side to move, castling, en passant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessPosition(Board);

impl ChessPosition {
    /// The standard starting position.
    pub fn starting() -> Self {
        Self(Board::default())
    }

    pub fn from_board(board: Board) -> Self {
        Self(board)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.0
    }

    pub fn side_to_move(&self) -> Color {
        to_codec_color(self.0.side_to_move())
    }
}

impl Default for ChessPosition {
    fn default() -> Self {
        Self::starting()
    }
}

impl FromStr for ChessPosition {
    type Err = PositionError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        Board::from_str(fen.trim())
            .map(Self)
            .map_err(|e| PositionError::InvalidFen {
                fen: fen.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl BoardView for ChessPosition {
    fn pawn_on(&self, square: Square) -> Option<Color> {
        let sq = to_chess_square(square);
        match self.0.piece_on(sq) {
            Some(Piece::Pawn) => self.0.color_on(sq).map(to_codec_color),
            _ => None,
        }
    }
}

pub(crate) fn to_codec_color(color: chess::Color) -> Color {
    match color {
        chess::Color::White => Color::White,
        chess::Color::Black => Color::Black,
    }
}

pub(crate) fn to_chess_square(square: Square) -> chess::Square {
    chess::Square::make_square(
        Rank::from_index(square.rank() as usize),
        File::from_index(square.file() as usize),
    )
}

pub(crate) fn to_codec_square(square: chess::Square) -> Option<Square> {
    Square::new(
        square.get_file().to_index() as u8,
        square.get_rank().to_index() as u8,
    )
}

/// Codec move for a `chess` move. `None` only for a promotion to a piece
/// that cannot be promoted to.
pub fn to_codec_move(mv: ChessMove) -> Option<Move> {
    let from = to_codec_square(mv.get_source())?;
    let to = to_codec_square(mv.get_dest())?;
    let promotion = match mv.get_promotion() {
        None => None,
        Some(Piece::Queen) => Some(Promotion::Queen),
        Some(Piece::Rook) => Some(Promotion::Rook),
        Some(Piece::Bishop) => Some(Promotion::Bishop),
        Some(Piece::Knight) => Some(Promotion::Knight),
        Some(_) => return None,
    };
    Some(Move {
        from,
        to,
        promotion,
    })
}

pub fn to_chess_move(mv: &Move) -> ChessMove {
    let promotion = mv.promotion.map(|p| match p {
        Promotion::Queen => Piece::Queen,
        Promotion::Rook => Piece::Rook,
        Promotion::Bishop => Piece::Bishop,
        Promotion::Knight => Piece::Knight,
    });
    ChessMove::new(to_chess_square(mv.from), to_chess_square(mv.to), promotion)
}
