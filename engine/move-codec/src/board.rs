//! Board primitives shared by the codec and its callers.

use std::fmt;
use std::ops::Not;
use std::str::FromStr;

use thiserror::Error;

/// Side to move or owner of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Rank delta of a single pawn push for this side.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank (0-based) a pawn must stand on to promote with its next move.
    #[inline]
    pub fn penultimate_rank(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Rank (0-based) on which this side's pawns promote.
    #[inline]
    pub fn last_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// A board square. File and rank are both 0-based, `a1` is `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub fn new(file: u8, rank: u8) -> Option<Square> {
        (file < 8 && rank < 8).then(|| Square(rank * 8 + file))
    }

    /// Square addressed by the policy vector's source-square number
    /// (row-major from the eighth rank down, `a8` = 0).
    pub fn from_policy_index(index: usize) -> Option<Square> {
        if index >= 64 {
            return None;
        }
        let row = (index / 8) as u8;
        let col = (index % 8) as u8;
        Square::new(col, 7 - row)
    }

    /// Inverse of [`Square::from_policy_index`].
    #[inline]
    pub fn policy_index(self) -> usize {
        (7 - self.rank() as usize) * 8 + self.file() as usize
    }

    #[inline]
    pub fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Square reached by moving `rank_delta` ranks and `file_delta` files,
    /// or `None` if that leaves the board.
    pub fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Square> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Square::new(file as u8, rank as u8)
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            (b'a' + self.file()) as char,
            (b'1' + self.rank()) as char
        )
    }
}

impl FromStr for Square {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(MoveParseError::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::new(file, rank).ok_or_else(|| MoveParseError::InvalidSquare(s.to_string()))
    }
}

/// Piece a pawn promotes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    /// Lowercase UCI suffix.
    pub fn as_char(self) -> char {
        match self {
            Promotion::Queen => 'q',
            Promotion::Rook => 'r',
            Promotion::Bishop => 'b',
            Promotion::Knight => 'n',
        }
    }

    pub fn from_char(c: char) -> Option<Promotion> {
        match c.to_ascii_lowercase() {
            'q' => Some(Promotion::Queen),
            'r' => Some(Promotion::Rook),
            'b' => Some(Promotion::Bishop),
            'n' => Some(Promotion::Knight),
            _ => None,
        }
    }
}

/// A move in UCI long algebraic form: source, destination, optional promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Promotion>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, promotion: Promotion) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// `(rank_delta, file_delta)` from source to destination.
    #[inline]
    pub fn delta(&self) -> (i8, i8) {
        (
            self.to.rank() as i8 - self.from.rank() as i8,
            self.to.file() as i8 - self.from.file() as i8,
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.as_char())?;
        }
        Ok(())
    }
}

/// Errors from parsing UCI squares and moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("Invalid square: {0}")]
    InvalidSquare(String),

    #[error("Invalid move: {0}")]
    InvalidMove(String),
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(MoveParseError::InvalidMove(s.to_string()));
        }
        let from: Square = s[0..2].parse()?;
        let to: Square = s[2..4].parse()?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => Some(
                Promotion::from_char(c).ok_or_else(|| MoveParseError::InvalidMove(s.to_string()))?,
            ),
        };
        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

/// The slice of a position the codec needs to resolve promotions.
pub trait BoardView {
    /// Color of the pawn standing on `square`, if any.
    fn pawn_on(&self, square: Square) -> Option<Color>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_index_layout() {
        let a8 = Square::from_policy_index(0).unwrap();
        assert_eq!(a8.to_string(), "a8");
        let h1 = Square::from_policy_index(63).unwrap();
        assert_eq!(h1.to_string(), "h1");
        let e2: Square = "e2".parse().unwrap();
        assert_eq!(e2.policy_index(), 52);
        assert!(Square::from_policy_index(64).is_none());

        for i in 0..64 {
            assert_eq!(Square::from_policy_index(i).unwrap().policy_index(), i);
        }
    }

    #[test]
    fn test_offset_stays_on_board() {
        let a1: Square = "a1".parse().unwrap();
        assert_eq!(a1.offset(1, 1).unwrap().to_string(), "b2");
        assert!(a1.offset(-1, 0).is_none());
        assert!(a1.offset(0, -1).is_none());

        let h8: Square = "h8".parse().unwrap();
        assert!(h8.offset(1, 0).is_none());
        assert_eq!(h8.offset(-7, -7).unwrap().to_string(), "a1");
    }

    #[test]
    fn test_move_uci_round_trip() {
        for text in ["e2e4", "e7e8q", "a2a1n", "g1f3", "h7g8r"] {
            let mv: Move = text.parse().unwrap();
            assert_eq!(mv.to_string(), text);
        }
    }

    #[test]
    fn test_move_parse_rejects_garbage() {
        assert!("e2".parse::<Move>().is_err());
        assert!("e2e9".parse::<Move>().is_err());
        assert!("e7e8k".parse::<Move>().is_err());
        assert!("i1a1".parse::<Move>().is_err());
    }

    #[test]
    fn test_color_ranks() {
        assert_eq!(Color::White.penultimate_rank(), 6);
        assert_eq!(Color::Black.penultimate_rank(), 1);
        assert_eq!(Color::White.last_rank(), 7);
        assert_eq!(Color::Black.last_rank(), 0);
        assert_eq!(!Color::White, Color::Black);
    }
}
