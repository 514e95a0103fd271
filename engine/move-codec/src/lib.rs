//! Policy-index move codec for chess.
//!
//! The evaluator's policy head emits a fixed vector of 4672 probabilities.
//! Each entry addresses one `(from_square, direction_code)` pair:
//!
//! ```text
//! index = from_square * 73 + direction_code
//!
//! direction_code  0..=55   queen-like slides, 8 directions x 7 distances
//! direction_code 56..=63   knight jumps
//! direction_code 64..=72   underpromotions, 3 pieces x 3 target directions
//! ```
//!
//! Source squares are numbered row by row from the eighth rank down, so
//! `a8` is 0 and `h1` is 63, matching the board planes fed to the evaluator.
//!
//! [`decode`] turns an index into a concrete [`Move`] given the position it
//! was produced for; the only context it needs is which pawn (if any) sits on
//! the source square, supplied through [`BoardView`]. [`encode`] is the exact
//! inverse and never needs a position.
//!
//! ```rust
//! use move_codec::{decode, encode, BoardView, Color, Move, Square};
//!
//! struct Empty;
//! impl BoardView for Empty {
//!     fn pawn_on(&self, _square: Square) -> Option<Color> {
//!         None
//!     }
//! }
//!
//! let mv: Move = "g1f3".parse().unwrap();
//! let index = encode(&mv).unwrap();
//! assert_eq!(decode(index, &Empty).unwrap(), mv);
//! ```

pub mod board;
pub mod codec;
mod tables;

pub use board::{BoardView, Color, Move, MoveParseError, Promotion, Square};
pub use codec::{decode, encode, DecodeError, EncodeError};

/// Index into the evaluator's policy vector.
pub type MoveIndex = u16;

/// Number of direction codes per source square.
pub const DIRECTION_CODES: usize = 73;

/// Length of the evaluator's policy vector.
pub const POLICY_SIZE: usize = 64 * DIRECTION_CODES;
