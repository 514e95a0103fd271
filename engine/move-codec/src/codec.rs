//! Policy index <-> move conversion.

use thiserror::Error;

use crate::board::{BoardView, Move, Promotion, Square};
use crate::tables::{
    underpromotion, underpromotion_code, DIRECTIONS, DIRECTION_CODES_BY_DELTA,
    FIRST_UNDERPROMOTION_CODE,
};
use crate::{MoveIndex, DIRECTION_CODES, POLICY_SIZE};

/// Errors from decoding a policy index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Policy index {0} out of range (expected < 4672)")]
    IndexOutOfRange(MoveIndex),

    #[error("Policy index {index} moves off the board from {from}")]
    OffBoard { index: MoveIndex, from: Square },

    #[error("Policy index {index} is an underpromotion but {from} holds no pawn about to promote")]
    AmbiguousPromotionContext { index: MoveIndex, from: Square },
}

/// Errors from encoding a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("Move {0} is neither a slide nor a knight jump")]
    UnsupportedDelta(Move),

    #[error("Move {0} is not a single-step pawn underpromotion")]
    InvalidUnderpromotion(Move),
}

/// Decode a policy index into a move, using `board` to resolve promotions.
///
/// Slides and knight jumps get a queen suffix when they take a pawn from its
/// penultimate rank onto its last rank. Underpromotion codes take their
/// forward direction from the color of the pawn on the source square.
pub fn decode(index: MoveIndex, board: &impl BoardView) -> Result<Move, DecodeError> {
    let slot = index as usize;
    if slot >= POLICY_SIZE {
        return Err(DecodeError::IndexOutOfRange(index));
    }

    let code = slot % DIRECTION_CODES;
    let from = Square::from_policy_index(slot / DIRECTION_CODES)
        .ok_or(DecodeError::IndexOutOfRange(index))?;
    let promoting_pawn = board
        .pawn_on(from)
        .filter(|color| from.rank() == color.penultimate_rank());

    if code < FIRST_UNDERPROMOTION_CODE {
        let (rank_delta, file_delta) = DIRECTIONS[code];
        let to = from
            .offset(rank_delta, file_delta)
            .ok_or(DecodeError::OffBoard { index, from })?;

        return Ok(match promoting_pawn {
            Some(color) if to.rank() == color.last_rank() => {
                Move::with_promotion(from, to, Promotion::Queen)
            }
            _ => Move::new(from, to),
        });
    }

    let (file_delta, piece) =
        underpromotion(code).ok_or(DecodeError::IndexOutOfRange(index))?;
    let color = promoting_pawn.ok_or(DecodeError::AmbiguousPromotionContext { index, from })?;
    let to = from
        .offset(color.forward(), file_delta)
        .ok_or(DecodeError::OffBoard { index, from })?;

    Ok(Move::with_promotion(from, to, piece))
}

/// Encode a move as a policy index. Inverse of [`decode`].
///
/// Queen promotions share the index of the plain pawn move.
pub fn encode(mv: &Move) -> Result<MoveIndex, EncodeError> {
    let (rank_delta, file_delta) = mv.delta();

    let code = match mv.promotion {
        Some(piece @ (Promotion::Knight | Promotion::Bishop | Promotion::Rook)) => {
            if rank_delta.abs() != 1 {
                return Err(EncodeError::InvalidUnderpromotion(*mv));
            }
            underpromotion_code(file_delta, piece)
                .ok_or(EncodeError::InvalidUnderpromotion(*mv))?
        }
        Some(Promotion::Queen) | None => *DIRECTION_CODES_BY_DELTA
            .get(&(rank_delta, file_delta))
            .ok_or(EncodeError::UnsupportedDelta(*mv))? as usize,
    };

    Ok((mv.from.policy_index() * DIRECTION_CODES + code) as MoveIndex)
}
