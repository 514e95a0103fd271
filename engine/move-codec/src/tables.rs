//! Static direction and promotion tables.
//!
//! All deltas are `(rank_delta, file_delta)`.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::board::Promotion;

/// Slide directions in code order: N, S, E, W, NE, SW, SE, NW.
const SLIDE_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub(crate) const MAX_SLIDE: usize = 7;
pub(crate) const FIRST_KNIGHT_CODE: usize = SLIDE_DIRECTIONS.len() * MAX_SLIDE;
pub(crate) const FIRST_UNDERPROMOTION_CODE: usize = FIRST_KNIGHT_CODE + KNIGHT_JUMPS.len();

/// Delta for every direction code below [`FIRST_UNDERPROMOTION_CODE`].
pub(crate) const DIRECTIONS: [(i8, i8); FIRST_UNDERPROMOTION_CODE] = build_directions();

const fn build_directions() -> [(i8, i8); FIRST_UNDERPROMOTION_CODE] {
    let mut table = [(0i8, 0i8); FIRST_UNDERPROMOTION_CODE];
    let mut dir = 0;
    while dir < SLIDE_DIRECTIONS.len() {
        let mut dist = 1;
        while dist <= MAX_SLIDE {
            let (dr, df) = SLIDE_DIRECTIONS[dir];
            table[dir * MAX_SLIDE + dist - 1] = (dr * dist as i8, df * dist as i8);
            dist += 1;
        }
        dir += 1;
    }
    let mut k = 0;
    while k < KNIGHT_JUMPS.len() {
        table[FIRST_KNIGHT_CODE + k] = KNIGHT_JUMPS[k];
        k += 1;
    }
    table
}

/// Target file offsets of an underpromotion, in code order.
pub(crate) const UNDERPROMOTION_FILE_DELTAS: [i8; 3] = [1, -1, 0];

/// Underpromotion pieces, in code order.
pub(crate) const UNDERPROMOTION_PIECES: [Promotion; 3] =
    [Promotion::Knight, Promotion::Bishop, Promotion::Rook];

/// Inverse of [`DIRECTIONS`].
pub(crate) static DIRECTION_CODES_BY_DELTA: Lazy<HashMap<(i8, i8), u8>> = Lazy::new(|| {
    DIRECTIONS
        .iter()
        .enumerate()
        .map(|(code, &delta)| (delta, code as u8))
        .collect()
});

/// Split an underpromotion code into `(file_delta, piece)`.
#[inline]
pub(crate) fn underpromotion(code: usize) -> Option<(i8, Promotion)> {
    let offset = code.checked_sub(FIRST_UNDERPROMOTION_CODE)?;
    let direction = *UNDERPROMOTION_FILE_DELTAS.get(offset % 3)?;
    let piece = *UNDERPROMOTION_PIECES.get(offset / 3)?;
    Some((direction, piece))
}

/// Underpromotion code for a `(file_delta, piece)` pair.
pub(crate) fn underpromotion_code(file_delta: i8, piece: Promotion) -> Option<usize> {
    let direction = UNDERPROMOTION_FILE_DELTAS
        .iter()
        .position(|&d| d == file_delta)?;
    let piece = UNDERPROMOTION_PIECES.iter().position(|&p| p == piece)?;
    Some(FIRST_UNDERPROMOTION_CODE + piece * 3 + direction)
}
