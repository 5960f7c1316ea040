//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable square names (e.g., `e4`) and `Coords`
//! for the FEN, notation and UCI layers.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Coords;

/// Convert a square name (for example: "e4") to coordinates.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Coords> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidSquare(square.to_owned()));
    }

    Ok(Coords::new((rank - b'1') as i8, (file - b'a') as i8))
}

/// Convert on-board coordinates to a square name (for example: "e4").
#[inline]
pub fn square_to_algebraic(coords: Coords) -> ChessResult<String> {
    if !coords.is_valid() {
        return Err(ChessError::InvalidSquare(format!("({}, {})", coords.row, coords.col)));
    }

    let file_char = char::from(b'a' + coords.col as u8);
    let rank_char = char::from(b'1' + coords.row as u8);

    Ok(format!("{file_char}{rank_char}"))
}
