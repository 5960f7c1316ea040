//! Step and direction tables for the mailbox move generator.
//!
//! Each entry is a `(row, col)` offset. Knights and kings take one step per
//! entry; bishops, rooks and queens repeat a direction until blocked.

use crate::game_state::chess_types::Coords;

const fn step(row: i8, col: i8) -> Coords {
    Coords::new(row, col)
}

pub const KNIGHT_STEPS: [Coords; 8] = [
    step(-1, -2),
    step(-2, -1),
    step(-1, 2),
    step(-2, 1),
    step(1, -2),
    step(2, -1),
    step(1, 2),
    step(2, 1),
];

pub const BISHOP_DIRECTIONS: [Coords; 4] = [step(-1, -1), step(-1, 1), step(1, -1), step(1, 1)];

pub const ROOK_DIRECTIONS: [Coords; 4] = [step(-1, 0), step(0, -1), step(0, 1), step(1, 0)];

/// Rook directions first, then bishop directions.
pub const QUEEN_DIRECTIONS: [Coords; 8] = [
    step(-1, 0),
    step(0, -1),
    step(0, 1),
    step(1, 0),
    step(-1, -1),
    step(-1, 1),
    step(1, -1),
    step(1, 1),
];

pub const KING_STEPS: [Coords; 8] = [
    step(-1, -1),
    step(-1, 0),
    step(-1, 1),
    step(0, -1),
    step(0, 1),
    step(1, -1),
    step(1, 0),
    step(1, 1),
];

/// Diagonal column offsets for pawn captures.
pub const PAWN_CAPTURE_COLS: [i8; 2] = [-1, 1];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_have_no_duplicates_or_zero_steps() {
        for table in [&KNIGHT_STEPS[..], &BISHOP_DIRECTIONS, &ROOK_DIRECTIONS, &QUEEN_DIRECTIONS, &KING_STEPS] {
            for (i, a) in table.iter().enumerate() {
                assert_ne!(*a, Coords::new(0, 0));
                for b in &table[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn queen_is_rook_plus_bishop() {
        assert_eq!(&QUEEN_DIRECTIONS[..4], &ROOK_DIRECTIONS);
        assert_eq!(&QUEEN_DIRECTIONS[4..], &BISHOP_DIRECTIONS);
    }
}
