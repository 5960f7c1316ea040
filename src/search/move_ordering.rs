//! Move ordering for alpha-beta.
//!
//! Interesting moves go first: the principal-variation move from the previous
//! iteration, then promotions by promoted piece value, then captures by
//! captured piece value. Ordering only affects how many nodes are visited,
//! never the value of the search.

use std::cmp::Ordering;

use crate::game_state::chess_types::Position;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{piece_value, Score};

#[inline]
fn promotion_value(mv: &Move) -> Score {
    mv.promotion.map_or(0, piece_value)
}

#[inline]
fn capture_value(position: &Position, mv: &Move) -> Score {
    piece_value(position.piece_at(mv.to))
}

/// `Less` means `left` should be searched before `right`.
pub fn compare_moves(position: &Position, pv_move: &Move, left: &Move, right: &Move) -> Ordering {
    let left_pv = left == pv_move;
    let right_pv = right == pv_move;
    right_pv
        .cmp(&left_pv)
        .then_with(|| promotion_value(right).cmp(&promotion_value(left)))
        .then_with(|| capture_value(position, right).cmp(&capture_value(position, left)))
}

/// Sorts `moves` in search order. `pv_move` may be `Move::NULL` or absent
/// from the list.
pub fn order_moves(position: &Position, pv_move: &Move, moves: &mut [Move]) {
    moves.sort_unstable_by(|left, right| compare_moves(position, pv_move, left, right));
}
