//! Perft: leaf counts of the legal move tree.
//!
//! "Legal" means the pseudo-legal move survives the king-capture test, the
//! same rule the search applies at the root.

use crate::game_state::chess_types::Position;
use crate::move_generation::legal_move_checks::has_king_capture;
use crate::move_generation::move_generator::generate_moves;
use crate::moves::chess_move::Move;
use crate::moves::move_list::MoveList;

pub fn perft(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    generate_moves(position, &mut moves);

    let mut nodes = 0u64;
    for mv in &moves {
        let child = position.after_move(mv);
        if has_king_capture(&child) {
            continue;
        }
        nodes += if depth == 1 { 1 } else { perft(&child, depth - 1) };
    }
    nodes
}

/// Per-root-move counts, in generation order.
pub fn perft_divide(position: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut moves = MoveList::new();
    generate_moves(position, &mut moves);

    moves
        .iter()
        .filter_map(|mv| {
            let child = position.after_move(mv);
            (!has_king_capture(&child)).then(|| (*mv, perft(&child, depth - 1)))
        })
        .collect()
}
