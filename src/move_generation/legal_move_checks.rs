//! Legality by king capture.
//!
//! A position is illegal for the side that just moved if the side to move
//! has a pseudo-legal move that captures a king. Check, checkmate and
//! stalemate all fall out of that one test.

use crate::game_state::chess_rules::KING_START_COL;
use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::generate_moves;
use crate::moves::chess_move::Move;
use crate::moves::move_list::MoveList;

/// Game status for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionState {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl PositionState {
    #[inline]
    pub const fn is_game_over(self) -> bool {
        matches!(self, PositionState::Checkmate | PositionState::Stalemate)
    }
}

/// True if `mv` lands on a king, or on the squares a king just castled from
/// or through.
pub fn is_move_king_capture(position: &Position, mv: &Move) -> bool {
    if position.piece_at(mv.to).is_king() {
        return true;
    }

    match position.special_square {
        SpecialSquare::CastleThroughCheck(passed) => {
            mv.to.row == passed.row && (mv.to.col == passed.col || mv.to.col == KING_START_COL)
        }
        _ => false,
    }
}

/// True if the side to move can capture the opposing king.
pub fn has_king_capture(position: &Position) -> bool {
    let mut moves = MoveList::new();
    generate_moves(position, &mut moves);
    moves.iter().any(|mv| is_move_king_capture(position, mv))
}

/// True if the side to move is attacked, tested by handing the move to the
/// opponent.
pub fn is_in_check(position: &Position) -> bool {
    let mut flipped = *position;
    flipped.side_to_move = flipped.side_to_move.opposite();
    has_king_capture(&flipped)
}

/// True if at least one pseudo-legal move keeps the mover's king safe.
pub fn has_legal_move(position: &Position) -> bool {
    let mut moves = MoveList::new();
    generate_moves(position, &mut moves);
    moves
        .iter()
        .any(|mv| !has_king_capture(&position.after_move(mv)))
}

pub fn position_state(position: &Position) -> PositionState {
    let in_check = is_in_check(position);
    match (in_check, has_legal_move(position)) {
        (false, true) => PositionState::Normal,
        (true, true) => PositionState::Check,
        (true, false) => PositionState::Checkmate,
        (false, false) => PositionState::Stalemate,
    }
}

/// The move must be one of the generated moves and must not leave the
/// mover's king capturable.
pub fn is_move_legal(position: &Position, mv: &Move) -> bool {
    let mut moves = MoveList::new();
    generate_moves(position, &mut moves);
    if !moves.contains(mv) {
        return false;
    }
    !has_king_capture(&position.after_move(mv))
}

/// Pseudo-legal moves that survive the king-capture test.
pub fn legal_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    generate_moves(position, &mut moves);
    moves.retain(|mv| !has_king_capture(&position.after_move(mv)));
    moves
}

/// Exactly one king per colour, no unpromoted pawn on its last rank, the
/// side that just moved is not capturable, and the game is not over.
pub fn is_position_legal(position: &Position) -> bool {
    let mut white_kings = 0;
    let mut black_kings = 0;

    for coords in Coords::all() {
        let piece = position.piece_at(coords);
        if piece == Piece::WHITE_KING {
            white_kings += 1;
        } else if piece == Piece::BLACK_KING {
            black_kings += 1;
        } else if piece == Piece::WHITE_PAWN && coords.row == 7 {
            return false;
        } else if piece == Piece::BLACK_PAWN && coords.row == 0 {
            return false;
        }
    }

    if white_kings != 1 || black_kings != 1 {
        return false;
    }

    if has_king_capture(position) {
        return false;
    }

    !position_state(position).is_game_over()
}
