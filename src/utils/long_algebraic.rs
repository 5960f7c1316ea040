//! Long algebraic move text: from-square, to-square and an optional
//! lowercase promotion letter (`e2e4`, `e7e8q`). The null move is `0000`.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

fn square_text(coords: Coords, out: &mut String) {
    out.push(char::from(b'a' + coords.col as u8));
    out.push(char::from(b'1' + coords.row as u8));
}

pub fn move_to_long_algebraic(mv: &Move) -> String {
    if mv.is_null() || !mv.from.is_valid() || !mv.to.is_valid() {
        return "0000".to_owned();
    }

    let mut out = String::with_capacity(5);
    square_text(mv.from, &mut out);
    square_text(mv.to, &mut out);
    if let Some(promotion) = mv.promotion {
        out.push(promotion.to_black().as_char());
    }
    out
}

/// Parses move text. The promotion piece takes the colour of `side`.
pub fn long_algebraic_to_move(text: &str, side: Color) -> ChessResult<Move> {
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessError::InvalidMoveText(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])
        .map_err(|_| ChessError::InvalidMoveText(text.to_owned()))?;
    let to = algebraic_to_square(&text[2..4])
        .map_err(|_| ChessError::InvalidMoveText(text.to_owned()))?;

    let promotion = match text.as_bytes().get(4) {
        None => None,
        Some(&letter) => Some(char_to_promotion(letter as char, side)?),
    };

    Ok(Move { from, to, promotion })
}

fn char_to_promotion(letter: char, side: Color) -> ChessResult<Piece> {
    let kind = match letter {
        'q' => PieceKind::Queen,
        'r' => PieceKind::Rook,
        'b' => PieceKind::Bishop,
        'n' => PieceKind::Knight,
        _ => return Err(ChessError::InvalidPromotion(letter)),
    };
    Ok(Piece::new(kind, side))
}
