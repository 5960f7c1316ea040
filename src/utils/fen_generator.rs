//! Position-to-FEN writer.
//!
//! The position model carries no move clocks, so the clock fields are always
//! written as `0 1`. A castle-through-check marker has no FEN spelling and is
//! written as `-`.

use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(position: &Position) -> String {
    let board = generate_board_field(position);
    let side_to_move = match position.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_field(position.castle_rights);
    let en_passant = generate_en_passant_field(position.special_square);

    format!("{board} {side_to_move} {castling} {en_passant} 0 1")
}

fn generate_board_field(position: &Position) -> String {
    let mut out = String::new();

    for row in (0..8).rev() {
        let mut empty_count = 0u8;

        for piece in position.board[row] {
            if piece.is_empty() {
                empty_count += 1;
                continue;
            }
            if empty_count > 0 {
                out.push(char::from(b'0' + empty_count));
                empty_count = 0;
            }
            out.push(piece.as_char());
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if row > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastleRights) -> String {
    let mut out = String::new();
    if rights.white_short {
        out.push('K');
    }
    if rights.white_long {
        out.push('Q');
    }
    if rights.black_short {
        out.push('k');
    }
    if rights.black_long {
        out.push('q');
    }
    if out.is_empty() {
        out.push('-');
    }
    out
}

fn generate_en_passant_field(special_square: SpecialSquare) -> String {
    match special_square {
        SpecialSquare::EnPassant(coords) => {
            square_to_algebraic(coords).unwrap_or_else(|_| "-".to_owned())
        }
        SpecialSquare::None | SpecialSquare::CastleThroughCheck(_) => "-".to_owned(),
    }
}
