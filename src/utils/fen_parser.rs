//! FEN-to-Position parser.
//!
//! Reads the board, side to move, castling rights and en-passant square of a
//! Forsyth-Edwards Notation string. The two clock fields must be present and
//! numeric but are not stored: the position model has no move clocks.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| ChessError::fen("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| ChessError::fen("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| ChessError::fen("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| ChessError::fen("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| ChessError::fen("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| ChessError::fen("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(ChessError::fen("extra trailing fields"));
    }

    let mut position = Position::empty();

    parse_board(board_part, &mut position)?;
    position.side_to_move = parse_side_to_move(side_part)?;
    position.castle_rights = parse_castling_rights(castling_part)?;
    position.special_square = parse_en_passant_square(en_passant_part)?;
    halfmove_part
        .parse::<u32>()
        .map_err(|_| ChessError::fen(format!("invalid halfmove clock '{halfmove_part}'")))?;
    fullmove_part
        .parse::<u32>()
        .map_err(|_| ChessError::fen(format!("invalid fullmove number '{fullmove_part}'")))?;

    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::fen("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let row = 7 - fen_rank_idx as i8;
        let mut col = 0i8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::fen(format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as i8;
                if col > 8 {
                    return Err(ChessError::fen("board rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_char(ch)
                .filter(|piece| !piece.is_empty())
                .ok_or_else(|| ChessError::fen(format!("invalid piece character '{ch}'")))?;

            if col >= 8 {
                return Err(ChessError::fen("board rank has too many files"));
            }

            position.set_piece(Coords::new(row, col), piece);
            col += 1;
        }

        if col != 8 {
            return Err(ChessError::fen("board rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::fen(format!("invalid side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastleRights> {
    let mut rights = CastleRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_short = true,
            'Q' => rights.white_long = true,
            'k' => rights.black_short = true,
            'q' => rights.black_long = true,
            _ => return Err(ChessError::fen(format!("invalid castling character '{ch}'"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<SpecialSquare> {
    if en_passant_part == "-" {
        return Ok(SpecialSquare::None);
    }

    let coords = algebraic_to_square(en_passant_part)
        .map_err(|_| ChessError::fen(format!("invalid en-passant square '{en_passant_part}'")))?;
    if coords.row != 2 && coords.row != 5 {
        return Err(ChessError::fen(format!(
            "en-passant square '{en_passant_part}' is not on rank 3 or 6"
        )));
    }

    Ok(SpecialSquare::EnPassant(coords))
}
