//! Plain-ASCII board renderer for the terminal and diagnostics.

use std::fmt::{self, Write};

use crate::game_state::chess_types::*;

/// Renders the board with rank 8 on top, annotated on the right with the
/// side to move, any en-passant square and the four castling rights.
///
/// The result has no trailing newline.
pub fn render_position(position: &Position) -> String {
    position.to_string()
}

/// Writes the `render_position` text into any formatter or buffer.
pub fn write_position<W: Write>(position: &Position, out: &mut W) -> fmt::Result {
    for row in (0..8usize).rev() {
        out.write_char(char::from(b'1' + row as u8))?;
        out.write_char(' ')?;
        for piece in position.board[row] {
            out.write_char(' ')?;
            out.write_char(piece.as_char())?;
        }

        let rights = position.castle_rights;
        match row {
            1 => write!(out, "  {} to move", position.side_to_move.name())?,
            2 => {
                if let SpecialSquare::EnPassant(c) = position.special_square {
                    write!(
                        out,
                        "  en-passant square: {}{}",
                        char::from(b'a' + c.col as u8),
                        char::from(b'1' + c.row as u8)
                    )?;
                }
            }
            3 => write!(out, "  white short castling: {}allowed", allowed(rights.white_short))?,
            4 => write!(out, "  white long castling: {}allowed", allowed(rights.white_long))?,
            5 => write!(out, "  black short castling: {}allowed", allowed(rights.black_short))?,
            6 => write!(out, "  black long castling: {}allowed", allowed(rights.black_long))?,
            _ => {}
        }

        out.write_char('\n')?;
    }

    out.write_str("\n   a b c d e f g h")
}

fn allowed(flag: bool) -> &'static str {
    if flag {
        ""
    } else {
        "not "
    }
}
