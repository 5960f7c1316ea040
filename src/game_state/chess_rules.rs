//! Canonical chess-rule constants.
//!
//! Starting array, castling geometry and promotion ranks shared by the
//! position model, the move generator and the FEN utilities.

use crate::game_state::chess_types::Piece;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// White's back rank in the starting array, a-file first.
pub const WHITE_BACK_RANK: [Piece; 8] = [
    Piece::WHITE_ROOK,
    Piece::WHITE_KNIGHT,
    Piece::WHITE_BISHOP,
    Piece::WHITE_QUEEN,
    Piece::WHITE_KING,
    Piece::WHITE_BISHOP,
    Piece::WHITE_KNIGHT,
    Piece::WHITE_ROOK,
];

/// File the king starts on and castles from.
pub const KING_START_COL: i8 = 4;

/// King destination files.
pub const SHORT_CASTLE_KING_COL: i8 = 6;
pub const LONG_CASTLE_KING_COL: i8 = 2;

/// Squares the king passes through. The castled rook lands on the same file.
pub const SHORT_CASTLE_PASS_COL: i8 = 5;
pub const LONG_CASTLE_PASS_COL: i8 = 3;

/// Corner files the rooks start on.
pub const SHORT_ROOK_COL: i8 = 7;
pub const LONG_ROOK_COL: i8 = 0;

/// Files that must be empty for each castle, excluding the king's own file.
pub const SHORT_CASTLE_EMPTY_COLS: [i8; 2] = [5, 6];
pub const LONG_CASTLE_EMPTY_COLS: [i8; 3] = [3, 2, 1];

/// Rows a pawn starts on (may double-step from).
pub const WHITE_PAWN_START_ROW: i8 = 1;
pub const BLACK_PAWN_START_ROW: i8 = 6;
