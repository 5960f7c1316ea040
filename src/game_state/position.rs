//! Mailbox game position.
//!
//! `Position` holds roughly what a FEN string holds, plus the marker needed
//! to capture a king that castled out of or through check on the very next
//! ply. It is a small `Copy` value: the search applies a move by copying the
//! position and mutating the copy, so there is no unmake.

use std::fmt;

use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::{Color, Coords, Piece};
use crate::moves::chess_move::Move;
use crate::utils::render_game_state::write_position;

/// The four castling rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastleRights {
    pub white_short: bool,
    pub white_long: bool,
    pub black_short: bool,
    pub black_long: bool,
}

impl CastleRights {
    pub const ALL: CastleRights = CastleRights {
        white_short: true,
        white_long: true,
        black_short: true,
        black_long: true,
    };

    pub const NONE: CastleRights = CastleRights {
        white_short: false,
        white_long: false,
        black_short: false,
        black_long: false,
    };

    #[inline]
    pub const fn short(self, color: Color) -> bool {
        match color {
            Color::White => self.white_short,
            Color::Black => self.black_short,
        }
    }

    #[inline]
    pub const fn long(self, color: Color) -> bool {
        match color {
            Color::White => self.white_long,
            Color::Black => self.black_long,
        }
    }

    fn revoke_all(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_short = false;
                self.white_long = false;
            }
            Color::Black => {
                self.black_short = false;
                self.black_long = false;
            }
        }
    }

    /// Same rights with the colours exchanged.
    pub const fn swapped(self) -> Self {
        CastleRights {
            white_short: self.black_short,
            white_long: self.black_long,
            black_short: self.white_short,
            black_long: self.white_long,
        }
    }
}

/// Square that becomes capturable on the next ply only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpecialSquare {
    #[default]
    None,
    /// Square a pawn skipped over with a double push.
    EnPassant(Coords),
    /// Square a castling king passed through. Capturing it, or the king's
    /// starting square, captures the king.
    CastleThroughCheck(Coords),
}

impl SpecialSquare {
    #[inline]
    pub const fn coords(self) -> Option<Coords> {
        match self {
            SpecialSquare::None => None,
            SpecialSquare::EnPassant(c) | SpecialSquare::CastleThroughCheck(c) => Some(c),
        }
    }

    fn mirrored(self) -> Self {
        let flip = |c: Coords| Coords::new(7 - c.row, c.col);
        match self {
            SpecialSquare::None => SpecialSquare::None,
            SpecialSquare::EnPassant(c) => SpecialSquare::EnPassant(flip(c)),
            SpecialSquare::CastleThroughCheck(c) => SpecialSquare::CastleThroughCheck(flip(c)),
        }
    }
}

/// A game position: board, side to move, castling rights and special square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// `board[row][col]`, row 0 is white's back rank.
    pub board: [[Piece; 8]; 8],
    pub side_to_move: Color,
    pub castle_rights: CastleRights,
    pub special_square: SpecialSquare,
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    /// Empty board, white to move, no rights.
    pub const fn empty() -> Self {
        Self {
            board: [[Piece::EMPTY; 8]; 8],
            side_to_move: Color::White,
            castle_rights: CastleRights::NONE,
            special_square: SpecialSquare::None,
        }
    }

    pub fn new_game() -> Self {
        let mut position = Self::empty();
        position.set_initial();
        position
    }

    /// Resets to the standard starting array.
    pub fn set_initial(&mut self) {
        self.board = [[Piece::EMPTY; 8]; 8];
        for (col, piece) in WHITE_BACK_RANK.iter().enumerate() {
            self.board[0][col] = *piece;
            self.board[7][col] = piece.to_black();
            self.board[1][col] = Piece::WHITE_PAWN;
            self.board[6][col] = Piece::BLACK_PAWN;
        }
        self.side_to_move = Color::White;
        self.castle_rights = CastleRights::ALL;
        self.special_square = SpecialSquare::None;
    }

    /// Piece on a square. `coords` must be on the board.
    #[inline]
    pub fn piece_at(&self, coords: Coords) -> Piece {
        self.board[coords.row as usize][coords.col as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, coords: Coords, piece: Piece) {
        self.board[coords.row as usize][coords.col as usize] = piece;
    }

    pub fn king_coords(&self, color: Color) -> Option<Coords> {
        let king = Piece::WHITE_KING.with_color(color);
        Coords::all().find(|&c| self.piece_at(c) == king)
    }

    /// Applies a move without checking it. The move must at least be
    /// pseudo-legal for the result to mean anything.
    pub fn apply_move(&mut self, mv: &Move) {
        let mover = self.side_to_move;
        let piece = self.piece_at(mv.from);
        let new_piece = mv.promotion.unwrap_or(piece);

        match std::mem::take(&mut self.special_square) {
            SpecialSquare::None => {}
            SpecialSquare::EnPassant(target) => {
                // only pawns capture en passant
                if mv.to == target && piece.is_pawn() {
                    let captured = Coords::new(target.row - mover.sign(), target.col);
                    self.set_piece(captured, Piece::EMPTY);
                }
            }
            SpecialSquare::CastleThroughCheck(passed) => {
                // a pawn has to move diagonally onto the passed square, other
                // pieces only need to land on it
                if mv.to == passed && (!piece.is_pawn() || mv.to.col != mv.from.col) {
                    let king_col = if passed.col == LONG_CASTLE_PASS_COL {
                        LONG_CASTLE_KING_COL
                    } else {
                        SHORT_CASTLE_KING_COL
                    };
                    self.set_piece(Coords::new(passed.row, king_col), Piece::EMPTY);
                }

                // king castled out of check
                if mv.to == Coords::new(passed.row, KING_START_COL) {
                    let king = if passed.row == 0 {
                        Piece::WHITE_KING
                    } else {
                        Piece::BLACK_KING
                    };
                    let short = Coords::new(passed.row, SHORT_CASTLE_KING_COL);
                    let long = Coords::new(passed.row, LONG_CASTLE_KING_COL);
                    if self.piece_at(short) == king {
                        self.set_piece(short, Piece::EMPTY);
                    } else {
                        self.set_piece(long, Piece::EMPTY);
                    }
                }
            }
        }

        if piece.is_pawn() && mv.to.col == mv.from.col && (mv.to.row - mv.from.row).abs() == 2 {
            self.special_square =
                SpecialSquare::EnPassant(Coords::new(mv.to.row - mover.sign(), mv.to.col));
        }

        // Castling. The rook only moves if it is actually there: castling
        // without the rook is allowed for rook-odds games.
        if piece.is_king() && mv.from.col == KING_START_COL {
            let rook = Piece::WHITE_ROOK.with_color(mover);
            let row = mv.to.row;
            let castle = match mv.to.col {
                SHORT_CASTLE_KING_COL => Some((SHORT_ROOK_COL, SHORT_CASTLE_PASS_COL)),
                LONG_CASTLE_KING_COL => Some((LONG_ROOK_COL, LONG_CASTLE_PASS_COL)),
                _ => None,
            };
            if let Some((rook_col, pass_col)) = castle {
                let corner = Coords::new(row, rook_col);
                let pass = Coords::new(row, pass_col);
                if self.piece_at(corner) == rook {
                    self.set_piece(corner, Piece::EMPTY);
                    self.set_piece(pass, rook);
                }
                self.special_square = SpecialSquare::CastleThroughCheck(pass);
            }
        }

        if piece.is_king() {
            self.castle_rights.revoke_all(piece.color());
        } else if piece == Piece::WHITE_ROOK {
            match (mv.from.row, mv.from.col) {
                (0, LONG_ROOK_COL) => self.castle_rights.white_long = false,
                (0, SHORT_ROOK_COL) => self.castle_rights.white_short = false,
                _ => {}
            }
        } else if piece == Piece::BLACK_ROOK {
            match (mv.from.row, mv.from.col) {
                (7, LONG_ROOK_COL) => self.castle_rights.black_long = false,
                (7, SHORT_ROOK_COL) => self.castle_rights.black_short = false,
                _ => {}
            }
        }

        self.set_piece(mv.to, new_piece);
        self.set_piece(mv.from, Piece::EMPTY);
        self.side_to_move = mover.opposite();
    }

    /// Copy of the position with a move applied.
    #[inline]
    pub fn after_move(&self, mv: &Move) -> Self {
        let mut next = *self;
        next.apply_move(mv);
        next
    }

    /// Colour-swapped, vertically flipped copy.
    pub fn mirrored(&self) -> Self {
        let mut mirrored = Self::empty();
        for coords in Coords::all() {
            let source = Coords::new(7 - coords.row, coords.col);
            mirrored.set_piece(coords, self.piece_at(source).flipped());
        }
        mirrored.side_to_move = self.side_to_move.opposite();
        mirrored.castle_rights = self.castle_rights.swapped();
        mirrored.special_square = self.special_square.mirrored();
        mirrored
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_position(self, f)
    }
}
