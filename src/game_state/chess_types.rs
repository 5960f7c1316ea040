//! Piece, piece-kind and colour types for the mailbox board.
//!
//! A `Piece` is the ASCII letter of the piece's name (`n` for knight),
//! uppercase for white and lowercase for black, with `.` marking an empty
//! square. Colour changes are single-bit flips of the ASCII case bit.

use std::fmt;

pub use crate::game_state::coords::Coords;
pub use crate::game_state::position::{CastleRights, Position, SpecialSquare};

const CASE_BIT: u8 = 0x20;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Color::White)
    }

    /// +1 for white, -1 for black. Turns a white-relative score into a
    /// side-to-move-relative one and gives the pawn direction in rows.
    #[inline]
    pub const fn sign(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row of this colour's back rank.
    #[inline]
    pub const fn back_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

/// Piece kind without colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Lowercase letter for this kind.
    #[inline]
    pub const fn letter(self) -> u8 {
        match self {
            PieceKind::Pawn => b'p',
            PieceKind::Knight => b'n',
            PieceKind::Bishop => b'b',
            PieceKind::Rook => b'r',
            PieceKind::Queen => b'q',
            PieceKind::King => b'k',
        }
    }
}

/// Promotion choices in the order the generator emits them.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// A square's content as a one-byte character code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    pub const EMPTY: Piece = Piece(b'.');

    pub const WHITE_PAWN: Piece = Piece(b'P');
    pub const WHITE_KNIGHT: Piece = Piece(b'N');
    pub const WHITE_BISHOP: Piece = Piece(b'B');
    pub const WHITE_ROOK: Piece = Piece(b'R');
    pub const WHITE_QUEEN: Piece = Piece(b'Q');
    pub const WHITE_KING: Piece = Piece(b'K');

    pub const BLACK_PAWN: Piece = Piece(b'p');
    pub const BLACK_KNIGHT: Piece = Piece(b'n');
    pub const BLACK_BISHOP: Piece = Piece(b'b');
    pub const BLACK_ROOK: Piece = Piece(b'r');
    pub const BLACK_QUEEN: Piece = Piece(b'q');
    pub const BLACK_KING: Piece = Piece(b'k');

    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece(kind.letter()).with_color(color)
    }

    /// Accepts `.` and the twelve piece letters.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | 'P' | 'N' | 'B' | 'R' | 'Q' | 'K' | 'p' | 'n' | 'b' | 'r' | 'q' | 'k' => {
                Some(Piece(c as u8))
            }
            _ => None,
        }
    }

    #[inline]
    pub const fn as_char(self) -> char {
        self.0 as char
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == b'.'
    }

    /// True for uppercase codes. Meaningless for the empty square.
    #[inline]
    pub const fn is_white(self) -> bool {
        self.0 & CASE_BIT == 0
    }

    /// Colour of an occupied square. Meaningless for the empty square.
    #[inline]
    pub const fn color(self) -> Color {
        if self.is_white() {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub const fn to_black(self) -> Self {
        Piece(self.0 | CASE_BIT)
    }

    #[inline]
    pub const fn to_white(self) -> Self {
        Piece(self.0 & !CASE_BIT)
    }

    #[inline]
    pub const fn with_color(self, color: Color) -> Self {
        match color {
            Color::White => self.to_white(),
            Color::Black => self.to_black(),
        }
    }

    /// Same kind, other colour.
    #[inline]
    pub const fn flipped(self) -> Self {
        if self.is_empty() {
            self
        } else {
            Piece(self.0 ^ CASE_BIT)
        }
    }

    pub const fn kind(self) -> Option<PieceKind> {
        match self.to_black().0 {
            b'p' => Some(PieceKind::Pawn),
            b'n' => Some(PieceKind::Knight),
            b'b' => Some(PieceKind::Bishop),
            b'r' => Some(PieceKind::Rook),
            b'q' => Some(PieceKind::Queen),
            b'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_kind(self, kind: PieceKind) -> bool {
        self.to_black().0 == kind.letter()
    }

    #[inline]
    pub const fn is_pawn(self) -> bool {
        self.is_kind(PieceKind::Pawn)
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        self.is_kind(PieceKind::King)
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::EMPTY
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece('{}')", self.as_char())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
