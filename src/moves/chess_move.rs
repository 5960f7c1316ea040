//! Move value type.
//!
//! A move only records squares and an optional promotion piece. Whether it
//! captures, castles or gives check is derived from the position it is
//! applied to.

use std::fmt;

use crate::game_state::chess_types::{Coords, Piece};
use crate::utils::long_algebraic::move_to_long_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coords,
    pub to: Coords,
    /// Colour-correct piece the pawn turns into, if any.
    pub promotion: Option<Piece>,
}

impl Move {
    /// Placeholder move with a null origin.
    pub const NULL: Move = Move {
        from: Coords::NULL,
        to: Coords::NULL,
        promotion: None,
    };

    #[inline]
    pub const fn new(from: Coords, to: Coords) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Coords, to: Coords, promotion: Piece) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.from.is_null()
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NULL
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&move_to_long_algebraic(self))
    }
}
