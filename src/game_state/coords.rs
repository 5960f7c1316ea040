//! Board coordinates and coordinate offsets.
//!
//! `row` is the rank index (0 is white's back rank) and `col` is the file
//! index (0 is the a-file). The same type doubles as a relative step when
//! generating moves.

/// A pair of board coordinates, or an offset between two of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coords {
    pub row: i8,
    pub col: i8,
}

impl Coords {
    /// Sentinel meaning "no square".
    pub const NULL: Coords = Coords {
        row: i8::MIN,
        col: i8::MIN,
    };

    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Adds a step to these coordinates. The result may be off the board.
    #[inline]
    pub const fn offset(self, step: Coords) -> Self {
        Self {
            row: self.row.wrapping_add(step.row),
            col: self.col.wrapping_add(step.col),
        }
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.row >= 0 && self.row < 8 && self.col >= 0 && self.col < 8
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.row == i8::MIN
    }

    #[inline]
    pub const fn is_back_rank(self) -> bool {
        self.row == 0 || self.row == 7
    }

    #[inline]
    pub fn manhattan_distance(self, other: Coords) -> i32 {
        (i32::from(self.row) - i32::from(other.row)).abs()
            + (i32::from(self.col) - i32::from(other.col)).abs()
    }

    /// Distance from the central 2x2 block, counted in pairs of squares.
    /// Ranges from 0 (centre) to 4 (corners).
    #[inline]
    pub fn manhattan_center_distance(self) -> i32 {
        (((i32::from(self.row) + 1) >> 1) - 2).abs() + (((i32::from(self.col) + 1) >> 1) - 2).abs()
    }

    /// Row-major iteration over all 64 squares, starting at a1.
    pub fn all() -> impl Iterator<Item = Coords> {
        (0..8i8).flat_map(|row| (0..8i8).map(move |col| Coords::new(row, col)))
    }
}
