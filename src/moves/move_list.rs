//! Move sequence used for generated moves and principal variations.

use smallvec::SmallVec;

use crate::moves::chess_move::Move;

/// Slots kept inline before a list spills to the heap. Enough for every
/// position that occurs in practice.
pub const MOVE_LIST_INLINE_CAPACITY: usize = 90;

pub type MoveList = SmallVec<[Move; MOVE_LIST_INLINE_CAPACITY]>;

/// Replaces `dest` with `first` followed by everything drained out of `rest`.
#[inline]
pub fn set_line(dest: &mut MoveList, first: Move, rest: &mut MoveList) {
    dest.clear();
    dest.push(first);
    dest.extend(rest.drain(..));
}

/// Space-separated long algebraic rendering of a line.
pub fn format_line(line: &[Move]) -> String {
    line.iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
