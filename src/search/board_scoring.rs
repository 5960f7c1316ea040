//! Static position evaluation.
//!
//! Search delegates leaf scoring to the `BoardScorer` trait so the heuristic
//! can be swapped without touching search code. Scores are white-relative
//! (positive favours white) and roughly in centipawns; the search negates
//! them for black.

use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::generate_moves_at;
use crate::moves::move_list::MoveList;

pub type Score = i32;

/// Score for capturing the black king right now. One less per ply of delay.
pub const MATE_BY_WHITE: Score = 1_000_000;
pub const MATE_BY_BLACK: Score = -MATE_BY_WHITE;

/// Scores within this distance of a mate constant are mates.
pub const MATE_BAND: Score = 100_000;

pub const PAWN_VALUE: Score = 100;
pub const KNIGHT_VALUE: Score = 300;
pub const BISHOP_VALUE: Score = 300;
pub const ROOK_VALUE: Score = 500;
pub const QUEEN_VALUE: Score = 850;
pub const KING_VALUE: Score = 100_000;

pub trait BoardScorer: Send + Sync {
    /// White-relative score of a position. Must be deterministic.
    fn score(&self, position: &Position) -> Score;
}

/// Absolute value of a piece by kind; zero for an empty square.
#[inline]
pub const fn piece_value(piece: Piece) -> Score {
    match piece.kind() {
        Some(kind) => kind_value(kind),
        None => 0,
    }
}

#[inline]
pub const fn kind_value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

#[inline]
pub const fn is_mate_by_white(score: Score) -> bool {
    score > MATE_BY_WHITE - MATE_BAND
}

#[inline]
pub const fn is_mate_by_black(score: Score) -> bool {
    score < MATE_BY_BLACK + MATE_BAND
}

/// Converts a side-to-move-relative search score into a UCI "mate N" value.
///
/// Mate scores count plies until the king is captured. Capturing it at ply
/// `p` means the mating move was played at ply `p - 1`, so a positive score
/// mates in `(p + 1) / 2` of our moves and a negative one is mated after
/// `p / 2` of theirs.
pub fn mate_in_moves(score: Score) -> Option<i32> {
    if is_mate_by_white(score) {
        let plies = MATE_BY_WHITE - score;
        Some((plies + 1) / 2)
    } else if is_mate_by_black(score) {
        let plies = score - MATE_BY_BLACK;
        Some(-(plies / 2))
    } else {
        None
    }
}

/// Material only, kings included so a missing king dominates.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position) -> Score {
        Coords::all()
            .map(|coords| position.piece_at(coords))
            .filter(|piece| !piece.is_empty())
            .map(|piece| piece_value(piece) * Score::from(piece.color().sign()))
            .sum()
    }
}

const MOBILITY_QUEEN: Score = 3;
const MOBILITY_BISHOP: Score = 5;
const MOBILITY_KNIGHT: Score = 10;
const MOBILITY_PAWN: Score = 4;

// Penalties per unit of distance from the centre.
const CENTERING_KING: Score = 10;
const CENTERING_BISHOP: Score = 10;
const CENTERING_KNIGHT: Score = 20;
const CENTERING_PAWN: Score = 5;

const BISHOP_PAIR_BONUS: Score = 25;
const PAWN_ADVANCE_BONUS: Score = 6;
const KING_SAFETY_BONUS: Score = 50;
const CASTLING_RIGHTS_BONUS: Score = 8;
const ROOK_7TH_BONUS: Score = 25;
const KINGS_DISTANCE_NUM: Score = 350;
const KINGS_DISTANCE_DENOM: Score = 10_000;

/// Material at or above which the opening bonuses apply in full.
const PHASE_OPENING: Score =
    12 * PAWN_VALUE + 2 * ROOK_VALUE + KNIGHT_VALUE + 3 * BISHOP_VALUE + 2 * QUEEN_VALUE;
/// Material at or below which the endgame terms apply in full.
const PHASE_ENDGAME: Score = 10 * PAWN_VALUE + 2 * KNIGHT_VALUE + 4 * ROOK_VALUE;

/// Offsets of the pawns that shelter a white king. Black uses negated rows.
const KING_GUARDS: [Coords; 6] = [
    Coords::new(1, -1),
    Coords::new(1, 0),
    Coords::new(1, 1),
    Coords::new(2, -1),
    Coords::new(2, 0),
    Coords::new(2, 1),
];

/// Material, mobility, centralisation, pawn advance, and king safety blended
/// by game phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

#[derive(Debug, Default)]
struct Tally {
    score: Score,
    white_material: Score,
    black_material: Score,
    white_bishops: u32,
    black_bishops: u32,
    white_king: Option<Coords>,
    black_king: Option<Coords>,
}

impl HeuristicScorer {
    fn tally(position: &Position) -> Tally {
        let mut tally = Tally::default();
        let mut scratch = MoveList::new();

        for coords in Coords::all() {
            let piece = position.piece_at(coords);
            let Some(kind) = piece.kind() else {
                continue;
            };
            let white = piece.is_white();
            let sign = Score::from(piece.color().sign());
            let center_distance = coords.manhattan_center_distance();

            if kind == PieceKind::King {
                tally.score += sign * KING_VALUE;
                if white {
                    tally.white_king = Some(coords);
                } else {
                    tally.black_king = Some(coords);
                }
                continue;
            }

            if white {
                tally.white_material += kind_value(kind);
            } else {
                tally.black_material += kind_value(kind);
            }

            let (mobility, centering) = match kind {
                PieceKind::Pawn => {
                    // ranks advanced past the starting rank
                    let advance = if white {
                        Score::from(coords.row) - 1
                    } else {
                        6 - Score::from(coords.row)
                    };
                    tally.score += sign * advance * PAWN_ADVANCE_BONUS;
                    (MOBILITY_PAWN, CENTERING_PAWN)
                }
                PieceKind::Knight => (MOBILITY_KNIGHT, CENTERING_KNIGHT),
                PieceKind::Bishop => {
                    if white {
                        tally.white_bishops += 1;
                    } else {
                        tally.black_bishops += 1;
                    }
                    (MOBILITY_BISHOP, CENTERING_BISHOP)
                }
                PieceKind::Rook => {
                    let seventh = if white { 6 } else { 1 };
                    if coords.row == seventh {
                        tally.score += sign * ROOK_7TH_BONUS;
                    }
                    (0, 0)
                }
                PieceKind::Queen => (MOBILITY_QUEEN, 0),
                PieceKind::King => (0, 0),
            };

            tally.score -= sign * center_distance * centering;

            if mobility != 0 {
                scratch.clear();
                generate_moves_at(position, coords, &mut scratch);
                tally.score += sign * mobility * scratch.len() as Score;
            }
        }

        tally
    }

    fn king_shelter(position: &Position, king: Coords, color: Color, bonus: Score) -> Score {
        if king.row != color.back_rank() || (3..=5).contains(&king.col) {
            return 0;
        }
        let pawn = Piece::WHITE_PAWN.with_color(color);
        let shelter = KING_GUARDS
            .iter()
            .map(|guard| king.offset(Coords::new(guard.row * color.sign(), guard.col)))
            .filter(|&square| square.is_valid() && position.piece_at(square) == pawn)
            .count();
        shelter as Score * bonus
    }
}

impl BoardScorer for HeuristicScorer {
    fn score(&self, position: &Position) -> Score {
        let tally = Self::tally(position);
        let mut score = tally.score + tally.white_material - tally.black_material;

        if tally.white_bishops >= 2 {
            score += BISHOP_PAIR_BONUS;
        }
        if tally.black_bishops >= 2 {
            score -= BISHOP_PAIR_BONUS;
        }

        // phase / divisor is 1 in the opening and 0 in the endgame
        let divisor = PHASE_OPENING - PHASE_ENDGAME;
        let phase = (tally.white_material + tally.black_material - PHASE_ENDGAME).clamp(0, divisor);

        if phase > 0 {
            let castling = CASTLING_RIGHTS_BONUS * phase / divisor;
            let rights = position.castle_rights;
            let white_rights = Score::from(rights.white_short) + Score::from(rights.white_long);
            let black_rights = Score::from(rights.black_short) + Score::from(rights.black_long);
            score += (white_rights - black_rights) * castling;

            let safety = KING_SAFETY_BONUS * phase / divisor;
            if safety > 0 {
                if let Some(king) = tally.white_king {
                    score += Self::king_shelter(position, king, Color::White, safety);
                }
                if let Some(king) = tally.black_king {
                    score -= Self::king_shelter(position, king, Color::Black, safety);
                }
            }
        }

        if phase < divisor {
            if let (Some(white_king), Some(black_king)) = (tally.white_king, tally.black_king) {
                let centering = CENTERING_KING * (divisor - phase) / divisor;
                score -= white_king.manhattan_center_distance() * centering;
                score += black_king.manhattan_center_distance() * centering;

                // the side ahead in material wants the kings close
                let distance_bonus = (tally.white_material - tally.black_material)
                    * KINGS_DISTANCE_NUM
                    / KINGS_DISTANCE_DENOM
                    * (divisor - phase)
                    / divisor;
                score -= white_king.manhattan_distance(black_king) * distance_bonus;
            }
        }

        score
    }
}
