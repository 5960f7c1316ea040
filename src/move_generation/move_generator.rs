//! Pseudo-legal move generation.
//!
//! Moves are produced in board-scan order (row-major from a1) and may leave
//! the mover's own king capturable. Legality is decided afterwards by the
//! king-capture test in `legal_move_checks`.

use crate::game_state::chess_rules::*;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::moves::move_list::MoveList;
use crate::moves::piece_steps::*;

/// Appends the pseudo-legal moves of every piece belonging to the side to move.
pub fn generate_moves(position: &Position, out: &mut MoveList) {
    let side = position.side_to_move;
    for from in Coords::all() {
        let piece = position.piece_at(from);
        if !piece.is_empty() && piece.color() == side {
            generate_moves_at(position, from, out);
        }
    }
}

/// Convenience wrapper returning a fresh list.
pub fn generated_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    generate_moves(position, &mut moves);
    moves
}

/// Appends the pseudo-legal moves of the piece on `from`, whatever its colour.
pub fn generate_moves_at(position: &Position, from: Coords, out: &mut MoveList) {
    let piece = position.piece_at(from);
    match piece.kind() {
        None => {}
        Some(PieceKind::Pawn) => generate_pawn_moves(position, from, piece, out),
        Some(PieceKind::Knight) => generate_steps(position, from, piece, &KNIGHT_STEPS, false, out),
        Some(PieceKind::Bishop) => {
            generate_steps(position, from, piece, &BISHOP_DIRECTIONS, true, out)
        }
        Some(PieceKind::Rook) => generate_steps(position, from, piece, &ROOK_DIRECTIONS, true, out),
        Some(PieceKind::Queen) => {
            generate_steps(position, from, piece, &QUEEN_DIRECTIONS, true, out)
        }
        Some(PieceKind::King) => {
            generate_steps(position, from, piece, &KING_STEPS, false, out);
            generate_castling_moves(position, from, piece.color(), out);
        }
    }
}

/// Moves or captures along each step. With `slide`, a step repeats until it
/// leaves the board, hits an own piece, or captures.
fn generate_steps(
    position: &Position,
    from: Coords,
    piece: Piece,
    steps: &[Coords],
    slide: bool,
    out: &mut MoveList,
) {
    for &step in steps {
        let mut to = from.offset(step);
        while to.is_valid() {
            let target = position.piece_at(to);
            if !target.is_empty() {
                if target.color() != piece.color() {
                    out.push(Move::new(from, to));
                }
                break;
            }
            out.push(Move::new(from, to));
            if !slide {
                break;
            }
            to = to.offset(step);
        }
    }
}

// Castling is only pseudo-legal here: the rook is not required (rook odds)
// and passing through check is caught next ply through the castle marker.
fn generate_castling_moves(position: &Position, from: Coords, color: Color, out: &mut MoveList) {
    let row = color.back_rank();
    if from != Coords::new(row, KING_START_COL) {
        return;
    }

    let all_empty =
        |cols: &[i8]| cols.iter().all(|&col| position.piece_at(Coords::new(row, col)).is_empty());

    if position.castle_rights.short(color) && all_empty(&SHORT_CASTLE_EMPTY_COLS) {
        out.push(Move::new(from, Coords::new(row, SHORT_CASTLE_KING_COL)));
    }
    if position.castle_rights.long(color) && all_empty(&LONG_CASTLE_EMPTY_COLS) {
        out.push(Move::new(from, Coords::new(row, LONG_CASTLE_KING_COL)));
    }
}

/// Pushes a pawn move, expanded into the four promotions when it reaches the
/// far rank.
fn push_pawn_move(color: Color, from: Coords, to: Coords, out: &mut MoveList) {
    if to.row == color.opposite().back_rank() {
        for kind in PROMOTION_KINDS {
            out.push(Move::with_promotion(from, to, Piece::new(kind, color)));
        }
    } else {
        out.push(Move::new(from, to));
    }
}

fn generate_pawn_moves(position: &Position, from: Coords, piece: Piece, out: &mut MoveList) {
    let color = piece.color();
    let dir = color.sign();
    let ahead = from.row + dir;

    // En passant, or landing on the square a castling king passed through.
    // An occupied marker square is covered by the ordinary captures below.
    if let Some(target) = position.special_square.coords() {
        if target.row == ahead
            && (target.col - from.col).abs() == 1
            && position.piece_at(target).is_empty()
        {
            push_pawn_move(color, from, target, out);
        }
    }

    // capturing a king that castled out of check
    if let SpecialSquare::CastleThroughCheck(passed) = position.special_square {
        if passed.row == ahead && (KING_START_COL - from.col).abs() == 1 {
            push_pawn_move(color, from, Coords::new(passed.row, KING_START_COL), out);
        }
    }

    for side in PAWN_CAPTURE_COLS {
        let to = Coords::new(ahead, from.col + side);
        if to.is_valid() {
            let target = position.piece_at(to);
            if !target.is_empty() && target.color() != color {
                push_pawn_move(color, from, to, out);
            }
        }
    }

    let single = Coords::new(ahead, from.col);
    if single.is_valid() && position.piece_at(single).is_empty() {
        push_pawn_move(color, from, single, out);

        let start_row = match color {
            Color::White => WHITE_PAWN_START_ROW,
            Color::Black => BLACK_PAWN_START_ROW,
        };
        let double = Coords::new(ahead + dir, from.col);
        if from.row == start_row && double.is_valid() && position.piece_at(double).is_empty() {
            out.push(Move::new(from, double));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_checks::is_move_legal;
    use crate::utils::fen_parser::parse_fen;
    use crate::utils::long_algebraic::move_to_long_algebraic;
    use crate::utils::random_playout::random_playout;
    use proptest::prelude::*;

    fn move_texts(position: &Position) -> Vec<String> {
        let mut texts: Vec<String> = generated_moves(position)
            .iter()
            .map(|mv| move_to_long_algebraic(mv))
            .collect();
        texts.sort();
        texts
    }

    fn mirror_move(mv: &Move) -> Move {
        Move {
            from: Coords::new(7 - mv.from.row, mv.from.col),
            to: Coords::new(7 - mv.to.row, mv.to.col),
            promotion: mv.promotion.map(Piece::flipped),
        }
    }

    #[test]
    fn initial_position_has_twenty_moves() {
        let position = Position::new_game();
        let moves = generated_moves(&position);
        assert_eq!(moves.len(), 20);
        assert!(!moves.spilled());
    }

    #[test]
    fn moves_come_out_in_board_scan_order() {
        let position = Position::new_game();
        let moves = generated_moves(&position);
        let origins: Vec<Coords> = moves.iter().map(|mv| mv.from).collect();
        let mut sorted = origins.clone();
        sorted.sort();
        assert_eq!(origins, sorted);
        // b1 knight comes before the a2 pawn
        assert_eq!(moves[0].from, Coords::new(0, 1));
    }

    #[test]
    fn black_to_move_generates_only_black_moves() {
        let mut position = Position::new_game();
        position.side_to_move = Color::Black;
        let moves = generated_moves(&position);
        assert_eq!(moves.len(), 20);
        assert!(moves
            .iter()
            .all(|mv| !position.piece_at(mv.from).is_white()));
    }

    #[test]
    fn sliders_stop_at_first_piece() {
        let position = parse_fen("4k3/8/8/8/3p4/8/1P6/R3K3 w - - 0 1").expect("FEN should parse");
        let mut rook_moves = MoveList::new();
        generate_moves_at(&position, Coords::new(0, 0), &mut rook_moves);
        // a2..a8 and b1..d1
        assert_eq!(rook_moves.len(), 10);

        let mut queen_moves = MoveList::new();
        let position = parse_fen("4k3/8/8/8/3Q4/8/8/4K3 w - - 0 1").expect("FEN should parse");
        generate_moves_at(&position, Coords::new(3, 3), &mut queen_moves);
        assert_eq!(queen_moves.len(), 27);
    }

    #[test]
    fn every_promotion_is_expanded() {
        let position =
            parse_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let mut moves = MoveList::new();
        generate_moves_at(&position, Coords::new(6, 0), &mut moves);
        // a8 push and b8 capture, four promotions each
        assert_eq!(moves.len(), 8);
        for target_col in [0, 1] {
            let promos: Vec<Piece> = moves
                .iter()
                .filter(|mv| mv.to == Coords::new(7, target_col))
                .map(|mv| mv.promotion.expect("promotion expected"))
                .collect();
            assert_eq!(
                promos,
                vec![
                    Piece::WHITE_QUEEN,
                    Piece::WHITE_ROOK,
                    Piece::WHITE_BISHOP,
                    Piece::WHITE_KNIGHT
                ]
            );
        }
    }

    #[test]
    fn black_promotions_are_black_pieces() {
        let position = parse_fen("4k3/8/8/8/8/8/p7/4K3 b - - 0 1").expect("FEN should parse");
        let mut moves = MoveList::new();
        generate_moves_at(&position, Coords::new(1, 0), &mut moves);
        assert_eq!(moves.len(), 4);
        assert!(moves
            .iter()
            .all(|mv| mv.promotion.is_some_and(|p| !p.is_white())));
    }

    #[test]
    fn castling_needs_rights_and_empty_squares_but_no_rook() {
        let position = parse_fen("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1").expect("FEN should parse");
        let texts = move_texts(&position);
        assert!(texts.contains(&"e1g1".to_owned()));
        assert!(texts.contains(&"e1c1".to_owned()));

        let blocked = parse_fen("4k3/8/8/8/8/8/8/1N2K1N1 w KQ - 0 1").expect("FEN should parse");
        let texts = move_texts(&blocked);
        assert!(!texts.contains(&"e1g1".to_owned()));
        assert!(!texts.contains(&"e1c1".to_owned()));

        let no_rights = parse_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        let texts = move_texts(&no_rights);
        assert!(!texts.contains(&"e1g1".to_owned()));
        assert!(!texts.contains(&"e1c1".to_owned()));
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let position =
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let texts = move_texts(&position);
        assert!(texts.contains(&"e5d6".to_owned()));
        assert!(texts.contains(&"e5e6".to_owned()));
    }

    #[test]
    fn castled_king_can_be_caught_on_start_square() {
        // the d2 pawn attacked e1 when white castled long
        let mut position =
            parse_fen("4k3/8/8/8/8/8/3p4/R3K3 w Q - 0 1").expect("FEN should parse");
        let castle = Move::new(Coords::new(0, 4), Coords::new(0, 2));
        position.apply_move(&castle);
        let texts = move_texts(&position);
        assert!(texts.contains(&"d2e1q".to_owned()));
    }

    #[test]
    fn double_step_needs_both_squares_empty() {
        let position = parse_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let mut moves = MoveList::new();
        generate_moves_at(&position, Coords::new(1, 4), &mut moves);
        assert!(moves.is_empty());

        let position = parse_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let mut moves = MoveList::new();
        generate_moves_at(&position, Coords::new(1, 4), &mut moves);
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn kings_only_has_no_mating_moves() {
        let position = parse_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let moves = generated_moves(&position);
        assert_eq!(moves.len(), 5);
        assert!(moves.iter().all(|mv| is_move_legal(&position, mv)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn generation_is_mirror_symmetric(seed in any::<u64>(), plies in 0usize..40) {
            let position = random_playout(&Position::new_game(), plies, seed);
            let mirrored = position.mirrored();

            let mut expected: Vec<String> = generated_moves(&position)
                .iter()
                .map(|mv| move_to_long_algebraic(&mirror_move(mv)))
                .collect();
            expected.sort();

            prop_assert_eq!(move_texts(&mirrored), expected);
        }

        #[test]
        fn pawn_moves_to_last_rank_always_promote(seed in any::<u64>(), plies in 0usize..60) {
            let position = random_playout(&Position::new_game(), plies, seed);
            let moves = generated_moves(&position);
            for mv in &moves {
                let piece = position.piece_at(mv.from);
                let reaches_last_rank = piece.is_pawn() && mv.to.is_back_rank();
                prop_assert_eq!(reaches_last_rank, mv.promotion.is_some());
                if reaches_last_rank {
                    let siblings = moves
                        .iter()
                        .filter(|other| other.from == mv.from && other.to == mv.to)
                        .count();
                    prop_assert_eq!(siblings, 4);
                }
            }
        }

        #[test]
        fn castling_rights_change_only_for_the_moving_king_or_corner_rook(
            seed in any::<u64>(),
            plies in 0usize..60,
        ) {
            let position = random_playout(&Position::new_game(), plies, seed);
            for mv in &generated_moves(&position) {
                let piece = position.piece_at(mv.from);
                let mut expected = position.castle_rights;
                if piece.is_king() {
                    match piece.color() {
                        Color::White => {
                            expected.white_short = false;
                            expected.white_long = false;
                        }
                        Color::Black => {
                            expected.black_short = false;
                            expected.black_long = false;
                        }
                    }
                } else if piece == Piece::WHITE_ROOK && mv.from == Coords::new(0, 0) {
                    expected.white_long = false;
                } else if piece == Piece::WHITE_ROOK && mv.from == Coords::new(0, 7) {
                    expected.white_short = false;
                } else if piece == Piece::BLACK_ROOK && mv.from == Coords::new(7, 0) {
                    expected.black_long = false;
                } else if piece == Piece::BLACK_ROOK && mv.from == Coords::new(7, 7) {
                    expected.black_short = false;
                }

                prop_assert_eq!(position.after_move(mv).castle_rights, expected);
            }
        }
    }
}
