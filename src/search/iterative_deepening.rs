//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! Each iteration runs a full fail-hard negamax to the nominal depth, then
//! extends captures in a bounded quiescence search. Kings are never in
//! "check" here: a move that captures a king ends the line with a mate score
//! that shrinks with ply, so faster wins score higher. The principal
//! variation of the last completed depth orders the next one; a depth that
//! is cancelled part-way is thrown away.

use std::time::Instant;

use tracing::debug;

use crate::game_state::chess_types::Position;
use crate::move_generation::legal_move_checks::{
    has_king_capture, is_move_king_capture, is_position_legal,
};
use crate::move_generation::move_generator::generate_moves;
use crate::moves::chess_move::Move;
use crate::moves::move_list::{format_line, set_line, MoveList};
use crate::search::board_scoring::{BoardScorer, Score, MATE_BY_WHITE};
use crate::search::move_ordering::order_moves;
use crate::search::search_control::{SearchHooks, StopCheck};
use crate::search::time_management::SearchLimits;

/// Extra plies of capture-only search past the nominal depth.
pub const QUIESCENCE_DEPTH: u32 = 6;

/// Sanity bound on iterative deepening; depths run from 1 to one less.
pub const MAX_ITERATIVE_DEPTH: u32 = 30;

/// Result of the last fully completed depth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub pv: MoveList,
    /// Side-to-move-relative score.
    pub score: Score,
    pub depth: u32,
    /// Moves considered so far.
    pub nodes: u64,
}

impl SearchOutcome {
    pub fn best_move(&self) -> Option<Move> {
        self.pv.first().copied()
    }
}

pub(crate) struct SearchState<'a> {
    scorer: &'a dyn BoardScorer,
    stop: StopCheck<'a>,
    max_depth: u32,
    /// Line found by the previous completed depth.
    previous_pv: MoveList,
}

impl<'a> SearchState<'a> {
    pub(crate) fn new(
        scorer: &'a dyn BoardScorer,
        hooks: &'a mut dyn SearchHooks,
        deadline: Option<Instant>,
        max_depth: u32,
    ) -> Self {
        Self {
            scorer,
            stop: StopCheck::new(hooks, deadline),
            max_depth,
            previous_pv: MoveList::new(),
        }
    }
}

/// Searches `position` until the limits, the hooks, or the depth bound stop
/// it. An illegal position yields an empty outcome.
pub fn search(
    position: &Position,
    scorer: &dyn BoardScorer,
    limits: SearchLimits,
    hooks: &mut dyn SearchHooks,
) -> SearchOutcome {
    if !is_position_legal(position) {
        debug!("refusing to search an illegal position");
        return SearchOutcome::default();
    }

    let start = Instant::now();
    let deadline = limits.deadline_from(start);
    let last_depth = limits
        .max_depth
        .map_or(MAX_ITERATIVE_DEPTH - 1, |depth| depth.clamp(1, MAX_ITERATIVE_DEPTH - 1));
    debug!(
        budget_ms = ?limits.budget().map(|budget| budget.as_millis()),
        last_depth,
        "search started"
    );

    let mut state = SearchState::new(scorer, hooks, deadline, 0);
    let mut outcome = SearchOutcome::default();

    for depth in 1..=last_depth {
        state.max_depth = depth;

        let mut pv = MoveList::new();
        let score = search_level(&mut state, position, 0, Score::MIN + 1, Score::MAX, &mut pv);
        if !state.stop.should_keep_going() {
            debug!(depth, nodes = state.stop.nodes(), "search cancelled, keeping previous depth");
            break;
        }

        state.previous_pv = pv;
        outcome.pv = state.previous_pv.clone();
        outcome.score = score;
        outcome.depth = depth;
        outcome.nodes = state.stop.nodes();

        debug!(
            depth,
            score,
            nodes = outcome.nodes,
            elapsed_ms = start.elapsed().as_millis(),
            pv = %format_line(&outcome.pv),
            "depth complete"
        );
        state.stop.depth_complete(&outcome);
    }

    outcome.nodes = state.stop.nodes();
    outcome
}

/// One negamax node. Scores are relative to the side to move at `ply`.
/// Plies at or past `max_depth` are quiescence plies.
pub(crate) fn search_level(
    state: &mut SearchState<'_>,
    position: &Position,
    ply: u32,
    mut alpha: Score,
    beta: Score,
    out_pv: &mut MoveList,
) -> Score {
    out_pv.clear();

    let quiesce = ply >= state.max_depth;
    if quiesce {
        let stand_pat = state.scorer.score(position) * Score::from(position.side_to_move.sign());
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
        if ply >= state.max_depth + QUIESCENCE_DEPTH {
            return alpha;
        }
    }

    let mut moves = MoveList::new();
    generate_moves(position, &mut moves);

    // the previous line's move here may not even exist in this position
    let pv_move = state
        .previous_pv
        .get(ply as usize)
        .copied()
        .unwrap_or(Move::NULL);
    order_moves(position, &pv_move, &mut moves);

    let mut child_pv = MoveList::new();
    for mv in &moves {
        if !state.stop.should_keep_going() {
            break;
        }

        if quiesce && position.piece_at(mv.to).is_empty() {
            continue;
        }

        // Nothing can beat taking the king, and searching past it would let
        // the opponent recapture.
        if is_move_king_capture(position, mv) {
            let score = MATE_BY_WHITE - ply as Score;
            if score > alpha {
                alpha = score.min(beta);
                out_pv.clear();
                out_pv.push(*mv);
            }
            break;
        }

        let child = position.after_move(mv);

        // Root moves that leave our king en prise could tie with legal ones
        // at the same depth.
        if ply == 0 && has_king_capture(&child) {
            continue;
        }

        let score = -search_level(state, &child, ply + 1, -beta, -alpha, &mut child_pv);
        if score >= beta {
            alpha = beta;
            break;
        }
        if score <= alpha {
            continue;
        }

        alpha = score;
        set_line(out_pv, *mv, &mut child_pv);
    }

    alpha
}
