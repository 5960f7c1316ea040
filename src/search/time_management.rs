//! Per-move time budgeting.
//!
//! UCI passes raw clock data (`wtime/btime/winc/binc/movetime`); this module
//! turns it into `SearchLimits` for the side to move and the limits into an
//! absolute deadline.

use std::time::{Duration, Instant};

use crate::game_state::chess_types::Color;

/// Assumed number of moves left in the game when splitting the clock.
pub const GUESS_MOVES_LEFT: u64 = 25;

/// Time and depth limits for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Remaining clock of the side to move.
    pub time_ms: Option<u64>,
    pub increment_ms: Option<u64>,
    /// Exact time to spend; overrides the clock.
    pub movetime_ms: Option<u64>,
    /// Deepest iterative-deepening depth to run.
    pub max_depth: Option<u32>,
}

impl SearchLimits {
    /// No deadline and no depth cap.
    pub const fn unbounded() -> Self {
        Self {
            time_ms: None,
            increment_ms: None,
            movetime_ms: None,
            max_depth: None,
        }
    }

    pub const fn movetime(ms: u64) -> Self {
        Self {
            movetime_ms: Some(ms),
            ..Self::unbounded()
        }
    }

    pub const fn depth(depth: u32) -> Self {
        Self {
            max_depth: Some(depth),
            ..Self::unbounded()
        }
    }

    pub const fn with_max_depth(self, depth: u32) -> Self {
        Self {
            max_depth: Some(depth),
            ..self
        }
    }

    /// Time to spend, or `None` for an unbounded search.
    pub fn budget(&self) -> Option<Duration> {
        if self.time_ms.is_none() && self.increment_ms.is_none() && self.movetime_ms.is_none() {
            return None;
        }

        let ms = self.movetime_ms.unwrap_or_else(|| {
            self.time_ms.unwrap_or(0) / GUESS_MOVES_LEFT + self.increment_ms.unwrap_or(0)
        });
        Some(Duration::from_millis(ms))
    }

    pub fn deadline_from(&self, start: Instant) -> Option<Instant> {
        self.budget().map(|budget| start + budget)
    }
}

/// Raw `go` command parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub mate: Option<u32>,
    pub movetime_ms: Option<u64>,
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movestogo: Option<u32>,
    pub ponder: bool,
    pub infinite: bool,
    pub searchmoves: Vec<String>,
}

impl GoParams {
    fn has_time_control(&self) -> bool {
        self.movetime_ms.is_some()
            || self.wtime_ms.is_some()
            || self.btime_ms.is_some()
            || self.winc_ms.is_some()
            || self.binc_ms.is_some()
    }
}

/// Picks the limits for `side` from a `go` command.
///
/// `infinite` searches without a deadline. A bare `go depth N` does the same
/// but stops after depth N. Otherwise the mover's clock and increment are
/// used, with absent values read as zero.
pub fn resolve_search_limits(params: &GoParams, side: Color) -> SearchLimits {
    let limits = if params.infinite || (params.depth.is_some() && !params.has_time_control()) {
        SearchLimits::unbounded()
    } else if let Some(movetime) = params.movetime_ms {
        SearchLimits::movetime(movetime)
    } else {
        let (time, increment) = match side {
            Color::White => (params.wtime_ms, params.winc_ms),
            Color::Black => (params.btime_ms, params.binc_ms),
        };
        SearchLimits {
            time_ms: Some(time.unwrap_or(0)),
            increment_ms: Some(increment.unwrap_or(0)),
            ..SearchLimits::unbounded()
        }
    };

    match params.depth {
        Some(depth) => limits.with_max_depth(depth),
        None => limits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_has_no_budget() {
        assert_eq!(SearchLimits::unbounded().budget(), None);
        assert_eq!(SearchLimits::depth(4).budget(), None);
        assert_eq!(SearchLimits::unbounded().deadline_from(Instant::now()), None);
    }

    #[test]
    fn movetime_wins_over_clock() {
        let limits = SearchLimits {
            time_ms: Some(100_000),
            increment_ms: Some(1_000),
            movetime_ms: Some(250),
            max_depth: None,
        };
        assert_eq!(limits.budget(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn clock_is_split_over_guessed_moves_plus_increment() {
        let limits = SearchLimits {
            time_ms: Some(60_000),
            increment_ms: Some(500),
            ..SearchLimits::unbounded()
        };
        assert_eq!(limits.budget(), Some(Duration::from_millis(2_400 + 500)));

        let increment_only = SearchLimits {
            increment_ms: Some(700),
            ..SearchLimits::unbounded()
        };
        assert_eq!(increment_only.budget(), Some(Duration::from_millis(700)));
    }

    #[test]
    fn go_resolves_to_the_movers_clock() {
        let params = GoParams {
            wtime_ms: Some(120_000),
            btime_ms: Some(60_000),
            winc_ms: Some(1_000),
            binc_ms: Some(2_000),
            ..GoParams::default()
        };
        let white = resolve_search_limits(&params, Color::White);
        assert_eq!(white.time_ms, Some(120_000));
        assert_eq!(white.increment_ms, Some(1_000));
        let black = resolve_search_limits(&params, Color::Black);
        assert_eq!(black.time_ms, Some(60_000));
        assert_eq!(black.increment_ms, Some(2_000));
        assert_eq!(black.budget(), Some(Duration::from_millis(2_400 + 2_000)));
    }

    #[test]
    fn bare_go_is_a_short_search_and_depth_only_is_unbounded() {
        let bare = resolve_search_limits(&GoParams::default(), Color::White);
        assert_eq!(bare.budget(), Some(Duration::ZERO));

        let depth_only = GoParams {
            depth: Some(5),
            ..GoParams::default()
        };
        assert_eq!(resolve_search_limits(&depth_only, Color::White), SearchLimits::depth(5));

        let infinite = GoParams {
            infinite: true,
            wtime_ms: Some(1_000),
            ..GoParams::default()
        };
        assert_eq!(resolve_search_limits(&infinite, Color::White).budget(), None);
    }

    #[test]
    fn depth_caps_every_kind_of_limit() {
        let movetime = GoParams {
            movetime_ms: Some(250),
            depth: Some(3),
            ..GoParams::default()
        };
        assert_eq!(
            resolve_search_limits(&movetime, Color::White),
            SearchLimits::movetime(250).with_max_depth(3)
        );

        let clock = GoParams {
            btime_ms: Some(30_000),
            depth: Some(7),
            ..GoParams::default()
        };
        let limits = resolve_search_limits(&clock, Color::Black);
        assert_eq!(limits.max_depth, Some(7));
        assert_eq!(limits.time_ms, Some(30_000));
        assert_eq!(limits.increment_ms, Some(0));

        let infinite = GoParams {
            infinite: true,
            depth: Some(2),
            ..GoParams::default()
        };
        assert_eq!(resolve_search_limits(&infinite, Color::White), SearchLimits::depth(2));
    }
}
