//! Cooperative cancellation for the search.
//!
//! The search is single-threaded and never blocks. Every
//! `STEPS_PER_STOP_CHECK` considered moves it asks the caller's hooks whether
//! to continue and compares the clock against the deadline. Once either says
//! stop, the stop is sticky for the rest of the search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::search::iterative_deepening::SearchOutcome;

/// Moves considered between two consultations of the hooks and the clock.
pub const STEPS_PER_STOP_CHECK: u32 = 20_000;

/// Caller callbacks driven by the search.
pub trait SearchHooks {
    /// Polled periodically. Returning `false` cancels the search.
    fn keep_going(&mut self) -> bool {
        true
    }

    /// Called after each fully completed iterative-deepening depth.
    fn depth_complete(&mut self, _outcome: &SearchOutcome) {}
}

/// Hooks that never cancel and ignore progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl SearchHooks for NoHooks {}

/// Shared flag another thread can raise to stop a running search.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

impl SearchHooks for StopSignal {
    fn keep_going(&mut self) -> bool {
        !self.is_stopped()
    }
}

/// Step counter, deadline and sticky stop flag for one search call.
pub struct StopCheck<'h> {
    hooks: &'h mut dyn SearchHooks,
    deadline: Option<Instant>,
    steps_left: u32,
    stopped: bool,
    nodes: u64,
}

impl<'h> StopCheck<'h> {
    pub fn new(hooks: &'h mut dyn SearchHooks, deadline: Option<Instant>) -> Self {
        Self {
            hooks,
            deadline,
            steps_left: STEPS_PER_STOP_CHECK,
            stopped: false,
            nodes: 0,
        }
    }

    /// Counts one step. Returns `false` once the search has been cancelled.
    pub fn should_keep_going(&mut self) -> bool {
        if self.stopped {
            return false;
        }

        if self.steps_left == 0 {
            if !self.hooks.keep_going() {
                self.stopped = true;
                return false;
            }

            if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                self.stopped = true;
                return false;
            }

            self.steps_left = STEPS_PER_STOP_CHECK;
        }

        self.steps_left -= 1;
        self.nodes += 1;
        true
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Steps counted so far.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn depth_complete(&mut self, outcome: &SearchOutcome) {
        self.hooks.depth_complete(outcome);
    }
}
