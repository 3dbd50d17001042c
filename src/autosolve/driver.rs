//! Paced playback of an auto-solve session.
//!
//! The driver applies one step, hands it to the caller for animation,
//! then pauses before computing the next. Pacing is a `Pacer` so hosts
//! can plug in their own scheduler and tests can run without sleeping.

use std::time::Duration;

use super::planner::SolveStep;
use crate::core::error::Result;
use crate::game::Game;

/// Suspends between auto-solve steps.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Blocks the current thread for the delay.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Runs an auto-solve session to completion with a pause after each move.
#[derive(Clone, Debug)]
pub struct AutoSolveDriver<P: Pacer = ThreadPacer> {
    pacer: P,
    delay: Duration,
}

impl AutoSolveDriver<ThreadPacer> {
    /// Driver that sleeps for `delay` between moves.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self::with_pacer(ThreadPacer, delay)
    }

    /// Driver using the game's configured delay.
    #[must_use]
    pub fn for_game(game: &Game) -> Self {
        Self::new(game.config().auto_solve_delay)
    }
}

impl<P: Pacer> AutoSolveDriver<P> {
    #[must_use]
    pub fn with_pacer(pacer: P, delay: Duration) -> Self {
        Self { pacer, delay }
    }

    #[must_use]
    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    /// Play the session out, calling `on_step` after each applied move.
    ///
    /// Opens a session if the game has none running. Returns the number
    /// of moves made.
    pub fn run<F>(&mut self, game: &mut Game, mut on_step: F) -> Result<usize>
    where
        F: FnMut(&SolveStep),
    {
        if !game.is_auto_solving() {
            game.begin_auto_solve()?;
        }

        let mut moves = 0;
        while let Some(step) = game.auto_solve_step() {
            on_step(&step);
            moves += 1;
            self.pacer.pause(self.delay);
        }
        Ok(moves)
    }
}
