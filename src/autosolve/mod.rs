//! Auto-completion of a fully revealed game.
//!
//! Split in two:
//! - `planner`: pure functions choosing the next foundation move
//! - `driver`: paced playback of a game's auto-solve session
//!
//! The session itself (start, step, re-entrancy guard) lives on
//! `game::Game`, since it mutates the board and queues events.

pub mod driver;
pub mod planner;

pub use driver::{AutoSolveDriver, Pacer, ThreadPacer};
pub use planner::{next_step, plan, CandidatePolicy, SolveStep};
