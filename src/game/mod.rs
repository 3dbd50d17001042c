//! The game mutator.

mod game;

pub use game::{AutoSolve, Game};
