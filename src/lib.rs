//! # klondike-engine
//!
//! Rules and state engine for single-player Klondike solitaire (draw one).
//!
//! ## Design Principles
//!
//! 1. **Engine, not UI**: The crate owns the deck, the thirteen piles and
//!    the rules. A presentation layer sends `Action`s in and receives
//!    `GameEvent`s out; nothing here renders or animates.
//!
//! 2. **Validate, then mutate**: Every command is checked against the
//!    rules before the board is touched. A rejected command returns a
//!    `GameError` and leaves the state exactly as it was.
//!
//! 3. **Reproducible deals**: Shuffling goes through a seeded `GameRng`,
//!    so a seed identifies a deal.
//!
//! ## Architecture
//!
//! - **Persistent Piles**: Pile contents are `im::Vector`s, so cloning a
//!   board for look-ahead (auto-solve planning, property tests) is cheap.
//!
//! - **Location Index**: The board keeps a card-to-pile map next to the
//!   piles, making "where is this card" O(1).
//!
//! - **Auto-Solve Session**: Once the stock and waste are empty and every
//!   card is face-up, the game opens a session that plays the remaining
//!   cards to the foundations one step at a time.
//!
//! ## Modules
//!
//! - `core`: Errors, configuration, RNG, actions, events
//! - `cards`: Suits, ranks, card identity, deck factory
//! - `zones`: Piles and the board
//! - `rules`: Move legality predicates
//! - `game`: The game mutator
//! - `autosolve`: Auto-completion planner and paced driver

pub mod autosolve;
pub mod cards;
pub mod core;
pub mod game;
pub mod rules;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionOutcome, MoveOutcome,
    KlondikeConfig, DEFAULT_AUTO_SOLVE_DELAY,
    GameError, ParseError, Result,
    EventSink, GameEvent,
    GameRng,
};

pub use crate::cards::{Card, CardId, Color, Deal, Rank, Suit};

pub use crate::zones::{Board, Draw, Layout, Pile, PileId};

pub use crate::game::{AutoSolve, Game};

pub use crate::autosolve::{
    AutoSolveDriver, CandidatePolicy, Pacer, SolveStep, ThreadPacer,
};
