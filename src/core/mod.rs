//! Core engine plumbing: errors, configuration, RNG, commands, events.

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod rng;

pub use action::{Action, ActionOutcome, MoveOutcome};
pub use config::{KlondikeConfig, DEFAULT_AUTO_SOLVE_DELAY};
pub use error::{GameError, ParseError, Result};
pub use event::{EventSink, GameEvent};
pub use rng::GameRng;
