//! Error types.
//!
//! None of these are fatal. A rejected move is an ordinary outcome of
//! user interaction: the state is left untouched and the caller gets the
//! error back as a `Result`.

use thiserror::Error;

use crate::cards::CardId;
use crate::zones::PileId;

/// Errors returned by game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The rules reject the move; nothing changed.
    #[error("illegal move: {reason}")]
    IllegalMove { reason: &'static str },

    /// Drawing or popping from a pile with nothing to give.
    #[error("{0} is empty")]
    EmptyPile(PileId),

    /// Flip attempted on a card that is not the last in its column.
    #[error("{0} is not the last card in its column")]
    NotLastCard(CardId),

    /// Auto-solve started while a session is already running.
    #[error("auto-solve is already running")]
    Reentrancy,

    /// A hand-built layout breaks a board invariant.
    #[error("invalid layout: {reason}")]
    InvalidLayout { reason: &'static str },
}

impl GameError {
    pub(crate) const fn illegal(reason: &'static str) -> Self {
        GameError::IllegalMove { reason }
    }

    pub(crate) const fn layout(reason: &'static str) -> Self {
        GameError::InvalidLayout { reason }
    }
}

/// Errors from parsing ids handed over by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("card index {0} is out of range (expected 0..52)")]
    CardIndexOutOfRange(u8),
    #[error("rank {0} is out of range (expected 0..13)")]
    RankOutOfRange(u8),
    #[error("unrecognized card id `{0}`")]
    CardId(String),
    #[error("unrecognized pile id `{0}`")]
    PileId(String),
    #[error("unrecognized suit `{0}`")]
    Suit(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
