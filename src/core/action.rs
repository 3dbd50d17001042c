//! Inbound commands and their outcomes.
//!
//! Every user gesture (click on the stock, click on a face-down card,
//! drag and drop, double-click) translates to one `Action`. The game
//! applies it through a single entry point, `Game::apply`.
//!
//! ```
//! use klondike_engine::core::Action;
//! use klondike_engine::zones::PileId;
//!
//! let drop: Action = Action::Move {
//!     card: "card-c12s0".parse().unwrap(),
//!     to: "column-3".parse().unwrap(),
//! };
//! assert_eq!(drop, Action::Move { card: "card-c12s0".parse().unwrap(), to: PileId::Column(2) });
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardId;
use crate::zones::{Draw, PileId};

/// A command from the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Click on the stock.
    Draw,
    /// Click on a face-down tableau card.
    Flip { card: CardId },
    /// Drop a card (and everything above it) on a pile.
    Move { card: CardId, to: PileId },
    /// Double-click: send a card to its suit's foundation.
    AutoFoundation { card: CardId },
}

/// Cards moved by one accepted move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Moved cards, bottom-most first.
    pub cards: SmallVec<[CardId; 13]>,
    pub from: PileId,
    pub to: PileId,
}

impl MoveOutcome {
    /// The card that was picked up (bottom of the run).
    #[must_use]
    pub fn lead(&self) -> Option<CardId> {
        self.cards.first().copied()
    }
}

/// What an accepted `Action` did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "result", rename_all = "camelCase")]
pub enum ActionOutcome {
    Drew(Draw),
    Flipped(CardId),
    Moved(MoveOutcome),
}
