//! Outbound game events.
//!
//! Every applied mutation queues one or more events describing what
//! changed. The presentation layer either drains them with
//! `Game::drain_events` or receives them through an `EventSink`. A
//! rejected operation queues nothing.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::zones::PileId;

/// Something that happened on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// A card changed piles. Runs produce one event per card, bottom first.
    CardMoved { card: CardId, from: PileId, to: PileId },

    /// A tableau card was turned face-up.
    CardFlipped { card: CardId },

    /// The waste was turned over into the empty stock.
    StockRecycled,

    /// The board became auto-completable and a solve session was opened.
    AutoSolveReady,

    /// The auto-solver moved a card to its foundation.
    AutoSolveStep { card: CardId, to: PileId },

    /// All 52 cards are on the foundations. Emitted once.
    GameWon,
}

impl GameEvent {
    /// Card this event is about, if any.
    #[must_use]
    pub fn card(&self) -> Option<CardId> {
        match self {
            GameEvent::CardMoved { card, .. }
            | GameEvent::CardFlipped { card }
            | GameEvent::AutoSolveStep { card, .. } => Some(*card),
            GameEvent::StockRecycled | GameEvent::AutoSolveReady | GameEvent::GameWon => None,
        }
    }
}

/// Subscriber for game events.
pub trait EventSink {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventSink for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

impl EventSink for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn test_card_accessor() {
        let ace = CardId::new(Suit::Spade, Rank::ACE);
        let moved = GameEvent::CardMoved {
            card: ace,
            from: PileId::Waste,
            to: PileId::Foundation(Suit::Spade),
        };
        assert_eq!(moved.card(), Some(ace));
        assert_eq!(GameEvent::GameWon.card(), None);
    }

    #[test]
    fn test_closure_sink() {
        let mut count = 0;
        let mut sink = |_: &GameEvent| count += 1;
        sink.on_event(&GameEvent::StockRecycled);
        sink.on_event(&GameEvent::GameWon);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<GameEvent> = Vec::new();
        sink.on_event(&GameEvent::StockRecycled);
        assert_eq!(sink, vec![GameEvent::StockRecycled]);
    }

    #[test]
    fn test_serialization_shape() {
        let event = GameEvent::CardMoved {
            card: CardId::new(Suit::Heart, Rank::ACE),
            from: PileId::Column(0),
            to: PileId::Foundation(Suit::Heart),
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "cardMoved");
        assert_eq!(json["card"], "card-c0s1");
        assert_eq!(json["from"], "column-1");
        assert_eq!(json["to"], "foundation-heart");

        let back: GameEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
