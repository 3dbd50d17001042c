//! Piles: ordered card sequences with kind-specific access rules.
//!
//! Every pile stores its cards bottom-to-top; the top is the last
//! element. Storage is an `im::Vector`, so cloning a whole board for the
//! auto-solve planner is O(1) per pile.

use std::fmt;
use std::str::FromStr;

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardId, Suit, COLUMN_COUNT};
use crate::core::error::{GameError, ParseError, Result};

/// Cards lifted off a column together, bottom-most first.
pub type Run = SmallVec<[Card; 13]>;

const REASON_RUN_FROM_NON_COLUMN: &str = "only tableau columns can give up a run";
const REASON_RUN_OUT_OF_RANGE: &str = "run start is past the end of the column";

/// Stable pile address.
///
/// Renders as `stock`, `waste`, `column-1`..`column-7` or
/// `foundation-<suit>`. Column indices are 0-based internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PileId {
    Stock,
    Waste,
    Column(u8),
    Foundation(Suit),
}

impl PileId {
    /// Every pile, in board order.
    pub const ALL: [PileId; 13] = [
        PileId::Stock,
        PileId::Waste,
        PileId::Column(0),
        PileId::Column(1),
        PileId::Column(2),
        PileId::Column(3),
        PileId::Column(4),
        PileId::Column(5),
        PileId::Column(6),
        PileId::Foundation(Suit::Spade),
        PileId::Foundation(Suit::Heart),
        PileId::Foundation(Suit::Club),
        PileId::Foundation(Suit::Diamond),
    ];

    /// Column pile for a 0-based index, or `None` past the seventh.
    #[must_use]
    pub fn column(index: usize) -> Option<Self> {
        (index < COLUMN_COUNT).then_some(PileId::Column(index as u8))
    }

    #[must_use]
    pub const fn foundation(suit: Suit) -> Self {
        PileId::Foundation(suit)
    }

    /// False for out-of-range column indices.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        match self {
            PileId::Column(i) => (i as usize) < COLUMN_COUNT,
            _ => true,
        }
    }

    #[must_use]
    pub const fn is_column(self) -> bool {
        matches!(self, PileId::Column(_))
    }

    #[must_use]
    pub const fn is_foundation(self) -> bool {
        matches!(self, PileId::Foundation(_))
    }
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileId::Stock => f.write_str("stock"),
            PileId::Waste => f.write_str("waste"),
            PileId::Column(i) => write!(f, "column-{}", u16::from(*i) + 1),
            PileId::Foundation(suit) => write!(f, "foundation-{}", suit),
        }
    }
}

impl FromStr for PileId {
    type Err = ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = || ParseError::PileId(s.to_string());

        match s {
            "stock" => return Ok(PileId::Stock),
            "waste" => return Ok(PileId::Waste),
            _ => {}
        }

        if let Some(n) = s.strip_prefix("column-") {
            let n: usize = n.parse().map_err(|_| invalid())?;
            return n.checked_sub(1).and_then(PileId::column).ok_or_else(invalid);
        }

        if let Some(suit) = s.strip_prefix("foundation-") {
            return suit.parse().map(PileId::Foundation).map_err(|_| invalid());
        }

        Err(invalid())
    }
}

impl TryFrom<String> for PileId {
    type Error = ParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PileId> for String {
    fn from(id: PileId) -> Self {
        id.to_string()
    }
}

/// One pile on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    id: PileId,
    cards: Vector<Card>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new(id: PileId) -> Self {
        Self {
            id,
            cards: Vector::new(),
        }
    }

    /// Create a pile holding `cards`, bottom first.
    pub fn from_cards(id: PileId, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            id,
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PileId {
        self.id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at `index` (0 = bottom).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Iterate bottom-to-top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Card> + '_ {
        self.cards.iter()
    }

    /// Position of a card in this pile.
    #[must_use]
    pub fn position(&self, card: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id() == card)
    }

    #[must_use]
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.back()
    }

    pub(crate) fn top_mut(&mut self) -> Option<&mut Card> {
        self.cards.back_mut()
    }

    #[must_use]
    pub fn is_top_face_up(&self) -> bool {
        self.peek_top().is_some_and(Card::is_face_up)
    }

    pub fn push_top(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Remove the top card.
    pub fn pop_top(&mut self) -> Result<Card> {
        self.cards.pop_back().ok_or(GameError::EmptyPile(self.id))
    }

    /// Remove the suffix starting at `from` (columns only).
    pub fn pop_run(&mut self, from: usize) -> Result<Run> {
        if !self.id.is_column() {
            return Err(GameError::illegal(REASON_RUN_FROM_NON_COLUMN));
        }
        if from >= self.cards.len() {
            return Err(GameError::illegal(REASON_RUN_OUT_OF_RANGE));
        }
        let run = self.cards.split_off(from);
        Ok(run.into_iter().collect())
    }

    /// Append cards in order; the last one becomes the top.
    pub fn push_run(&mut self, run: impl IntoIterator<Item = Card>) {
        self.cards.extend(run);
    }

    /// Remove a single card anywhere in the pile.
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    /// Take every card out, leaving the pile empty.
    pub(crate) fn take_all(&mut self) -> Vector<Card> {
        std::mem::take(&mut self.cards)
    }
}
