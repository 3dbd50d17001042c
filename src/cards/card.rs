//! Card identity: suits, ranks, colors and the stable id exposed to the UI.
//!
//! ## Identity vs. state
//!
//! A card's identity is the pair (rank, suit), packed into a `CardId`.
//! The only per-game mutable attribute is whether the card is face-up,
//! which lives on `Card` alongside the id.
//!
//! ## UI ids
//!
//! `CardId` renders as `card-c{rank}s{suit}` (e.g. `card-c0s1` for the
//! Ace of hearts) and parses back from the same string, so the
//! presentation layer can key its elements on it directly.
//!
//! ```
//! use klondike_engine::cards::{CardId, Rank, Suit};
//!
//! let ace = CardId::new(Suit::Heart, Rank::ACE);
//! assert_eq!(ace.to_string(), "card-c0s1");
//! assert_eq!("card-c0s1".parse::<CardId>().unwrap(), ace);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::ParseError;

/// Number of ranks in each suit (Ace through King).
pub const RANKS_PER_SUIT: u8 = 13;

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

/// The four suits, in the order used for card ids and foundations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spade,
    Heart,
    Club,
    Diamond,
}

impl Suit {
    /// All suits in index order.
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond];

    /// Index of this suit (spade=0, heart=1, club=2, diamond=3).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Suit for an index in `0..4`.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Spade),
            1 => Some(Suit::Heart),
            2 => Some(Suit::Club),
            3 => Some(Suit::Diamond),
            _ => None,
        }
    }

    /// Hearts and diamonds are red, spades and clubs black.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Heart | Suit::Diamond => Color::Red,
            Suit::Spade | Suit::Club => Color::Black,
        }
    }

    /// Lowercase name, as used in pile ids.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Suit::Spade => "spade",
            Suit::Heart => "heart",
            Suit::Club => "club",
            Suit::Diamond => "diamond",
        }
    }

    /// Unicode suit glyph.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Suit::Spade => '\u{2660}',
            Suit::Heart => '\u{2665}',
            Suit::Club => '\u{2663}',
            Suit::Diamond => '\u{2666}',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Suit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Suit::ALL
            .into_iter()
            .find(|suit| suit.name() == s)
            .ok_or_else(|| ParseError::Suit(s.to_string()))
    }
}

/// Card color, derived from the suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
}

/// Card rank, 0 (Ace) through 12 (King).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    pub const ACE: Rank = Rank(0);
    pub const QUEEN: Rank = Rank(11);
    pub const KING: Rank = Rank(12);

    /// Create a rank, returning `None` outside `0..13`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value < RANKS_PER_SUIT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Iterate Ace through King.
    pub fn all() -> impl DoubleEndedIterator<Item = Rank> {
        (0..RANKS_PER_SUIT).map(Rank)
    }

    /// Raw rank value (Ace=0).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Short label used on card faces.
    #[must_use]
    pub const fn label(self) -> &'static str {
        const LABELS: [&str; 13] = ["A", "2", "3", "4", "5", "6", "7", "8", "9", "10", "J", "Q", "K"];
        LABELS[self.0 as usize]
    }
}

impl TryFrom<u8> for Rank {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::new(value).ok_or(ParseError::RankOutOfRange(value))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

/// Stable card identity: `suit_index * 13 + rank`, always in `0..52`.
///
/// Serializes as its UI string, the same form `Display` produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(u8);

impl CardId {
    /// Id for the given suit and rank.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self(suit as u8 * RANKS_PER_SUIT + rank.0)
    }

    /// All 52 ids, suit-major (all spades, then hearts, ...).
    pub fn all() -> impl DoubleEndedIterator<Item = CardId> {
        (0..DECK_SIZE as u8).map(CardId)
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        match self.0 / RANKS_PER_SUIT {
            0 => Suit::Spade,
            1 => Suit::Heart,
            2 => Suit::Club,
            _ => Suit::Diamond,
        }
    }

    #[must_use]
    pub const fn rank(self) -> Rank {
        Rank(self.0 % RANKS_PER_SUIT)
    }

    #[must_use]
    pub const fn color(self) -> Color {
        self.suit().color()
    }

    /// Raw index in `0..52`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for CardId {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (value as usize) < DECK_SIZE {
            Ok(Self(value))
        } else {
            Err(ParseError::CardIndexOutOfRange(value))
        }
    }
}

impl From<CardId> for u8 {
    fn from(id: CardId) -> Self {
        id.0
    }
}

impl TryFrom<String> for CardId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card-c{}s{}", self.rank().value(), self.suit().index())
    }
}

impl FromStr for CardId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::CardId(s.to_string());

        let body = s.strip_prefix("card-c").ok_or_else(invalid)?;
        let (rank, suit) = body.split_once('s').ok_or_else(invalid)?;
        let rank = rank.parse::<u8>().ok().and_then(Rank::new).ok_or_else(invalid)?;
        let suit = suit
            .parse::<usize>()
            .ok()
            .and_then(Suit::from_index)
            .ok_or_else(invalid)?;

        Ok(CardId::new(suit, rank))
    }
}

/// A card in play: identity plus its face-up flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    face_up: bool,
}

impl Card {
    /// A face-down card.
    #[must_use]
    pub const fn new(id: CardId) -> Self {
        Self { id, face_up: false }
    }

    /// A face-up card.
    #[must_use]
    pub const fn face_up(id: CardId) -> Self {
        Self { id, face_up: true }
    }

    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    #[must_use]
    pub const fn suit(&self) -> Suit {
        self.id.suit()
    }

    #[must_use]
    pub const fn rank(&self) -> Rank {
        self.id.rank()
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.id.color()
    }

    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn turn_face_up(&mut self) {
        self.face_up = true;
    }

    pub fn turn_face_down(&mut self) {
        self.face_up = false;
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank().label(), self.suit().glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suit_colors() {
        assert_eq!(Suit::Heart.color(), Color::Red);
        assert_eq!(Suit::Diamond.color(), Color::Red);
        assert_eq!(Suit::Spade.color(), Color::Black);
        assert_eq!(Suit::Club.color(), Color::Black);
    }

    #[test]
    fn test_card_id_layout() {
        let king_of_diamonds = CardId::new(Suit::Diamond, Rank::KING);
        assert_eq!(king_of_diamonds.index(), 51);
        assert_eq!(king_of_diamonds.suit(), Suit::Diamond);
        assert_eq!(king_of_diamonds.rank(), Rank::KING);

        let ids: Vec<_> = CardId::all().collect();
        assert_eq!(ids.len(), DECK_SIZE);
        assert_eq!(ids[13], CardId::new(Suit::Heart, Rank::ACE));
    }

    #[test]
    fn test_card_id_display_and_parse() {
        let id = CardId::new(Suit::Club, Rank::new(9).unwrap());
        assert_eq!(id.to_string(), "card-c9s2");
        assert_eq!("card-c9s2".parse::<CardId>(), Ok(id));

        for id in CardId::all() {
            assert_eq!(id.to_string().parse::<CardId>(), Ok(id));
        }
    }

    #[test]
    fn test_card_id_parse_rejects_garbage() {
        assert!("card-c13s0".parse::<CardId>().is_err());
        assert!("card-c1s4".parse::<CardId>().is_err());
        assert!("c1s1".parse::<CardId>().is_err());
        assert!("card-cxs1".parse::<CardId>().is_err());
    }

    #[test]
    fn test_card_id_try_from() {
        assert_eq!(CardId::try_from(0u8), Ok(CardId::new(Suit::Spade, Rank::ACE)));
        assert_eq!(CardId::try_from(52u8), Err(ParseError::CardIndexOutOfRange(52)));
    }

    #[test]
    fn test_card_label() {
        let ten = Card::face_up(CardId::new(Suit::Heart, Rank::new(9).unwrap()));
        assert_eq!(ten.to_string(), "10\u{2665}");

        let ace = Card::new(CardId::new(Suit::Spade, Rank::ACE));
        assert_eq!(ace.to_string(), "A\u{2660}");
    }

    #[test]
    fn test_face_up_flag() {
        let mut card = Card::new(CardId::new(Suit::Spade, Rank::QUEEN));
        assert!(!card.is_face_up());
        card.turn_face_up();
        assert!(card.is_face_up());
        card.turn_face_down();
        assert!(!card.is_face_up());
    }

    #[test]
    fn test_serde_uses_ui_string() {
        let king_of_diamonds = CardId::new(Suit::Diamond, Rank::KING);
        assert_eq!(serde_json::to_string(&king_of_diamonds).unwrap(), r#""card-c12s3""#);

        let parsed: CardId = serde_json::from_str(r#""card-c12s3""#).unwrap();
        assert_eq!(parsed.index(), 51);
        assert!(serde_json::from_str::<CardId>(r#""card-c13s3""#).is_err());
        assert!(serde_json::from_str::<CardId>("51").is_err());
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::face_up(CardId::new(Suit::Diamond, Rank::new(4).unwrap()));
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
