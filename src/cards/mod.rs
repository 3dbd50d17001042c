//! Card model and deck factory.
//!
//! ## Key Types
//!
//! - `Suit`, `Rank`, `Color`: card identity components
//! - `CardId`: Stable (rank, suit) identity exposed to the UI
//! - `Card`: A card in play (identity + face-up flag)
//! - `Deal`: The opening tableau and stock

pub mod card;
pub mod deck;

pub use card::{Card, CardId, Color, Rank, Suit, DECK_SIZE, RANKS_PER_SUIT};
pub use deck::{deal_columns, shuffle, shuffled_deck, standard_deck, Deal, COLUMN_COUNT, DEALT_TO_TABLEAU};
