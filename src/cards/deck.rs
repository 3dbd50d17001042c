//! Deck factory: the canonical 52 cards, shuffling and the opening deal.
//!
//! The deal pops from the end of the shuffled deck, so the last element
//! of the deck is the first card dealt. Columns are dealt in order
//! 1..=7 with `n` cards in column `n`; the last card of each column is
//! turned face-up. The 24 undealt cards stay in place and become the
//! stock, whose top is the deck's last remaining element.

use super::card::{Card, CardId, DECK_SIZE};
use crate::core::rng::GameRng;

/// Number of tableau columns.
pub const COLUMN_COUNT: usize = 7;

/// Cards dealt into the tableau (1 + 2 + ... + 7).
pub const DEALT_TO_TABLEAU: usize = COLUMN_COUNT * (COLUMN_COUNT + 1) / 2;

/// Result of the opening deal, bottom-to-top per pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    pub columns: [Vec<Card>; COLUMN_COUNT],
    pub stock: Vec<Card>,
}

/// All 52 cards, suit-major, face-down.
#[must_use]
pub fn standard_deck() -> Vec<Card> {
    CardId::all().map(Card::new).collect()
}

/// Uniform in-place permutation (Fisher-Yates).
///
/// For `i` from the last index down to 1, swap element `i` with a
/// uniformly chosen element in `[0, i]`.
pub fn shuffle<T>(items: &mut [T], rng: &mut GameRng) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_index(i);
        items.swap(i, j);
    }
}

/// A fresh standard deck, shuffled with `rng`.
#[must_use]
pub fn shuffled_deck(rng: &mut GameRng) -> Vec<Card> {
    let mut deck = standard_deck();
    shuffle(&mut deck, rng);
    deck
}

/// Deal columns of sizes 1..=7 from the end of `deck`.
///
/// Whatever is left of `deck` becomes the stock, face-down.
#[must_use]
pub fn deal_columns(mut deck: Vec<Card>) -> Deal {
    debug_assert_eq!(deck.len(), DECK_SIZE);

    let mut columns: [Vec<Card>; COLUMN_COUNT] = Default::default();
    for (i, column) in columns.iter_mut().enumerate() {
        let size = i + 1;
        for row in 0..size {
            let Some(mut card) = deck.pop() else { break };
            if row + 1 == size {
                card.turn_face_up();
            }
            column.push(card);
        }
    }

    for card in &mut deck {
        card.turn_face_down();
    }

    Deal { columns, stock: deck }
}
