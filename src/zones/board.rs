//! The board: all thirteen piles plus a card-location index.
//!
//! `Board` owns the stock, the waste, seven tableau columns and four
//! foundations. It performs the raw pile mechanics (draw, recycle, flip,
//! transfer) and keeps `locations` in step with them so every card can
//! be found in O(1). It does not judge legality; that is the job of the
//! rules module and the game mutator.
//!
//! ## Invariants
//!
//! After every operation:
//! - each of the 52 cards is in exactly one pile
//! - foundation `s` holds ranks `0..k` of suit `s`, in order
//! - a face-down card never sits above a face-up one in a column
//! - stock cards are face-down, waste and foundation cards face-up
//!
//! `Board::verify` checks all of these and is used for hand-built
//! layouts.

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::pile::{Pile, PileId, Run};
use crate::cards::{Card, CardId, Deal, Suit, COLUMN_COUNT, DECK_SIZE, RANKS_PER_SUIT};
use crate::core::error::{GameError, Result};

const REASON_NO_SUCH_PILE: &str = "no such pile";
const REASON_SAME_PILE: &str = "source and destination are the same pile";
const REASON_NOT_TOP: &str = "only the top card of this pile can move";
const REASON_NOT_A_COLUMN: &str = "only tableau cards can be flipped";
const REASON_ALREADY_FACE_UP: &str = "card is already face-up";
const REASON_NO_CARD_AT_INDEX: &str = "no card at that position";

/// Result of a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Draw {
    /// The stock's top card moved to the waste, face-up.
    Drew(CardId),
    /// The stock was empty; the waste was turned over into it.
    Recycled,
}

/// Hand-specified pile contents, bottom-to-top.
///
/// Used to set up specific positions. `foundations` is indexed by
/// `Suit::index`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    pub stock: Vec<Card>,
    pub waste: Vec<Card>,
    pub columns: [Vec<Card>; COLUMN_COUNT],
    pub foundations: [Vec<Card>; 4],
}

/// All piles of one game.
#[derive(Clone, Debug, Serialize)]
pub struct Board {
    stock: Pile,
    waste: Pile,
    columns: [Pile; COLUMN_COUNT],
    foundations: [Pile; 4],
    #[serde(skip)]
    locations: FxHashMap<CardId, PileId>,
}

impl Board {
    /// Board for a fresh deal: columns as dealt, everything else in stock.
    #[must_use]
    pub fn from_deal(deal: Deal) -> Self {
        Self::assemble(Layout {
            stock: deal.stock,
            waste: Vec::new(),
            columns: deal.columns,
            foundations: Default::default(),
        })
    }

    /// Board for a hand-built layout, checked against every invariant.
    pub fn from_layout(layout: Layout) -> Result<Self> {
        let board = Self::assemble(layout);
        board.verify()?;
        Ok(board)
    }

    fn assemble(layout: Layout) -> Self {
        let Layout {
            stock,
            waste,
            columns,
            foundations,
        } = layout;

        let mut column_cards = columns.into_iter();
        let columns: [Pile; COLUMN_COUNT] = std::array::from_fn(|i| {
            Pile::from_cards(PileId::Column(i as u8), column_cards.next().unwrap_or_default())
        });

        let mut foundation_cards = foundations.into_iter();
        let foundations: [Pile; 4] = std::array::from_fn(|i| {
            Pile::from_cards(PileId::Foundation(Suit::ALL[i]), foundation_cards.next().unwrap_or_default())
        });

        let mut board = Self {
            stock: Pile::from_cards(PileId::Stock, stock),
            waste: Pile::from_cards(PileId::Waste, waste),
            columns,
            foundations,
            locations: FxHashMap::default(),
        };
        board.reindex();
        board
    }

    fn reindex(&mut self) {
        let mut locations = FxHashMap::default();
        for pile in self.piles() {
            for card in pile.iter() {
                locations.insert(card.id(), pile.id());
            }
        }
        self.locations = locations;
    }

    // === Access ===

    /// Pile by id; `None` for an out-of-range column.
    #[must_use]
    pub fn pile(&self, id: PileId) -> Option<&Pile> {
        match id {
            PileId::Stock => Some(&self.stock),
            PileId::Waste => Some(&self.waste),
            PileId::Column(i) => self.columns.get(i as usize),
            PileId::Foundation(suit) => Some(&self.foundations[suit.index()]),
        }
    }

    fn pile_mut(&mut self, id: PileId) -> Result<&mut Pile> {
        match id {
            PileId::Stock => Ok(&mut self.stock),
            PileId::Waste => Ok(&mut self.waste),
            PileId::Column(i) => self
                .columns
                .get_mut(i as usize)
                .ok_or(GameError::illegal(REASON_NO_SUCH_PILE)),
            PileId::Foundation(suit) => Ok(&mut self.foundations[suit.index()]),
        }
    }

    #[must_use]
    pub fn stock(&self) -> &Pile {
        &self.stock
    }

    #[must_use]
    pub fn waste(&self) -> &Pile {
        &self.waste
    }

    #[must_use]
    pub fn columns(&self) -> &[Pile; COLUMN_COUNT] {
        &self.columns
    }

    #[must_use]
    pub fn foundations(&self) -> &[Pile; 4] {
        &self.foundations
    }

    #[must_use]
    pub fn foundation(&self, suit: Suit) -> &Pile {
        &self.foundations[suit.index()]
    }

    /// Number of cards on a suit's foundation, i.e. the next rank it needs.
    #[must_use]
    pub fn foundation_len(&self, suit: Suit) -> usize {
        self.foundation(suit).len()
    }

    /// All piles in board order.
    pub fn piles(&self) -> impl Iterator<Item = &Pile> + '_ {
        [&self.stock, &self.waste]
            .into_iter()
            .chain(self.columns.iter())
            .chain(self.foundations.iter())
    }

    /// Every card on the board, pile by pile.
    pub fn cards(&self) -> impl Iterator<Item = &Card> + '_ {
        self.piles().flat_map(Pile::iter)
    }

    /// Pile currently holding `card`.
    #[must_use]
    pub fn location(&self, card: CardId) -> Option<PileId> {
        self.locations.get(&card).copied()
    }

    /// Pile and index currently holding `card`.
    #[must_use]
    pub fn find(&self, card: CardId) -> Option<(PileId, usize)> {
        let pile_id = self.location(card)?;
        let index = self.pile(pile_id)?.position(card)?;
        Some((pile_id, index))
    }

    /// The card itself, with its current face.
    #[must_use]
    pub fn card(&self, card: CardId) -> Option<&Card> {
        let (pile_id, index) = self.find(card)?;
        self.pile(pile_id)?.get(index)
    }

    // === Win / auto-solve conditions ===

    /// All four foundations hold 13 cards.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.foundations
            .iter()
            .all(|f| f.len() == RANKS_PER_SUIT as usize)
    }

    /// Stock and waste empty and every remaining card face-up.
    #[must_use]
    pub fn is_auto_completable(&self) -> bool {
        self.stock.is_empty()
            && self.waste.is_empty()
            && self.columns.iter().flat_map(Pile::iter).all(Card::is_face_up)
    }

    // === Mechanics ===

    /// Draw one card from stock to waste, or recycle when stock is empty.
    pub fn draw(&mut self) -> Result<Draw> {
        if self.stock.is_empty() {
            self.recycle()?;
            return Ok(Draw::Recycled);
        }

        let mut card = self.stock.pop_top()?;
        card.turn_face_up();
        self.waste.push_top(card);
        self.locations.insert(card.id(), PileId::Waste);
        Ok(Draw::Drew(card.id()))
    }

    /// Turn the waste over into the empty stock.
    ///
    /// The first card drawn of the old waste becomes the new stock top,
    /// restoring the original draw order.
    pub fn recycle(&mut self) -> Result<()> {
        if !self.stock.is_empty() {
            return Err(GameError::illegal("stock must be empty to recycle"));
        }
        if self.waste.is_empty() {
            return Err(GameError::EmptyPile(PileId::Stock));
        }

        for mut card in self.waste.take_all().into_iter().rev() {
            card.turn_face_down();
            self.locations.insert(card.id(), PileId::Stock);
            self.stock.push_top(card);
        }
        Ok(())
    }

    /// Turn a column's face-down top card face-up.
    pub fn flip_top(&mut self, column: PileId) -> Result<CardId> {
        if !column.is_column() {
            return Err(GameError::illegal(REASON_NOT_A_COLUMN));
        }
        let pile = self.pile_mut(column)?;
        let card = pile.top_mut().ok_or(GameError::EmptyPile(column))?;
        if card.is_face_up() {
            return Err(GameError::illegal(REASON_ALREADY_FACE_UP));
        }
        card.turn_face_up();
        Ok(card.id())
    }

    /// Move the cards from `index` up out of `from` onto `to`.
    ///
    /// Columns give up the whole suffix; other piles only their top card.
    pub fn transfer(&mut self, from: PileId, index: usize, to: PileId) -> Result<Run> {
        if from == to {
            return Err(GameError::illegal(REASON_SAME_PILE));
        }
        if !to.is_valid() {
            return Err(GameError::illegal(REASON_NO_SUCH_PILE));
        }

        let source = self.pile_mut(from)?;
        let run = if from.is_column() {
            source.pop_run(index)?
        } else {
            if index + 1 != source.len() {
                return Err(GameError::illegal(REASON_NOT_TOP));
            }
            let mut run = Run::new();
            run.push(source.pop_top()?);
            run
        };

        for card in &run {
            self.locations.insert(card.id(), to);
        }
        self.pile_mut(to)?.push_run(run.iter().copied());
        Ok(run)
    }

    /// Move exactly one card, wherever it sits in `from`, onto `to`.
    pub fn transfer_single(&mut self, from: PileId, index: usize, to: PileId) -> Result<Card> {
        if from == to {
            return Err(GameError::illegal(REASON_SAME_PILE));
        }
        if !to.is_valid() {
            return Err(GameError::illegal(REASON_NO_SUCH_PILE));
        }

        let card = self
            .pile_mut(from)?
            .remove_at(index)
            .ok_or(GameError::illegal(REASON_NO_CARD_AT_INDEX))?;
        self.locations.insert(card.id(), to);
        self.pile_mut(to)?.push_top(card);
        Ok(card)
    }

    // === Invariants ===

    /// Check every board invariant.
    pub fn verify(&self) -> Result<()> {
        let mut seen = [false; DECK_SIZE];
        let mut count = 0;
        for card in self.cards() {
            let slot = &mut seen[card.id().index()];
            if *slot {
                return Err(GameError::layout("card appears more than once"));
            }
            *slot = true;
            count += 1;
        }
        if count != DECK_SIZE {
            return Err(GameError::layout("board must hold all 52 cards"));
        }

        for pile in self.piles() {
            for card in pile.iter() {
                if self.location(card.id()) != Some(pile.id()) {
                    return Err(GameError::layout("location index out of step with piles"));
                }
            }
        }

        for (suit, pile) in Suit::ALL.into_iter().zip(&self.foundations) {
            for (rank, card) in pile.iter().enumerate() {
                if card.suit() != suit || usize::from(card.rank().value()) != rank {
                    return Err(GameError::layout("foundation out of sequence"));
                }
            }
        }

        if self.stock.iter().any(Card::is_face_up) {
            return Err(GameError::layout("stock cards must be face-down"));
        }
        if self
            .waste
            .iter()
            .chain(self.foundations.iter().flat_map(Pile::iter))
            .any(|c| !c.is_face_up())
        {
            return Err(GameError::layout("waste and foundation cards must be face-up"));
        }

        for column in &self.columns {
            let face_down_above_face_up = column
                .iter()
                .skip_while(|c| !c.is_face_up())
                .any(|c| !c.is_face_up());
            if face_down_above_face_up {
                return Err(GameError::layout("face-down card above a face-up card"));
            }
        }

        Ok(())
    }
}
