//! Pure auto-completion planning.
//!
//! Once the stock and waste are empty and every card is face-up, the
//! rest of the game needs no decisions: each foundation only ever wants
//! its next rank. One planning step gathers candidate cards from the
//! tableau, sorts them by rank (Ace first) and takes the first whose
//! rank equals its foundation's length.
//!
//! ## Candidate policies
//!
//! - `TopOnly`: only each column's top card is a candidate. A buried
//!   card is never pulled out from under others.
//! - `AllResident`: every card resident in a column is a candidate,
//!   wherever it sits. On a board reached by legal play both policies
//!   produce the same moves, because every column is then a descending
//!   sequence whose lowest card is on top.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::zones::{Board, PileId};

/// Which tableau cards the planner considers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CandidatePolicy {
    /// Each column's top card.
    #[default]
    TopOnly,
    /// Every card in every column.
    AllResident,
}

/// One auto-solve move: `card` leaves `from` (at `index`) for `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolveStep {
    pub card: CardId,
    pub from: PileId,
    pub index: usize,
    pub to: PileId,
}

/// Candidate cards in column order, bottom-to-top within a column.
fn candidates(board: &Board, policy: CandidatePolicy) -> Vec<(CardId, PileId, usize)> {
    let mut out = Vec::new();
    for column in board.columns() {
        match policy {
            CandidatePolicy::TopOnly => {
                if let Some(top) = column.peek_top() {
                    out.push((top.id(), column.id(), column.len() - 1));
                }
            }
            CandidatePolicy::AllResident => {
                out.extend(
                    column
                        .iter()
                        .enumerate()
                        .map(|(index, card)| (card.id(), column.id(), index)),
                );
            }
        }
    }
    out
}

/// The next foundation move, or `None` when nothing fits.
#[must_use]
pub fn next_step(board: &Board, policy: CandidatePolicy) -> Option<SolveStep> {
    let mut candidates = candidates(board, policy);
    // Stable: ties keep column order.
    candidates.sort_by_key(|(card, _, _)| card.rank());

    candidates
        .into_iter()
        .find(|(card, _, _)| usize::from(card.rank().value()) == board.foundation_len(card.suit()))
        .map(|(card, from, index)| SolveStep {
            card,
            from,
            index,
            to: PileId::Foundation(card.suit()),
        })
}

/// Every move from `board` to the point where no step applies.
///
/// Works on a clone; `board` is untouched.
#[must_use]
pub fn plan(board: &Board, policy: CandidatePolicy) -> Vec<SolveStep> {
    let mut scratch = board.clone();
    let mut steps = Vec::new();

    while let Some(step) = next_step(&scratch, policy) {
        if scratch.transfer_single(step.from, step.index, step.to).is_err() {
            log::warn!("planner produced an inapplicable step {:?}", step);
            break;
        }
        steps.push(step);
    }

    steps
}
