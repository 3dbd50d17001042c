//! Move legality predicates.
//!
//! Pure functions over the cards they are given. They never touch the
//! board; the game mutator looks up the relevant cards and asks.

use crate::cards::{Card, Rank};
use crate::zones::Pile;

/// True if the two cards are of opposite colors.
#[inline]
#[must_use]
pub fn is_different_color(a: &Card, b: &Card) -> bool {
    a.color() != b.color()
}

/// Can `moving` be placed on a tableau column whose top is `target`?
///
/// An empty column (`None`) takes only a King. Otherwise the target
/// must be exactly one rank higher and of the other color.
#[must_use]
pub fn can_stack_on_tableau(moving: &Card, target: Option<&Card>) -> bool {
    match target {
        None => moving.rank() == Rank::KING,
        Some(target) => {
            target.rank().value() == moving.rank().value() + 1 && is_different_color(moving, target)
        }
    }
}

/// Can `moving` go onto its suit's foundation holding `foundation_len` cards?
///
/// A foundation's length is the rank it needs next, so an Ace (0) lands
/// only on an empty one.
#[inline]
#[must_use]
pub fn can_stack_on_foundation(moving: &Card, foundation_len: usize) -> bool {
    usize::from(moving.rank().value()) == foundation_len
}

/// Can the cards of `column` from `start` to the top be lifted together?
///
/// Every card of the run must be face-up. The run's own internal order
/// is not checked; where it may land is decided by its first card.
#[must_use]
pub fn is_movable_run(column: &Pile, start: usize) -> bool {
    column.id().is_column()
        && start < column.len()
        && column.iter().skip(start).all(Card::is_face_up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Suit};
    use crate::zones::PileId;

    fn card(suit: Suit, rank: u8) -> Card {
        Card::face_up(CardId::new(suit, Rank::new(rank).unwrap()))
    }

    #[test]
    fn test_king_on_empty_column() {
        assert!(can_stack_on_tableau(&card(Suit::Spade, 12), None));
        assert!(can_stack_on_tableau(&card(Suit::Heart, 12), None));
        assert!(!can_stack_on_tableau(&card(Suit::Heart, 11), None));
        assert!(!can_stack_on_tableau(&card(Suit::Club, 0), None));
    }

    #[test]
    fn test_descending_alternating() {
        let red_nine = card(Suit::Heart, 8);
        let black_ten = card(Suit::Spade, 9);
        let red_ten = card(Suit::Diamond, 9);
        let black_jack = card(Suit::Club, 10);

        assert!(can_stack_on_tableau(&red_nine, Some(&black_ten)));
        assert!(!can_stack_on_tableau(&red_nine, Some(&red_ten)));
        assert!(!can_stack_on_tableau(&red_nine, Some(&black_jack)));
        // Upward never works.
        assert!(!can_stack_on_tableau(&black_ten, Some(&red_nine)));
    }

    #[test]
    fn test_foundation_needs_next_rank() {
        let ace = card(Suit::Heart, 0);
        let two = card(Suit::Heart, 1);

        assert!(can_stack_on_foundation(&ace, 0));
        assert!(!can_stack_on_foundation(&ace, 1));
        assert!(can_stack_on_foundation(&two, 1));
        assert!(!can_stack_on_foundation(&two, 0));
        assert!(can_stack_on_foundation(&card(Suit::Club, 12), 12));
    }

    #[test]
    fn test_movable_run() {
        let column = Pile::from_cards(
            PileId::Column(0),
            [
                Card::new(CardId::new(Suit::Spade, Rank::KING)),
                card(Suit::Heart, 9),
                card(Suit::Club, 8),
                // Out of order, still liftable.
                card(Suit::Club, 2),
            ],
        );

        assert!(!is_movable_run(&column, 0));
        assert!(is_movable_run(&column, 1));
        assert!(is_movable_run(&column, 3));
        assert!(!is_movable_run(&column, 4));
    }

    #[test]
    fn test_movable_run_only_from_columns() {
        let waste = Pile::from_cards(PileId::Waste, [card(Suit::Heart, 4)]);
        assert!(!is_movable_run(&waste, 0));
    }
}
