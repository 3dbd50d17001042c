//! Auto-solve integration tests.
//!
//! Boards here are built by hand so that they already satisfy the
//! auto-solve precondition: stock and waste empty, everything face-up.

use std::time::Duration;

use proptest::prelude::*;

use klondike_engine::autosolve::{next_step, plan};
use klondike_engine::{
    AutoSolveDriver, Board, CandidatePolicy, Card, CardId, Game, GameError, GameEvent,
    KlondikeConfig, Layout, Pacer, PileId, Suit,
};

/// Ready board: foundations filled to `heights`, the remaining cards
/// spread over the columns by `placement`, each column descending.
fn ready_board(heights: [usize; 4], placement: &[usize]) -> Board {
    let mut layout = Layout::default();
    for (i, card) in CardId::all().enumerate() {
        let suit = card.suit();
        if usize::from(card.rank().value()) < heights[suit.index()] {
            layout.foundations[suit.index()].push(Card::face_up(card));
        } else {
            layout.columns[placement[i] % 7].push(Card::face_up(card));
        }
    }
    for column in &mut layout.columns {
        column.sort_by_key(|c| std::cmp::Reverse(c.rank()));
    }
    Board::from_layout(layout).unwrap()
}

fn scattered() -> Board {
    let placement: Vec<usize> = (0..52).map(|i| (i * 5 + 3) % 7).collect();
    ready_board([0; 4], &placement)
}

#[derive(Default)]
struct CountingPacer {
    pauses: usize,
}

impl Pacer for CountingPacer {
    fn pause(&mut self, _delay: Duration) {
        self.pauses += 1;
    }
}

/// Test that the session plays out to a win under both policies.
#[test]
fn test_session_wins_under_both_policies() {
    for policy in [CandidatePolicy::TopOnly, CandidatePolicy::AllResident] {
        let config = KlondikeConfig::default()
            .with_auto_trigger(false)
            .with_candidate_policy(policy);
        let mut game = Game::from_board(scattered(), config);

        let steps = game.auto_solve().unwrap().count();
        assert_eq!(steps, 52, "{:?} should need exactly 52 moves", policy);
        assert!(game.is_won());
        assert!(!game.is_auto_solving());
    }
}

/// Test that the pure plan matches what the session does.
#[test]
fn test_plan_matches_session() {
    let board = scattered();
    let planned = plan(&board, CandidatePolicy::TopOnly);

    let mut game = Game::from_board(board, KlondikeConfig::default().with_auto_trigger(false));
    let played: Vec<_> = game.auto_solve().unwrap().collect();

    assert_eq!(planned, played);
}

/// Test that every session step is reported as move plus solve step.
#[test]
fn test_session_events() {
    let mut game = Game::from_board(scattered(), KlondikeConfig::default().with_auto_trigger(false));
    game.begin_auto_solve().unwrap();
    let step = game.auto_solve_step().unwrap();

    assert_eq!(
        game.drain_events(),
        vec![
            GameEvent::AutoSolveReady,
            GameEvent::CardMoved {
                card: step.card,
                from: step.from,
                to: step.to,
            },
            GameEvent::AutoSolveStep {
                card: step.card,
                to: step.to,
            },
        ]
    );
    assert_eq!(step.to, PileId::Foundation(step.card.suit()));
}

/// Test the re-entrancy guard.
#[test]
fn test_second_session_is_rejected() {
    let mut game = Game::from_board(scattered(), KlondikeConfig::default().with_auto_trigger(false));
    game.begin_auto_solve().unwrap();

    assert_eq!(game.begin_auto_solve(), Err(GameError::Reentrancy));
    assert!(game.draw().is_err());

    // Continuing the running session is fine.
    assert!(game.auto_solve().unwrap().next().is_some());
}

/// Test that a won game cannot start a session.
#[test]
fn test_no_session_on_won_game() {
    let mut game = Game::from_board(ready_board([13; 4], &[]), KlondikeConfig::default());
    assert!(game.is_won());
    assert_eq!(game.drain_events(), vec![GameEvent::GameWon]);
    assert!(matches!(
        game.begin_auto_solve(),
        Err(GameError::IllegalMove { .. })
    ));
}

/// Test the paced driver against the game's configured delay.
#[test]
fn test_driver_uses_game_delay() {
    let config = KlondikeConfig::default()
        .with_auto_trigger(false)
        .with_auto_solve_delay(Duration::ZERO);
    let mut game = Game::from_board(scattered(), config);

    let mut driver = AutoSolveDriver::for_game(&game);
    let mut landed = Vec::new();
    let moves = driver.run(&mut game, |step| landed.push(step.to)).unwrap();

    assert_eq!(moves, 52);
    assert!(landed.iter().all(|p| p.is_foundation()));
    assert!(game.is_won());

    let mut counting = AutoSolveDriver::with_pacer(CountingPacer::default(), Duration::from_millis(5));
    let mut fresh = Game::from_board(scattered(), KlondikeConfig::default().with_auto_trigger(false));
    counting.run(&mut fresh, |_| {}).unwrap();
    assert_eq!(counting.pacer().pauses, 52);
}

/// Test that the game emits `GameWon` exactly once.
#[test]
fn test_game_won_once() {
    let mut game = Game::from_board(scattered(), KlondikeConfig::default().with_auto_trigger(false));
    game.auto_solve().unwrap().for_each(drop);
    assert!(game.auto_solve().is_err());

    let wins = game
        .drain_events()
        .iter()
        .filter(|e| **e == GameEvent::GameWon)
        .count();
    assert_eq!(wins, 1);
}

/// Test a buried Ace under the two candidate policies.
#[test]
fn test_policies_differ_on_buried_ace() {
    let ace = CardId::new(Suit::Club, klondike_engine::Rank::ACE);
    let mut layout = Layout::default();
    // Ace at the bottom, then every other club above it in rising order.
    layout.columns[0] = CardId::all()
        .filter(|c| c.suit() == Suit::Club)
        .map(Card::face_up)
        .collect();
    for (i, suit) in [Suit::Spade, Suit::Heart, Suit::Diamond].into_iter().enumerate() {
        layout.columns[i + 1] = CardId::all()
            .filter(|c| c.suit() == suit)
            .rev()
            .map(Card::face_up)
            .collect();
    }
    let board = Board::from_layout(layout).unwrap();

    let top_only = plan(&board, CandidatePolicy::TopOnly);
    assert_eq!(top_only.len(), 39, "clubs stay stuck behind the King");
    assert!(top_only.iter().all(|s| s.card.suit() != Suit::Club));

    let all_resident = plan(&board, CandidatePolicy::AllResident);
    assert_eq!(all_resident.len(), 52);
    let first_club = all_resident.iter().find(|s| s.card.suit() == Suit::Club).unwrap();
    assert_eq!(first_club.card, ace);
    assert_eq!(first_club.index, 0);

    let mut game = Game::from_board(board, KlondikeConfig::default().with_auto_trigger(false));
    assert_eq!(game.auto_solve().unwrap().count(), 39);
    assert!(!game.is_won());
    assert!(!game.is_auto_solving());
    assert_eq!(next_step(game.board(), CandidatePolicy::TopOnly), None);
}

proptest! {
    /// Any ready board finishes in at most 52 steps, under either policy.
    #[test]
    fn prop_auto_solve_terminates(
        heights in prop::array::uniform4(0usize..=13),
        placement in prop::collection::vec(0usize..7, 52),
        all_resident in any::<bool>(),
    ) {
        let policy = if all_resident {
            CandidatePolicy::AllResident
        } else {
            CandidatePolicy::TopOnly
        };
        let board = ready_board(heights, &placement);
        let remaining = 52 - heights.iter().sum::<usize>();

        let config = KlondikeConfig::default()
            .with_auto_trigger(false)
            .with_candidate_policy(policy);
        let mut game = Game::from_board(board, config);

        if game.is_won() {
            prop_assert!(game.begin_auto_solve().is_err());
        } else {
            let steps = game.auto_solve().unwrap().count();
            prop_assert_eq!(steps, remaining);
            prop_assert!(steps <= 52);
            prop_assert!(game.is_won());
            for suit in Suit::ALL {
                prop_assert_eq!(game.board().foundation_len(suit), 13);
            }
            prop_assert!(game.board().verify().is_ok());
        }
    }
}
