//! The authoritative game: board, rules enforcement, events and the
//! auto-solve session.

use log::{debug, trace, warn};
use smallvec::SmallVec;

use crate::autosolve::planner::{self, SolveStep};
use crate::cards::{deal_columns, shuffled_deck, CardId};
use crate::core::action::{Action, ActionOutcome, MoveOutcome};
use crate::core::config::KlondikeConfig;
use crate::core::error::{GameError, Result};
use crate::core::event::{EventSink, GameEvent};
use crate::core::rng::GameRng;
use crate::rules::{can_stack_on_foundation, can_stack_on_tableau, is_movable_run};
use crate::zones::{Board, Draw, PileId};

const REASON_SOLVING: &str = "auto-solve in progress";
const REASON_NO_SUCH_PILE: &str = "no such pile";
const REASON_ALREADY_THERE: &str = "card is already on that pile";
const REASON_FACE_DOWN: &str = "face-down cards cannot move";
const REASON_FROM_STOCK: &str = "cards leave the stock only by drawing";
const REASON_NOT_TOP: &str = "only the top card of this pile can move";
const REASON_ENCLOSED_FACE_DOWN: &str = "run contains a face-down card";
const REASON_ONTO_STOCK_OR_WASTE: &str = "cards cannot be placed on the stock or waste";
const REASON_FOUNDATION_SINGLE: &str = "only one card at a time can go to a foundation";
const REASON_WRONG_SUIT: &str = "foundation belongs to another suit";
const REASON_FOUNDATION_RANK: &str = "foundation needs a different rank";
const REASON_ONTO_FACE_DOWN: &str = "cannot stack on a face-down card";
const REASON_TABLEAU_STACK: &str = "card does not fit on that column";
const REASON_WRONG_SOURCE: &str = "card is not in the given pile";
const REASON_FLIP_NON_COLUMN: &str = "only tableau cards can be flipped";
const REASON_NOT_COMPLETABLE: &str = "board is not auto-completable";
const REASON_ALREADY_WON: &str = "game is already won";

/// One game of Klondike.
///
/// Every inbound operation either applies completely and queues its
/// events, or fails with a `GameError` and changes nothing.
///
/// ```
/// use klondike_engine::{Game, KlondikeConfig, PileId};
///
/// let mut game = Game::new(KlondikeConfig::default().with_seed(7));
/// assert_eq!(game.board().stock().len(), 24);
///
/// game.draw().unwrap();
/// assert_eq!(game.board().waste().len(), 1);
/// assert!(!game.drain_events().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    config: KlondikeConfig,
    seed: Option<u64>,
    events: Vec<GameEvent>,
    auto_solving: bool,
    won_announced: bool,
}

/// Iterator over a running auto-solve session, one move per item.
pub struct AutoSolve<'a> {
    game: &'a mut Game,
}

impl Iterator for AutoSolve<'_> {
    type Item = SolveStep;

    fn next(&mut self) -> Option<SolveStep> {
        self.game.auto_solve_step()
    }
}

impl Game {
    /// Deal a new game. Uses `config.seed` when set, entropy otherwise.
    #[must_use]
    pub fn new(config: KlondikeConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let seed = rng.seed();
        debug!("dealing new game with seed {}", seed);

        let board = Board::from_deal(deal_columns(shuffled_deck(&mut rng)));
        Self {
            seed: Some(seed),
            ..Self::from_board(board, config)
        }
    }

    /// Deal a new game with default settings and an optional seed.
    #[must_use]
    pub fn new_game(seed: Option<u64>) -> Self {
        let config = KlondikeConfig {
            seed,
            ..KlondikeConfig::default()
        };
        Self::new(config)
    }

    /// Play from an existing board.
    ///
    /// A board that is already won queues `GameWon`; one that is already
    /// auto-completable opens a session when `auto_trigger` is set.
    #[must_use]
    pub fn from_board(board: Board, config: KlondikeConfig) -> Self {
        let mut game = Self {
            board,
            config,
            seed: None,
            events: Vec::new(),
            auto_solving: false,
            won_announced: false,
        };
        game.after_mutation();
        game
    }

    // === Accessors ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &KlondikeConfig {
        &self.config
    }

    /// Shuffle seed of a dealt game; `None` for games built from a board.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.board.is_won()
    }

    #[must_use]
    pub fn is_auto_completable(&self) -> bool {
        self.board.is_auto_completable()
    }

    #[must_use]
    pub fn is_auto_solving(&self) -> bool {
        self.auto_solving
    }

    // === Events ===

    /// Events queued since the last drain.
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all queued events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand all queued events to `sink`, in order.
    pub fn dispatch_events<S: EventSink + ?Sized>(&mut self, sink: &mut S) {
        for event in self.events.drain(..) {
            sink.on_event(&event);
        }
    }

    fn emit(&mut self, event: GameEvent) {
        trace!("event {:?}", event);
        self.events.push(event);
    }

    // === Inbound operations ===

    /// Apply any inbound command.
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome> {
        match action {
            Action::Draw => self.draw().map(ActionOutcome::Drew),
            Action::Flip { card } => self.flip(card).map(|()| ActionOutcome::Flipped(card)),
            Action::Move { card, to } => self.attempt_move(card, to).map(ActionOutcome::Moved),
            Action::AutoFoundation { card } => self
                .attempt_auto_move_to_foundation(card)
                .map(ActionOutcome::Moved),
        }
    }

    /// Draw from the stock, or recycle the waste when the stock is empty.
    pub fn draw(&mut self) -> Result<Draw> {
        self.ensure_idle()?;
        let drawn = self.board.draw().map_err(rejected)?;
        match drawn {
            Draw::Drew(card) => self.emit(GameEvent::CardMoved {
                card,
                from: PileId::Stock,
                to: PileId::Waste,
            }),
            Draw::Recycled => self.emit(GameEvent::StockRecycled),
        }
        self.after_mutation();
        Ok(drawn)
    }

    /// Turn a face-down tableau card face-up. It must be its column's top.
    pub fn flip(&mut self, card: CardId) -> Result<()> {
        self.ensure_idle()?;
        let (pile, index) = self.locate(card)?;
        if !pile.is_column() {
            return Err(rejected(GameError::illegal(REASON_FLIP_NON_COLUMN)));
        }
        if index + 1 != self.pile_len(pile) {
            return Err(rejected(GameError::NotLastCard(card)));
        }

        self.board.flip_top(pile).map_err(rejected)?;
        self.emit(GameEvent::CardFlipped { card });
        self.after_mutation();
        Ok(())
    }

    /// Flip the top card of a tableau column.
    pub fn flip_top(&mut self, column: PileId) -> Result<CardId> {
        if !column.is_column() {
            return Err(rejected(GameError::illegal(REASON_FLIP_NON_COLUMN)));
        }
        let pile = self
            .board
            .pile(column)
            .ok_or(GameError::illegal(REASON_NO_SUCH_PILE))?;
        let card = pile
            .peek_top()
            .map(|c| c.id())
            .ok_or(GameError::EmptyPile(column))?;
        self.flip(card)?;
        Ok(card)
    }

    /// Move `card` and everything above it onto `to`.
    pub fn attempt_move(&mut self, card: CardId, to: PileId) -> Result<MoveOutcome> {
        self.ensure_idle()?;
        let (from, index) = self.check_move(card, to).map_err(rejected)?;

        let run = self.board.transfer(from, index, to).map_err(rejected)?;
        let cards: SmallVec<[CardId; 13]> = run.iter().map(|c| c.id()).collect();
        for &moved in &cards {
            self.emit(GameEvent::CardMoved {
                card: moved,
                from,
                to,
            });
        }
        trace!("moved {} card(s) from {} to {}", cards.len(), from, to);

        self.after_mutation();
        Ok(MoveOutcome { cards, from, to })
    }

    /// Like `attempt_move`, but fails unless `card` is currently in `source`.
    pub fn move_run(&mut self, source: PileId, card: CardId, to: PileId) -> Result<MoveOutcome> {
        if self.board.location(card) != Some(source) {
            return Err(rejected(GameError::illegal(REASON_WRONG_SOURCE)));
        }
        self.attempt_move(card, to)
    }

    /// Send a top card to its suit's foundation.
    pub fn attempt_auto_move_to_foundation(&mut self, card: CardId) -> Result<MoveOutcome> {
        self.attempt_move(card, PileId::Foundation(card.suit()))
    }

    // === Legality queries ===

    /// Would moving `card` onto `to` be accepted?
    #[must_use]
    pub fn can_move(&self, card: CardId, to: PileId) -> bool {
        !self.auto_solving && !self.board.is_won() && self.check_move(card, to).is_ok()
    }

    /// Every pile `card` could legally move to right now.
    #[must_use]
    pub fn legal_destinations(&self, card: CardId) -> Vec<PileId> {
        PileId::ALL
            .into_iter()
            .filter(|&to| self.can_move(card, to))
            .collect()
    }

    /// Every command that would currently be accepted.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.auto_solving || self.board.is_won() {
            return Vec::new();
        }

        let mut actions = Vec::new();
        if !self.board.stock().is_empty() || !self.board.waste().is_empty() {
            actions.push(Action::Draw);
        }

        for column in self.board.columns() {
            if let Some(top) = column.peek_top() {
                if !top.is_face_up() {
                    actions.push(Action::Flip { card: top.id() });
                }
            }
        }

        for card in self.board.cards().filter(|c| c.is_face_up()) {
            for to in self.legal_destinations(card.id()) {
                actions.push(Action::Move { card: card.id(), to });
            }
        }

        actions
    }

    /// Validate a move without applying it. Returns the source pile and
    /// the index of `card` in it.
    fn check_move(&self, card: CardId, to: PileId) -> Result<(PileId, usize)> {
        if !to.is_valid() {
            return Err(GameError::illegal(REASON_NO_SUCH_PILE));
        }
        let (from, index) = self.locate(card)?;
        if from == to {
            return Err(GameError::illegal(REASON_ALREADY_THERE));
        }

        let source = self
            .board
            .pile(from)
            .ok_or(GameError::illegal(REASON_NO_SUCH_PILE))?;
        let moving = *source
            .get(index)
            .ok_or(GameError::illegal(REASON_NO_SUCH_PILE))?;
        if !moving.is_face_up() {
            return Err(GameError::illegal(REASON_FACE_DOWN));
        }

        let run_len = source.len() - index;
        match from {
            PileId::Stock => return Err(GameError::illegal(REASON_FROM_STOCK)),
            PileId::Waste | PileId::Foundation(_) if run_len != 1 => {
                return Err(GameError::illegal(REASON_NOT_TOP));
            }
            PileId::Column(_) if !is_movable_run(source, index) => {
                return Err(GameError::illegal(REASON_ENCLOSED_FACE_DOWN));
            }
            _ => {}
        }

        match to {
            PileId::Stock | PileId::Waste => Err(GameError::illegal(REASON_ONTO_STOCK_OR_WASTE)),
            PileId::Foundation(suit) => {
                if run_len != 1 {
                    Err(GameError::illegal(REASON_FOUNDATION_SINGLE))
                } else if moving.suit() != suit {
                    Err(GameError::illegal(REASON_WRONG_SUIT))
                } else if !can_stack_on_foundation(&moving, self.board.foundation_len(suit)) {
                    Err(GameError::illegal(REASON_FOUNDATION_RANK))
                } else {
                    Ok((from, index))
                }
            }
            PileId::Column(_) => {
                let target = self.board.pile(to).and_then(|p| p.peek_top());
                if target.is_some_and(|t| !t.is_face_up()) {
                    Err(GameError::illegal(REASON_ONTO_FACE_DOWN))
                } else if !can_stack_on_tableau(&moving, target) {
                    Err(GameError::illegal(REASON_TABLEAU_STACK))
                } else {
                    Ok((from, index))
                }
            }
        }
    }

    // === Auto-solve session ===

    /// Open an auto-solve session.
    ///
    /// Fails with `Reentrancy` if one is already running, and with
    /// `IllegalMove` unless the board is auto-completable and not yet won.
    pub fn begin_auto_solve(&mut self) -> Result<()> {
        if self.auto_solving {
            return Err(rejected(GameError::Reentrancy));
        }
        if self.board.is_won() {
            return Err(rejected(GameError::illegal(REASON_ALREADY_WON)));
        }
        if !self.board.is_auto_completable() {
            return Err(rejected(GameError::illegal(REASON_NOT_COMPLETABLE)));
        }
        self.open_session();
        Ok(())
    }

    fn open_session(&mut self) {
        debug!("auto-solve session opened");
        self.auto_solving = true;
        self.emit(GameEvent::AutoSolveReady);
    }

    /// Apply the next auto-solve move.
    ///
    /// Returns `None` when no session is running or the session just
    /// ended; the session closes itself once nothing more applies.
    pub fn auto_solve_step(&mut self) -> Option<SolveStep> {
        if !self.auto_solving {
            return None;
        }

        let Some(step) = planner::next_step(&self.board, self.config.candidate_policy) else {
            self.close_session();
            return None;
        };
        if let Err(err) = self.board.transfer_single(step.from, step.index, step.to) {
            warn!("auto-solve step {:?} could not be applied: {}", step, err);
            self.close_session();
            return None;
        }

        self.emit(GameEvent::CardMoved {
            card: step.card,
            from: step.from,
            to: step.to,
        });
        self.emit(GameEvent::AutoSolveStep {
            card: step.card,
            to: step.to,
        });
        if self.board.is_won() {
            self.close_session();
            self.after_mutation();
        }
        Some(step)
    }

    fn close_session(&mut self) {
        if !self.board.is_won() {
            warn!("auto-solve stopped before the game was won");
        }
        debug!("auto-solve session closed");
        self.auto_solving = false;
    }

    /// Open a session if needed and iterate its moves lazily.
    pub fn auto_solve(&mut self) -> Result<AutoSolve<'_>> {
        if !self.auto_solving {
            self.begin_auto_solve()?;
        }
        Ok(AutoSolve { game: self })
    }

    // === Internals ===

    fn ensure_idle(&self) -> Result<()> {
        if self.auto_solving {
            return Err(rejected(GameError::illegal(REASON_SOLVING)));
        }
        if self.board.is_won() {
            return Err(rejected(GameError::illegal(REASON_ALREADY_WON)));
        }
        Ok(())
    }

    fn locate(&self, card: CardId) -> Result<(PileId, usize)> {
        self.board
            .find(card)
            .ok_or(GameError::illegal(REASON_WRONG_SOURCE))
    }

    fn pile_len(&self, pile: PileId) -> usize {
        self.board.pile(pile).map_or(0, |p| p.len())
    }

    /// Announce a win once; open a session when the board became
    /// auto-completable.
    fn after_mutation(&mut self) {
        if self.board.is_won() {
            if !self.won_announced {
                debug!("game won");
                self.won_announced = true;
                self.emit(GameEvent::GameWon);
            }
            return;
        }

        if self.config.auto_trigger && !self.auto_solving && self.board.is_auto_completable() {
            self.open_session();
        }
    }
}

fn rejected(err: GameError) -> GameError {
    debug!("rejected: {}", err);
    err
}
