//! Hosting facade over the engine.
//!
//! `GameService` is what a web controller or CLI talks to. It owns the
//! games, reads time from a `Clock`, checks that the caller owns the game
//! they act on, allows one unfinished game per user, and credits prizes
//! when a game ends.
//!
//! All state-changing calls take `&mut self`; hosts sharing a service
//! between threads put it behind their own lock, which serializes
//! operations on every game.

use rustc_hash::FxHashMap;
use tracing::{info, warn};

use super::accounts::Accounts;
use crate::core::{Clock, GameError, GameId, Result, SystemClock, UserId};
use crate::game::{
    AnswerOutcome, Game, GameFactory, GameSnapshot, HelpKind, HelpOutcome, Letter, MoneyOutcome,
    QuestionSelector, UniformSelector,
};
use crate::questions::QuestionBank;

/// Owns games and wires them to a bank, accounts and a clock.
pub struct GameService<B, A, C = SystemClock, S = UniformSelector> {
    factory: GameFactory<S>,
    bank: B,
    accounts: A,
    clock: C,
    games: FxHashMap<GameId, Game>,
}

impl<B, A, C, S> GameService<B, A, C, S>
where
    B: QuestionBank,
    A: Accounts,
    C: Clock,
    S: QuestionSelector,
{
    /// Create a service with no games.
    pub fn new(factory: GameFactory<S>, bank: B, accounts: A, clock: C) -> Self {
        Self {
            factory,
            bank,
            accounts,
            clock,
            games: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn accounts(&self) -> &A {
        &self.accounts
    }

    #[must_use]
    pub fn bank(&self) -> &B {
        &self.bank
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Start a new game for `user`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::GameInProgress` if the user has an unfinished
    /// game, or `GameError::InsufficientQuestions` from the factory.
    pub fn create_game(&mut self, user: UserId) -> Result<&Game> {
        if let Some(existing) = self.current_game(user) {
            let id = existing.id();
            warn!(%user, game = %id, "new game refused, one is in progress");
            return Err(GameError::GameInProgress(id));
        }

        let game = self.factory.create(user, &self.bank, self.clock.now())?;
        let id = game.id();
        Ok(&*self.games.entry(id).or_insert(game))
    }

    /// Put a previously persisted game back under management.
    ///
    /// Ids allocated afterwards skip past it.
    pub fn restore_game(&mut self, game: Game) {
        self.factory.skip_past(game.id());
        self.games.insert(game.id(), game);
    }

    /// The user's unfinished game, if any.
    #[must_use]
    pub fn current_game(&self, user: UserId) -> Option<&Game> {
        self.games
            .values()
            .find(|game| game.user() == user && !game.is_finished())
    }

    /// All of the user's games, newest first.
    #[must_use]
    pub fn games_for(&self, user: UserId) -> Vec<&Game> {
        let mut games: Vec<_> = self.games.values().filter(|g| g.user() == user).collect();
        games.sort_by(|a, b| b.id().cmp(&a.id()));
        games
    }

    /// Look a game up on behalf of `user`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::GameNotFound` for an unknown id and
    /// `GameError::NotOwner` if the game belongs to someone else.
    pub fn game(&self, user: UserId, id: GameId) -> Result<&Game> {
        let game = self.games.get(&id).ok_or(GameError::GameNotFound(id))?;
        if game.user() != user {
            warn!(%user, game = %id, "access to another user's game refused");
            return Err(GameError::NotOwner(id));
        }
        Ok(game)
    }

    /// Read-only view of a game.
    pub fn snapshot(&self, user: UserId, id: GameId) -> Result<GameSnapshot> {
        Ok(self.game(user, id)?.snapshot())
    }

    /// Answer the current question.
    pub fn answer(&mut self, user: UserId, id: GameId, letter: Letter) -> Result<AnswerOutcome> {
        let now = self.clock.now();
        let game = owned_game_mut(&mut self.games, user, id)?;
        let was_finished = game.is_finished();
        let outcome = game.answer(letter, now);
        self.settle(id, was_finished)?;
        Ok(outcome)
    }

    /// Spend a help on the current question. Helps never end a game, so
    /// nothing is credited here.
    pub fn use_help(&mut self, user: UserId, id: GameId, kind: HelpKind) -> Result<HelpOutcome> {
        let game = owned_game_mut(&mut self.games, user, id)?;
        game.use_help(kind).map_err(|err| {
            warn!(%user, game = %id, help = %kind, %err, "help refused");
            err
        })
    }

    /// Stop and bank the prize; the prize is credited to the user.
    pub fn take_money(&mut self, user: UserId, id: GameId) -> Result<MoneyOutcome> {
        let now = self.clock.now();
        let game = owned_game_mut(&mut self.games, user, id)?;
        let was_finished = game.is_finished();
        let outcome = game.take_money(now).map_err(|err| {
            warn!(%user, game = %id, %err, "take money refused");
            err
        })?;
        self.settle(id, was_finished)?;
        Ok(outcome)
    }

    /// Credit the prize if the game just ended.
    fn settle(&mut self, id: GameId, was_finished: bool) -> Result<()> {
        let Some(game) = self.games.get(&id) else {
            return Ok(());
        };
        if was_finished || !game.is_finished() {
            return Ok(());
        }

        let (user, prize) = (game.user(), game.prize());
        if prize > 0 {
            self.accounts.credit_balance(user, prize)?;
            info!(%user, game = %id, prize, "prize credited");
        }
        Ok(())
    }
}

fn owned_game_mut(
    games: &mut FxHashMap<GameId, Game>,
    user: UserId,
    id: GameId,
) -> Result<&mut Game> {
    let game = games.get_mut(&id).ok_or(GameError::GameNotFound(id))?;
    if game.user() != user {
        warn!(%user, game = %id, "access to another user's game refused");
        return Err(GameError::NotOwner(id));
    }
    Ok(game)
}
