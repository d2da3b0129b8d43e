//! Building new games from a question bank.
//!
//! The factory walks the ladder level by level, asks the bank for that
//! level's pool and lets a `QuestionSelector` pick one question. Selection
//! is a strategy so hosts (and tests) can replace uniform random draws.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::game::Game;
use super::game_question::GameQuestion;
use crate::core::{GameConfig, GameError, GameId, GameRng, Result, UserId};
use crate::questions::{Question, QuestionBank};

/// Picks one question out of a level's pool.
pub trait QuestionSelector {
    /// Choose a question from `pool`, or `None` if the pool is empty.
    fn select(&mut self, level: u32, pool: &[Arc<Question>], rng: &mut GameRng) -> Option<Arc<Question>>;
}

/// Uniform random choice over the pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformSelector;

impl QuestionSelector for UniformSelector {
    fn select(&mut self, _level: u32, pool: &[Arc<Question>], rng: &mut GameRng) -> Option<Arc<Question>> {
        rng.choose(pool).cloned()
    }
}

/// Creates games for users.
///
/// ## Example
///
/// ```
/// use chrono::Utc;
/// use money_ladder::core::{GameConfig, QuestionId, UserId};
/// use money_ladder::game::{GameFactory, GameStatus};
/// use money_ladder::questions::{InMemoryQuestionBank, Question};
///
/// let config = GameConfig::new(vec![100, 200]);
/// let bank = InMemoryQuestionBank::from_questions((0..2).map(|level| {
///     Question::new(QuestionId::new(level), level, "?", "yes", ["no", "nope", "never"])
/// }))
/// .unwrap();
///
/// let mut factory = GameFactory::new(config, 42).unwrap();
/// let game = factory.create(UserId::new(1), &bank, Utc::now()).unwrap();
///
/// assert_eq!(game.status(), GameStatus::InProgress);
/// assert_eq!(game.game_questions().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct GameFactory<S = UniformSelector> {
    config: Arc<GameConfig>,
    rng: GameRng,
    selector: S,
    next_id: GameId,
}

impl GameFactory<UniformSelector> {
    /// Create a factory drawing questions uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfig` if the configuration is unusable.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_selector(config, seed, UniformSelector)
    }
}

impl<S: QuestionSelector> GameFactory<S> {
    /// Create a factory with a custom selection strategy.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfig` if the configuration is unusable.
    pub fn with_selector(config: GameConfig, seed: u64, selector: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            rng: GameRng::new(seed),
            selector,
            next_id: GameId::new(1),
        })
    }

    /// Start id allocation at `id` (e.g. after restoring persisted games).
    #[must_use]
    pub fn starting_at(mut self, id: GameId) -> Self {
        self.next_id = id;
        self
    }

    /// Make sure ids allocated from now on are greater than `id`.
    pub fn skip_past(&mut self, id: GameId) {
        if id >= self.next_id {
            self.next_id = id.next();
        }
    }

    /// The configuration every created game shares.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Id the next created game will get.
    #[must_use]
    pub fn next_id(&self) -> GameId {
        self.next_id
    }

    /// Build a new game for `user`.
    ///
    /// Draws one question per level, letters each one with a fresh random
    /// permutation and gives the game its own forked RNG. The bank is only
    /// read.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InsufficientQuestions` naming the first level
    /// whose pool is empty, or `GameError::InvalidQuestion` if the bank
    /// hands out a malformed question. No id is consumed in either case.
    pub fn create<B: QuestionBank + ?Sized>(
        &mut self,
        user: UserId,
        bank: &B,
        now: DateTime<Utc>,
    ) -> Result<Game> {
        let ladder_len = self.config.ladder_len() as u32;
        let mut game_questions = Vec::with_capacity(ladder_len as usize);

        for level in 0..ladder_len {
            let pool = bank.questions_at_level(level);
            let Some(question) = self.selector.select(level, &pool, &mut self.rng) else {
                warn!(%user, level, "cannot create game, level has no questions");
                return Err(GameError::InsufficientQuestions { level });
            };
            game_questions.push(GameQuestion::new(question, &mut self.rng)?);
        }

        let id = self.next_id;
        let game = Game::new(
            id,
            user,
            game_questions,
            Arc::clone(&self.config),
            self.rng.fork(),
            now,
        )?;
        self.next_id = id.next();

        info!(game = %id, %user, levels = ladder_len, "game created");
        Ok(game)
    }
}
