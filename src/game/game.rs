//! The game state machine.
//!
//! ## Lifecycle
//!
//! A game starts at level 0 with every help available. Each correct answer
//! climbs one level. The game ends when:
//! - the last level is cleared (`Won`)
//! - an answer is wrong (`Fail`)
//! - the time limit has passed when the player acts (`Timeout`)
//! - the player takes the money (`Money`)
//!
//! Only `answer_current_question`, `take_money` and `use_help` mutate a
//! game, and all of them refuse to touch a finished one. Status and prize
//! are derived from the fields on every call.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::game_question::GameQuestion;
use super::help::{HelpEngine, HelpKind};
use super::letter::Letter;
use super::snapshot::{AnswerOutcome, GameSnapshot, HelpFlags, HelpOutcome, MoneyOutcome, QuestionView};
use super::status::GameStatus;
use crate::core::{GameConfig, GameError, GameId, GameRng, Result, UserId};

/// One player's run up the ladder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    id: GameId,
    user: UserId,
    game_questions: Vec<GameQuestion>,
    current_level: u32,
    is_failed: bool,
    created_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    fifty_fifty_used: bool,
    audience_help_used: bool,
    friend_call_used: bool,
    config: Arc<GameConfig>,
    rng: GameRng,
}

impl Game {
    /// Assemble a fresh game from already drawn questions.
    ///
    /// Usually called through `GameFactory`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfig` for an unusable configuration and
    /// `GameError::CorruptRecord` if the questions do not form the ladder
    /// `0..L` in order.
    pub fn new(
        id: GameId,
        user: UserId,
        game_questions: Vec<GameQuestion>,
        config: Arc<GameConfig>,
        rng: GameRng,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let game = Self {
            id,
            user,
            game_questions,
            current_level: 0,
            is_failed: false,
            created_at,
            finished_at: None,
            fifty_fifty_used: false,
            audience_help_used: false,
            friend_call_used: false,
            config,
            rng,
        };
        game.validate()?;
        Ok(game)
    }

    // === Fields ===

    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Owner of the game.
    #[must_use]
    pub fn user(&self) -> UserId {
        self.user
    }

    /// Questions in ladder order.
    #[must_use]
    pub fn game_questions(&self) -> &[GameQuestion] {
        &self.game_questions
    }

    /// Number of levels cleared so far.
    #[must_use]
    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.is_failed
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn fifty_fifty_used(&self) -> bool {
        self.fifty_fifty_used
    }

    #[must_use]
    pub fn audience_help_used(&self) -> bool {
        self.audience_help_used
    }

    #[must_use]
    pub fn friend_call_used(&self) -> bool {
        self.friend_call_used
    }

    /// All help flags at once.
    #[must_use]
    pub fn help_flags(&self) -> HelpFlags {
        HelpFlags {
            fifty_fifty: self.fifty_fifty_used,
            audience_help: self.audience_help_used,
            friend_call: self.friend_call_used,
        }
    }

    /// Whether `kind` has been spent in this game.
    #[must_use]
    pub fn help_used(&self, kind: HelpKind) -> bool {
        self.help_flags().used(kind)
    }

    // === Ladder ===

    /// Number of levels.
    #[must_use]
    pub fn ladder_len(&self) -> usize {
        self.game_questions.len()
    }

    /// Highest level index.
    #[must_use]
    pub fn max_level(&self) -> u32 {
        self.ladder_len().saturating_sub(1) as u32
    }

    /// The question waiting for an answer, `None` once every level is
    /// cleared.
    #[must_use]
    pub fn current_game_question(&self) -> Option<&GameQuestion> {
        self.game_questions.get(self.current_level as usize)
    }

    /// The last question answered correctly, `None` at level 0.
    #[must_use]
    pub fn previous_game_question(&self) -> Option<&GameQuestion> {
        let previous = self.current_level.checked_sub(1)?;
        self.game_questions.get(previous as usize)
    }

    /// `current_level - 1`; -1 at level 0.
    #[must_use]
    pub fn previous_level(&self) -> i64 {
        i64::from(self.current_level) - 1
    }

    // === Status and prize ===

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Derive the status from the game's fields.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        let Some(finished_at) = self.finished_at else {
            return GameStatus::InProgress;
        };

        if self.is_failed {
            if finished_at - self.created_at >= self.config.time_limit() {
                GameStatus::Timeout
            } else {
                GameStatus::Fail
            }
        } else if self.current_level > self.max_level() {
            GameStatus::Won
        } else {
            GameStatus::Money
        }
    }

    /// Prize the game is worth in its current status. 0 while in progress.
    #[must_use]
    pub fn prize(&self) -> u64 {
        match self.status() {
            GameStatus::InProgress => 0,
            GameStatus::Won => self.config.max_prize(),
            GameStatus::Fail | GameStatus::Timeout => match self.current_level.checked_sub(1) {
                Some(cleared) => self.config.fireproof_prize(cleared),
                None => 0,
            },
            GameStatus::Money => match self.current_level.checked_sub(1) {
                Some(cleared) => self.config.level_prize(cleared),
                None => 0,
            },
        }
    }

    /// Whether the time limit has passed at `now`.
    #[must_use]
    pub fn is_time_out(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= self.config.time_limit()
    }

    // === Operations ===

    /// Grade `letter` against the current question.
    ///
    /// Returns `true` only for a correct, in-time answer. A finished game
    /// ignores the call. An answer after the time limit ends the game as a
    /// timeout whatever the letter.
    pub fn answer_current_question(&mut self, letter: Letter, now: DateTime<Utc>) -> bool {
        if self.is_finished() {
            debug!(game = %self.id, %letter, "answer ignored, game finished");
            return false;
        }
        if self.time_out(now) {
            return false;
        }

        let Some(game_question) = self.current_game_question() else {
            return false;
        };
        let correct = game_question.answer_correct(letter);
        debug!(game = %self.id, level = self.current_level, %letter, correct, "answer graded");

        if correct {
            self.current_level += 1;
            if self.current_level > self.max_level() {
                self.finish(now, false);
            }
            true
        } else {
            self.finish(now, true);
            false
        }
    }

    /// `answer_current_question` plus the resulting state.
    pub fn answer(&mut self, letter: Letter, now: DateTime<Utc>) -> AnswerOutcome {
        let correct = self.answer_current_question(letter, now);
        let status = self.status();
        AnswerOutcome {
            correct,
            continues: status == GameStatus::InProgress,
            status,
            prize: self.prize(),
            current_level: self.current_level,
        }
    }

    /// Stop and bank the prize of the last cleared level.
    ///
    /// Crediting the prize to the player is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `GameError::GameFinished` for a finished game and
    /// `GameError::NothingToTake` at level 0. If the time limit has passed
    /// the game ends as a timeout instead and that is reported as the
    /// outcome.
    pub fn take_money(&mut self, now: DateTime<Utc>) -> Result<MoneyOutcome> {
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }
        if !self.time_out(now) {
            if self.current_level == 0 {
                return Err(GameError::NothingToTake);
            }
            self.finish(now, false);
        }

        Ok(MoneyOutcome {
            status: self.status(),
            prize: self.prize(),
        })
    }

    /// Spend a help on the current question.
    ///
    /// Helps never move the game: the level, the terminal state and the
    /// clock are left alone. A game past its time limit is still in
    /// progress until an answer or `take_money` ends it, so the help is
    /// granted.
    ///
    /// # Errors
    ///
    /// Returns `GameError::GameFinished` for a finished game and
    /// `GameError::HelpAlreadyUsed` if `kind` was spent before; the game is
    /// untouched in both cases.
    pub fn use_help(&mut self, kind: HelpKind) -> Result<HelpOutcome> {
        if self.is_finished() {
            return Err(GameError::GameFinished);
        }
        if self.help_used(kind) {
            return Err(GameError::HelpAlreadyUsed(kind));
        }

        let config = Arc::clone(&self.config);
        let engine = HelpEngine::new(&config.help);
        let game_question = self
            .game_questions
            .get_mut(self.current_level as usize)
            .ok_or(GameError::GameFinished)?;
        let payload = game_question.add_help(kind, &engine, &mut self.rng)?.clone();

        match kind {
            HelpKind::FiftyFifty => self.fifty_fifty_used = true,
            HelpKind::AudienceHelp => self.audience_help_used = true,
            HelpKind::FriendCall => self.friend_call_used = true,
        }
        debug!(game = %self.id, level = self.current_level, help = %kind, "help used");

        Ok(HelpOutcome {
            kind,
            status: self.status(),
            payload,
        })
    }

    /// Read-only view for presentation.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let finished = self.is_finished();
        GameSnapshot {
            id: self.id,
            user: self.user,
            status: self.status(),
            current_level: self.current_level,
            prize: self.prize(),
            helps: self.help_flags(),
            current_question: self
                .current_game_question()
                .map(|gq| QuestionView::new(gq, finished)),
        }
    }

    // === Persistence ===

    /// Encode the game as a binary record.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Codec` if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a game record and check its invariants.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Codec` for undecodable bytes and
    /// `GameError::CorruptRecord` if the decoded game is inconsistent.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let game: Game = bincode::deserialize(bytes)?;
        game.validate()?;
        Ok(game)
    }

    /// Check the structural invariants.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfig` or `GameError::CorruptRecord`
    /// describing the first violation found.
    pub fn validate(&self) -> Result<()> {
        self.config.validate()?;

        if self.game_questions.len() != self.config.ladder_len() {
            return Err(GameError::CorruptRecord(format!(
                "{} has {} questions for a ladder of {}",
                self.id,
                self.game_questions.len(),
                self.config.ladder_len()
            )));
        }
        if let Some((i, gq)) = self
            .game_questions
            .iter()
            .enumerate()
            .find(|(i, gq)| gq.level() as usize != *i)
        {
            return Err(GameError::CorruptRecord(format!(
                "{}: question {} has level {}",
                self.id,
                i,
                gq.level()
            )));
        }
        if self.current_level as usize > self.game_questions.len() {
            return Err(GameError::CorruptRecord(format!(
                "{}: level {} is past the ladder",
                self.id, self.current_level
            )));
        }
        if self.finished_at.is_none() && self.current_level > self.max_level() {
            return Err(GameError::CorruptRecord(format!(
                "{}: cleared every level but never finished",
                self.id
            )));
        }
        if self.finished_at.is_some_and(|at| at < self.created_at) {
            return Err(GameError::CorruptRecord(format!(
                "{}: finished before it was created",
                self.id
            )));
        }
        Ok(())
    }

    // === Internals ===

    /// End the game as a timeout if the limit has passed.
    fn time_out(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_time_out(now) {
            return false;
        }
        self.finish(now, true);
        true
    }

    fn finish(&mut self, now: DateTime<Utc>, failed: bool) {
        self.finished_at = Some(now);
        self.is_failed = failed;
        info!(
            game = %self.id,
            user = %self.user,
            status = %self.status(),
            level = self.current_level,
            prize = self.prize(),
            "game finished"
        );
    }
}
