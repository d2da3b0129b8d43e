//! One rung of a game's ladder: a question, its lettering and the helps
//! used on it.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::help::{HelpEngine, HelpHash, HelpKind, HelpPayload};
use super::letter::{AnswerKeyMap, Letter};
use crate::core::{GameError, GameRng, Result};
use crate::questions::Question;

/// A question as it appears in one particular game.
///
/// The lettering is fixed at construction. `correct_answer_key` is derived
/// from it on every call, so it cannot drift from what was shown.
///
/// Every constructor, deserialization included, validates the question, so
/// exactly one letter always maps to the correct slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameQuestionRecord")]
pub struct GameQuestion {
    question: Arc<Question>,
    answer_key_map: AnswerKeyMap,
    help_hash: HelpHash,
}

/// Unchecked wire form of `GameQuestion`.
#[derive(Deserialize)]
struct GameQuestionRecord {
    question: Arc<Question>,
    answer_key_map: AnswerKeyMap,
    help_hash: HelpHash,
}

impl TryFrom<GameQuestionRecord> for GameQuestion {
    type Error = GameError;

    fn try_from(record: GameQuestionRecord) -> Result<Self> {
        record.question.validate()?;
        Ok(Self {
            question: record.question,
            answer_key_map: record.answer_key_map,
            help_hash: record.help_hash,
        })
    }
}

impl GameQuestion {
    /// Wrap a question with a random lettering.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidQuestion` if the question is malformed.
    pub fn new(question: Arc<Question>, rng: &mut GameRng) -> Result<Self> {
        question.validate()?;
        Self::with_key_map(question, AnswerKeyMap::shuffled(rng))
    }

    /// Wrap a question with an explicit lettering.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidQuestion` if the question is malformed.
    pub fn with_key_map(question: Arc<Question>, answer_key_map: AnswerKeyMap) -> Result<Self> {
        GameQuestionRecord {
            question,
            answer_key_map,
            help_hash: HelpHash::new(),
        }
        .try_into()
    }

    /// The underlying question.
    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    /// Question prompt.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.question.text
    }

    /// Question level.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.question.level
    }

    /// Letter → slot permutation.
    #[must_use]
    pub fn answer_key_map(&self) -> &AnswerKeyMap {
        &self.answer_key_map
    }

    /// Helps used on this question.
    #[must_use]
    pub fn help_hash(&self) -> &HelpHash {
        &self.help_hash
    }

    /// Letter the correct answer is shown under.
    #[must_use]
    pub fn correct_answer_key(&self) -> Letter {
        self.answer_key_map
            .letter_for_slot(self.question.correct_slot)
            .expect("question validated on construction")
    }

    /// Whether `letter` is the correct answer.
    #[must_use]
    pub fn answer_correct(&self, letter: Letter) -> bool {
        self.answer_key_map.slot_for(letter) == self.question.correct_slot
    }

    /// Answer text shown under `letter`.
    #[must_use]
    pub fn answer_text(&self, letter: Letter) -> &str {
        &self.question.answers[self.answer_key_map.slot_for(letter) as usize]
    }

    /// Letter → answer text for all four letters.
    #[must_use]
    pub fn variants(&self) -> BTreeMap<Letter, &str> {
        Letter::ALL
            .into_iter()
            .map(|letter| (letter, self.answer_text(letter)))
            .collect()
    }

    /// Generate and store a help payload.
    ///
    /// # Errors
    ///
    /// Returns `GameError::HelpAlreadyUsed` if this question already holds a
    /// payload of that kind. Nothing is generated in that case, so the RNG
    /// does not advance.
    pub fn add_help(
        &mut self,
        kind: HelpKind,
        engine: &HelpEngine<'_>,
        rng: &mut GameRng,
    ) -> Result<&HelpPayload> {
        if self.help_hash.contains(kind) {
            return Err(GameError::HelpAlreadyUsed(kind));
        }
        let payload = engine.generate(kind, self.correct_answer_key(), rng);
        self.help_hash.insert(payload)
    }

    /// Strike two wrong answers, keeping the correct letter and one decoy.
    pub fn add_fifty_fifty(&mut self, engine: &HelpEngine<'_>, rng: &mut GameRng) -> Result<&HelpPayload> {
        self.add_help(HelpKind::FiftyFifty, engine, rng)
    }

    /// Ask the audience.
    pub fn add_audience_help(&mut self, engine: &HelpEngine<'_>, rng: &mut GameRng) -> Result<&HelpPayload> {
        self.add_help(HelpKind::AudienceHelp, engine, rng)
    }

    /// Call a friend.
    pub fn add_friend_call(&mut self, engine: &HelpEngine<'_>, rng: &mut GameRng) -> Result<&HelpPayload> {
        self.add_help(HelpKind::FriendCall, engine, rng)
    }
}
