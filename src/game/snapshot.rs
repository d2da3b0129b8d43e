//! What game operations report back to hosts.
//!
//! These are plain data: a web layer serializes them, a CLI prints them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::game_question::GameQuestion;
use super::help::{HelpHash, HelpKind, HelpPayload};
use super::letter::Letter;
use super::status::GameStatus;
use crate::core::{GameId, UserId};

/// Result of submitting an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    /// The answer was accepted as correct.
    pub correct: bool,
    /// The game is still in progress afterwards.
    pub continues: bool,
    pub status: GameStatus,
    pub prize: u64,
    pub current_level: u32,
}

/// Result of taking the money.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyOutcome {
    pub status: GameStatus,
    pub prize: u64,
}

/// Result of using a help.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpOutcome {
    pub kind: HelpKind,
    pub status: GameStatus,
    pub payload: HelpPayload,
}

/// Which helps have been spent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpFlags {
    pub fifty_fifty: bool,
    pub audience_help: bool,
    pub friend_call: bool,
}

impl HelpFlags {
    /// Whether `kind` has been spent.
    #[must_use]
    pub fn used(&self, kind: HelpKind) -> bool {
        match kind {
            HelpKind::FiftyFifty => self.fifty_fifty,
            HelpKind::AudienceHelp => self.audience_help,
            HelpKind::FriendCall => self.friend_call,
        }
    }

    /// Kinds still available.
    pub fn available(&self) -> impl Iterator<Item = HelpKind> + '_ {
        HelpKind::ALL.into_iter().filter(move |kind| !self.used(*kind))
    }
}

/// A question as the player sees it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionView {
    pub level: u32,
    pub text: String,
    /// Answers on the board. After fifty-fifty only two letters remain.
    pub variants: BTreeMap<Letter, String>,
    pub help_hash: HelpHash,
    /// The correct letter, only once the game is over.
    pub revealed_answer: Option<Letter>,
}

impl QuestionView {
    pub(crate) fn new(game_question: &GameQuestion, finished: bool) -> Self {
        let remaining = game_question.help_hash().fifty_fifty();
        let variants = game_question
            .variants()
            .into_iter()
            .filter(|(letter, _)| remaining.map_or(true, |kept| kept.contains(letter)))
            .map(|(letter, text)| (letter, text.to_string()))
            .collect();

        Self {
            level: game_question.level(),
            text: game_question.text().to_string(),
            variants,
            help_hash: game_question.help_hash().clone(),
            revealed_answer: finished.then(|| game_question.correct_answer_key()),
        }
    }
}

/// Read-only view of a whole game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub id: GameId,
    pub user: UserId,
    pub status: GameStatus,
    pub current_level: u32,
    pub prize: u64,
    pub helps: HelpFlags,
    pub current_question: Option<QuestionView>,
}
