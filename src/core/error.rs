//! Engine error type.

use thiserror::Error;

use super::ids::{GameId, QuestionId};
use crate::game::HelpKind;

/// Result alias used across the engine.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors raised by engine operations.
///
/// Every failing operation leaves the game exactly as it was. Answering
/// never fails: a rejected answer is reported as `false`, and a timeout is
/// a normal transition.
#[derive(Debug, Error)]
pub enum GameError {
    /// The bank has no question for one of the ladder levels.
    #[error("no questions available for level {level}")]
    InsufficientQuestions { level: u32 },

    /// A state-changing operation was attempted on a finished game.
    #[error("game is already finished")]
    GameFinished,

    /// The help has already been used in this game.
    #[error("help {0} has already been used")]
    HelpAlreadyUsed(HelpKind),

    /// Money can only be taken after clearing at least one level.
    #[error("no level cleared yet, nothing to take")]
    NothingToTake,

    /// Not one of the presentation letters a-d.
    #[error("invalid answer letter: {0:?}")]
    InvalidLetter(String),

    /// Not one of the help kind names.
    #[error("unknown help kind: {0:?}")]
    UnknownHelpKind(String),

    /// Answer slots do not form a permutation of the four options.
    #[error("answer key map must be a permutation of the four answer slots")]
    InvalidAnswerKeyMap,

    /// Configuration error
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A question with this id is already in the bank.
    #[error("{0} is already in the bank")]
    DuplicateQuestion(QuestionId),

    #[error("invalid question: {0}")]
    InvalidQuestion(String),

    /// No game with this id.
    #[error("{0} not found")]
    GameNotFound(GameId),

    /// The game exists but belongs to another user.
    #[error("{0} belongs to another user")]
    NotOwner(GameId),

    /// The user must finish their current game before starting another.
    #[error("{0} is still in progress")]
    GameInProgress(GameId),

    /// A decoded game record violates the ladder invariants.
    #[error("corrupt game record: {0}")]
    CorruptRecord(String),

    /// Binary codec failure while encoding or decoding a game record.
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),
}

impl GameError {
    /// Whether the error reports an operation that the game state does not
    /// allow (caller logic error rather than a data problem).
    #[must_use]
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            GameError::GameFinished | GameError::HelpAlreadyUsed(_) | GameError::NothingToTake
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_grouping() {
        assert!(GameError::GameFinished.is_invalid_state());
        assert!(GameError::NothingToTake.is_invalid_state());
        assert!(GameError::HelpAlreadyUsed(HelpKind::FriendCall).is_invalid_state());

        assert!(!GameError::InsufficientQuestions { level: 3 }.is_invalid_state());
        assert!(!GameError::GameNotFound(GameId::new(1)).is_invalid_state());
    }

    #[test]
    fn test_messages() {
        let err = GameError::InsufficientQuestions { level: 7 };
        assert_eq!(err.to_string(), "no questions available for level 7");

        let err = GameError::HelpAlreadyUsed(HelpKind::FiftyFifty);
        assert_eq!(err.to_string(), "help fifty_fifty has already been used");

        let err = GameError::NotOwner(GameId::new(4));
        assert_eq!(err.to_string(), "Game(4) belongs to another user");
    }
}
