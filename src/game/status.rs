//! Derived game status.

use serde::{Deserialize, Serialize};

/// Where a game stands. Never stored; always derived from the game's
/// fields by `Game::status`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    /// Still accepting answers.
    InProgress,
    /// Every level cleared.
    Won,
    /// Wrong answer.
    Fail,
    /// Ran out of time.
    Timeout,
    /// Player stopped and banked the prize.
    Money,
}

impl GameStatus {
    /// Any status other than `InProgress`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Wire name of the status.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GameStatus::InProgress => "in_progress",
            GameStatus::Won => "won",
            GameStatus::Fail => "fail",
            GameStatus::Timeout => "timeout",
            GameStatus::Money => "money",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
