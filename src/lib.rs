//! # money-ladder
//!
//! A quiz game engine in the "climb the money ladder" format.
//!
//! A player answers a fixed ladder of multiple-choice questions of rising
//! difficulty. Three one-time helps (fifty-fifty, ask the audience, call a
//! friend) improve the odds. At any point after the first level the player
//! may stop and bank the prize of the last cleared level; a wrong answer
//! drops them to the last fireproof checkpoint.
//!
//! ## Design Principles
//!
//! 1. **Configuration Over Constants**: prize table, checkpoints, time
//!    limit and help tuning come from `GameConfig`.
//!
//! 2. **Derived State**: status and prize are computed from the game's
//!    fields on every call and never stored.
//!
//! 3. **Deterministic Randomness**: every draw goes through a seeded
//!    `GameRng`, which is persisted with the game.
//!
//! ## Modules
//!
//! - `core`: ids, RNG, configuration, clock, errors
//! - `questions`: questions and the `QuestionBank` interface
//! - `game`: helps, game questions, the `Game` state machine, `GameFactory`
//! - `service`: `GameService`, ownership checks and prize crediting

pub mod core;
pub mod questions;
pub mod game;
pub mod service;

// Re-export commonly used types
pub use crate::core::{
    Clock, GameConfig, GameError, GameId, GameRng, GameRngState, HelpConfig, ManualClock,
    QuestionId, Result, SystemClock, UserId,
};

pub use crate::questions::{InMemoryQuestionBank, Question, QuestionBank};

pub use crate::game::{
    AnswerKeyMap, AnswerOutcome, Game, GameFactory, GameQuestion, GameSnapshot, GameStatus,
    HelpEngine, HelpFlags, HelpHash, HelpKind, HelpOutcome, HelpPayload, Letter, MoneyOutcome,
    QuestionSelector, QuestionView, UniformSelector,
};

pub use crate::service::{Accounts, GameService, InMemoryAccounts};
