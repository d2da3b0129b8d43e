//! The quiz game: questions as played, helps, the state machine and the
//! factory that builds games.
//!
//! - `letter`: presentation letters and the letter → slot permutation
//! - `help`: help kinds, payloads and their generators
//! - `game_question`: one ladder rung of one game
//! - `game`: the state machine
//! - `factory`: builds games from a `QuestionBank`
//! - `snapshot`: outcomes and read-only views handed to hosts

pub mod letter;
pub mod help;
pub mod game_question;
pub mod status;
pub mod snapshot;
pub mod game;
pub mod factory;

pub use letter::{AnswerKeyMap, Letter};
pub use help::{HelpEngine, HelpHash, HelpKind, HelpPayload};
pub use game_question::GameQuestion;
pub use status::GameStatus;
pub use snapshot::{AnswerOutcome, GameSnapshot, HelpFlags, HelpOutcome, MoneyOutcome, QuestionView};
pub use game::Game;
pub use factory::{GameFactory, QuestionSelector, UniformSelector};
