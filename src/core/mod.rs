//! Core engine types: ids, RNG, configuration, clock and errors.
//!
//! This module has no knowledge of questions or games. Everything above it
//! configures behaviour through `GameConfig` rather than constants.

pub mod ids;
pub mod rng;
pub mod config;
pub mod clock;
pub mod error;

pub use ids::{GameId, QuestionId, UserId};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, HelpConfig};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{GameError, Result};
