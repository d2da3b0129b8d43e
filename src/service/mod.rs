//! Hosting layer: owning games, ownership checks and prize crediting.

pub mod accounts;
pub mod service;

pub use accounts::{Accounts, InMemoryAccounts};
pub use service::GameService;
