//! Account balance hook.
//!
//! The engine never stores money. When a game ends with a prize the
//! service hands it to an `Accounts` implementation.

use rustc_hash::FxHashMap;

use crate::core::{Result, UserId};

/// Where prizes are credited.
pub trait Accounts {
    /// Add `amount` to the user's balance.
    fn credit_balance(&mut self, user: UserId, amount: u64) -> Result<()>;

    /// Current balance, 0 for unknown users.
    fn balance(&self, user: UserId) -> u64;
}

/// Balances kept in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAccounts {
    balances: FxHashMap<UserId, u64>,
}

impl InMemoryAccounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Accounts for InMemoryAccounts {
    fn credit_balance(&mut self, user: UserId, amount: u64) -> Result<()> {
        let balance = self.balances.entry(user).or_insert(0);
        *balance = balance.saturating_add(amount);
        Ok(())
    }

    fn balance(&self, user: UserId) -> u64 {
        self.balances.get(&user).copied().unwrap_or(0)
    }
}
