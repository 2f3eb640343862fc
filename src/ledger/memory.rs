//! In-process ledger.

use rustc_hash::{FxHashMap, FxHashSet};

use super::{Ledger, LedgerError};
use crate::core::{Amount, PlayerId};

/// Ledger kept in memory, with per-account totals.
///
/// Recipients can be marked as refusing transfers to exercise the
/// `TransferRejected` path.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLedger {
    balance: Amount,
    received: FxHashMap<PlayerId, Amount>,
    paid: FxHashMap<PlayerId, Amount>,
    refusing: FxHashSet<PlayerId>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger already holding `balance`.
    pub fn with_balance(balance: Amount) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }

    /// Make every transfer to `player` fail with `TransferRejected`.
    pub fn refuse_payments_to(&mut self, player: PlayerId) {
        self.refusing.insert(player);
    }

    /// Accept transfers to `player` again.
    pub fn accept_payments_to(&mut self, player: PlayerId) {
        self.refusing.remove(&player);
    }

    /// Total credited from `player`.
    #[must_use]
    pub fn received_from(&self, player: PlayerId) -> Amount {
        self.received.get(&player).copied().unwrap_or(0)
    }

    /// Total paid out to `player`.
    #[must_use]
    pub fn paid_to(&self, player: PlayerId) -> Amount {
        self.paid.get(&player).copied().unwrap_or(0)
    }
}

impl Ledger for InMemoryLedger {
    fn credit(&mut self, from: PlayerId, amount: Amount) -> Result<(), LedgerError> {
        let balance = self.balance.checked_add(amount).ok_or(LedgerError::Overflow)?;
        let received = self
            .received_from(from)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.balance = balance;
        self.received.insert(from, received);
        Ok(())
    }

    fn pay(&mut self, to: PlayerId, amount: Amount) -> Result<(), LedgerError> {
        if self.refusing.contains(&to) {
            return Err(LedgerError::TransferRejected(to));
        }
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        let paid = self.paid_to(to).checked_add(amount).ok_or(LedgerError::Overflow)?;

        self.balance -= amount;
        self.paid.insert(to, paid);
        Ok(())
    }

    fn balance(&self) -> Amount {
        self.balance
    }
}
