//! Fund custody.
//!
//! The engine computes amounts; a `Ledger` holds the funds and executes
//! transfers. Keeping transfers behind this trait lets the state machine be
//! tested without real payment rails.

mod memory;

pub use memory::InMemoryLedger;

use thiserror::Error;

use crate::core::{Amount, PlayerId};

/// Errors reported by a ledger.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Amount, available: Amount },

    #[error("transfer to {0} was rejected")]
    TransferRejected(PlayerId),

    #[error("ledger balance overflow")]
    Overflow,
}

/// Custodian of the game's funds.
///
/// Implementations must leave their balance untouched when they return an error.
pub trait Ledger {
    /// Record funds received from `from`.
    fn credit(&mut self, from: PlayerId, amount: Amount) -> Result<(), LedgerError>;

    /// Transfer `amount` out to `to`.
    fn pay(&mut self, to: PlayerId, amount: Amount) -> Result<(), LedgerError>;

    /// Funds currently held.
    fn balance(&self) -> Amount;
}

impl<T: Ledger + ?Sized> Ledger for Box<T> {
    fn credit(&mut self, from: PlayerId, amount: Amount) -> Result<(), LedgerError> {
        (**self).credit(from, amount)
    }

    fn pay(&mut self, to: PlayerId, amount: Amount) -> Result<(), LedgerError> {
        (**self).pay(to, amount)
    }

    fn balance(&self) -> Amount {
        (**self).balance()
    }
}
