//! Engine error taxonomy.
//!
//! Every operation returns `Result<T>`. A failed call leaves no observable
//! state change behind.

use thiserror::Error;

use super::grid::Cell;
use super::player::PlayerId;
use crate::ledger::LedgerError;

/// Amount of funds in the ledger's smallest unit.
pub type Amount = u128;

/// Errors returned by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is already initialized")]
    AlreadyInitialized,

    #[error("game has not been initialized")]
    NotInitialized,

    #[error("game is not active")]
    GameNotActive,

    #[error("payment must be greater than zero")]
    ZeroPayment,

    #[error("{0} already joined this round")]
    AlreadyJoined(PlayerId),

    #[error("{0} is not taking part in this round")]
    NotAParticipant(PlayerId),

    #[error("{player} cannot move from {from} to {to}")]
    InvalidMove {
        player: PlayerId,
        from: Cell,
        to: Cell,
    },

    #[error("{0} is not an administrator")]
    Unauthorized(PlayerId),

    #[error("insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Amount, available: Amount },

    #[error("transfer to {0} was rejected")]
    TransferRejected(PlayerId),

    #[error("game is already paused")]
    AlreadyPaused,

    #[error("game is not paused")]
    NotPaused,

    #[error("re-entrant call rejected while an operation is in progress")]
    ReentrantCall,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<LedgerError> for GameError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InsufficientFunds { requested, available } => {
                GameError::InsufficientFunds { requested, available }
            }
            LedgerError::TransferRejected(recipient) => GameError::TransferRejected(recipient),
            LedgerError::Overflow => GameError::Overflow,
        }
    }
}

/// Engine result type.
pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_error_conversion() {
        let err: GameError = LedgerError::TransferRejected(PlayerId::new(3)).into();
        assert_eq!(err, GameError::TransferRejected(PlayerId::new(3)));

        let err: GameError = LedgerError::InsufficientFunds { requested: 10, available: 4 }.into();
        assert_eq!(err, GameError::InsufficientFunds { requested: 10, available: 4 });
    }

    #[test]
    fn test_messages() {
        let err = GameError::InvalidMove {
            player: PlayerId::new(1),
            from: Cell::new(23),
            to: Cell::new(45),
        };
        assert_eq!(err.to_string(), "Player 1 cannot move from Cell(23) to Cell(45)");
    }
}
