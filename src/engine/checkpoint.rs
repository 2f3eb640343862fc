//! Save and resume a seeded engine.
//!
//! A `GameState` snapshot alone restarts entropy from scratch. For engines
//! driven by `GameRng`, a `Checkpoint` also carries the generator position, so
//! a resumed game places spawns and treasure exactly as the original would have.

use serde::{Deserialize, Serialize};

use super::game::GameEngine;
use crate::access::AccessControl;
use crate::core::{GameConfig, GameError, GameRng, GameRngState, GameState, Result};
use crate::ledger::Ledger;

/// Game state plus the entropy stream position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub state: GameState,
    pub rng: GameRngState,
}

impl Checkpoint {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| GameError::Snapshot(e.to_string()))
    }

    /// Decode a checkpoint produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| GameError::Snapshot(e.to_string()))
    }
}

impl<L, A> GameEngine<GameRng, L, A>
where
    L: Ledger,
    A: AccessControl,
{
    /// Capture state and generator position.
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            state: self.snapshot(),
            rng: self.entropy().state(),
        }
    }

    /// Rebuild an engine from a checkpoint. The ledger and access control
    /// are supplied by the caller, as with `restore`.
    pub fn from_checkpoint(config: GameConfig, checkpoint: Checkpoint, ledger: L, access: A) -> Result<Self> {
        let rng = GameRng::from_state(&checkpoint.rng);
        Self::restore(config, checkpoint.state, rng, ledger, access)
    }
}
