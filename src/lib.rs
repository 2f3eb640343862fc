//! # treasure-hunt
//!
//! A multiplayer grid treasure-hunt round engine.
//!
//! Players pay an entry fee to join the current round and are dropped on a
//! random cell. They step between orthogonally adjacent cells; whoever lands
//! on the treasure collects 90% of the round's fees plus a fixed subsidy and
//! a new round begins. Every other move may shift the treasure:
//!
//! - landing on a multiple of 5 nudges it to one of its neighbors
//! - landing on a prime cell re-rolls it anywhere on the grid
//!
//! ## Design Principles
//!
//! 1. **One owned state object**: `GameState` holds the round and the player
//!    table. The engine mutates it through `&mut self`; nothing is global.
//!
//! 2. **Collaborators behind traits**: randomness (`EntropySource`), fund
//!    custody (`Ledger`) and administrator checks (`AccessControl`) are
//!    plugged in, so the state machine is testable with seeded or scripted
//!    inputs and no payment rails.
//!
//! 3. **All-or-nothing operations**: a failed call leaves no trace. A refused
//!    payout rolls the win back.
//!
//! ## Modules
//!
//! - `core`: Grid, players, state, RNG, configuration, errors
//! - `entropy`: Entropy sources
//! - `ledger`: Fund custody
//! - `access`: Administrator checks
//! - `events`: Domain events
//! - `engine`: The round state machine and its shared handle
//! - `sim`: Random-walk self-play

pub mod core;
pub mod entropy;
pub mod ledger;
pub mod access;
pub mod events;
pub mod engine;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    Amount, Cell, Grid, GameConfig, SpawnRange,
    GameError, Result,
    GameRng, GameRngState,
    GameState, Player, PlayerId,
};

pub use crate::entropy::{EntropySource, ScriptedEntropy, ThreadEntropy};

pub use crate::ledger::{InMemoryLedger, Ledger, LedgerError};

pub use crate::access::{AccessControl, AdminSet, SingleAdmin};

pub use crate::events::{EventLog, GameEvent};

pub use crate::engine::{Checkpoint, GameEngine, MoveOutcome, Relocation, SharedGame};

pub use crate::sim::{RandomWalk, RandomWalkConfig, SimulationStats};
