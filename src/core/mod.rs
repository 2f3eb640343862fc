//! Core engine types: grid, players, state, RNG, configuration, errors.
//!
//! These are the building blocks the engine and its collaborators share.

pub mod grid;
pub mod player;
pub mod rng;
pub mod config;
pub mod state;
pub mod error;

pub use grid::{is_prime, Cell, Grid, Neighbors};
pub use player::{Player, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, SpawnRange};
pub use state::GameState;
pub use error::{Amount, GameError, Result};
