//! The game engine: round lifecycle, moves, payouts.
//!
//! - `game`: `GameEngine`, the single-owner state machine
//! - `checkpoint`: state plus RNG position for seeded engines
//! - `relocation`: the treasure relocation rule
//! - `shared`: `SharedGame`, the mutex-guarded handle for concurrent callers

pub mod checkpoint;
pub mod game;
pub mod relocation;
pub mod shared;

pub use checkpoint::Checkpoint;
pub use game::{GameEngine, MoveOutcome};
pub use relocation::{random_cell, relocate, Relocation};
pub use shared::SharedGame;
