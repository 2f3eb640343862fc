//! Self-play simulation.
//!
//! Drives an engine with a population of random-walking players. Used by the
//! benchmarks and by fairness tests that need many rounds of play.

mod random_walk;

pub use random_walk::{RandomWalk, RandomWalkConfig, SimulationStats};
