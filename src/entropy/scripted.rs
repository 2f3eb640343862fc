//! Scripted entropy for reproducible scenarios.

use std::collections::VecDeque;

use super::EntropySource;
use crate::core::GameRng;

/// Entropy source that replays queued values, then falls back to a seeded RNG.
///
/// Each queued value is reduced modulo the requested bound. Every requested
/// bound is recorded so tests can check which rule asked for randomness.
///
/// ```
/// use treasure_hunt::entropy::{EntropySource, ScriptedEntropy};
///
/// let mut entropy = ScriptedEntropy::new([42, 7]);
/// assert_eq!(entropy.next_below(99), 42);
/// assert_eq!(entropy.next_below(4), 3);
/// assert_eq!(entropy.requested(), &[99, 4]);
/// ```
#[derive(Clone, Debug)]
pub struct ScriptedEntropy {
    queue: VecDeque<u32>,
    fallback: GameRng,
    requested: Vec<u32>,
}

impl ScriptedEntropy {
    /// Create a source replaying `values` in order.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            queue: values.into_iter().collect(),
            fallback: GameRng::new(0),
            requested: Vec::new(),
        }
    }

    /// Seed the generator used once the queue runs dry.
    #[must_use]
    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback = GameRng::new(seed);
        self
    }

    /// Queue another value.
    pub fn push(&mut self, value: u32) {
        self.queue.push_back(value);
    }

    /// Values still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Bounds requested so far, oldest first.
    #[must_use]
    pub fn requested(&self) -> &[u32] {
        &self.requested
    }
}

impl EntropySource for ScriptedEntropy {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.requested.push(bound);
        if bound == 0 {
            return 0;
        }
        match self.queue.pop_front() {
            Some(value) => value % bound,
            None => self.fallback.gen_below(bound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_then_falls_back() {
        let mut entropy = ScriptedEntropy::new([5, 150]).with_fallback_seed(9);
        entropy.push(2);
        assert_eq!(entropy.remaining(), 3);

        assert_eq!(entropy.next_below(10), 5);
        assert_eq!(entropy.next_below(99), 51);
        assert_eq!(entropy.next_below(3), 2);
        assert_eq!(entropy.remaining(), 0);

        let mut reference = GameRng::new(9);
        assert_eq!(entropy.next_below(50), reference.gen_below(50));
        assert_eq!(entropy.requested(), &[10, 99, 3, 50]);
    }
}
