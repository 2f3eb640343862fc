//! Entropy sources for treasure and spawn placement.
//!
//! The engine only needs "a uniformly distributed integer below a bound".
//! No cryptographic guarantee is implied: a privileged observer may be able
//! to predict values. Production deployments plug in whatever provider they
//! trust; tests use a seeded `GameRng` or a `ScriptedEntropy`.

mod scripted;

pub use scripted::ScriptedEntropy;

use crate::core::GameRng;

/// Provider of pseudo-random grid indices.
pub trait EntropySource {
    /// Return a value in `[0, bound)`.
    ///
    /// The engine never asks for a zero bound.
    fn next_below(&mut self, bound: u32) -> u32;
}

impl EntropySource for GameRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        self.gen_below(bound)
    }
}

impl<T: EntropySource + ?Sized> EntropySource for &mut T {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

impl<T: EntropySource + ?Sized> EntropySource for Box<T> {
    fn next_below(&mut self, bound: u32) -> u32 {
        (**self).next_below(bound)
    }
}

/// Unseeded entropy from the thread-local generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadEntropy;

impl EntropySource for ThreadEntropy {
    fn next_below(&mut self, bound: u32) -> u32 {
        use rand::Rng;

        if bound == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw<E: EntropySource>(mut source: E, bound: u32, n: usize) -> Vec<u32> {
        (0..n).map(|_| source.next_below(bound)).collect()
    }

    #[test]
    fn test_game_rng_is_entropy_source() {
        let a = draw(GameRng::new(11), 99, 20);
        let b = draw(GameRng::new(11), 99, 20);
        assert_eq!(a, b);
        assert!(a.iter().all(|&v| v < 99));
    }

    #[test]
    fn test_thread_entropy_in_range() {
        let values = draw(ThreadEntropy, 4, 200);
        assert!(values.iter().all(|&v| v < 4));
    }

    #[test]
    fn test_boxed_source() {
        let boxed: Box<dyn EntropySource> = Box::new(GameRng::new(3));
        let values = draw(boxed, 10, 10);
        assert_eq!(values, draw(GameRng::new(3), 10, 10));
    }

    #[test]
    fn test_uniformity() {
        let mut rng = GameRng::new(2024);
        let mut counts = [0u32; 4];
        for _ in 0..40_000 {
            counts[rng.next_below(4) as usize] += 1;
        }
        for count in counts {
            assert!((9_000..11_000).contains(&count), "skewed bucket: {}", count);
        }
    }
}
