//! Treasure relocation after a non-winning move.
//!
//! The landing cell `p` of the move decides what happens:
//!
//! - `p % walk_divisor == 0`: the treasure steps to one of its own
//!   orthogonal neighbors, chosen uniformly.
//! - `p` is prime: the treasure is re-rolled anywhere in the spawn range.
//! - otherwise: the treasure stays.
//!
//! The divisor rule is checked first, so with the default divisor cell 5
//! walks rather than re-rolls.

use serde::{Deserialize, Serialize};

use crate::core::{is_prime, Cell, GameConfig};
use crate::entropy::EntropySource;

/// What happened to the treasure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relocation {
    /// Stepped to a neighbor of its previous cell.
    Walked { from: Cell, to: Cell },
    /// Re-rolled across the spawn range.
    Rerolled { from: Cell, to: Cell },
    /// Did not move.
    Stayed(Cell),
}

impl Relocation {
    /// Treasure cell after the relocation.
    #[must_use]
    pub fn position(self) -> Cell {
        match self {
            Relocation::Walked { to, .. } | Relocation::Rerolled { to, .. } => to,
            Relocation::Stayed(cell) => cell,
        }
    }

    /// Check whether the position changed.
    #[must_use]
    pub fn changed(self) -> bool {
        match self {
            Relocation::Walked { from, to } | Relocation::Rerolled { from, to } => from != to,
            Relocation::Stayed(_) => false,
        }
    }
}

/// Pick a uniformly random cell in the configured spawn range.
pub fn random_cell<E: EntropySource + ?Sized>(config: &GameConfig, entropy: &mut E) -> Cell {
    Cell::new(entropy.next_below(config.spawn_bound()) as u16)
}

/// Apply the relocation rule for a move that landed on `landed`.
pub fn relocate<E: EntropySource + ?Sized>(
    config: &GameConfig,
    treasure: Cell,
    landed: Cell,
    entropy: &mut E,
) -> Relocation {
    if landed.raw() % config.walk_divisor == 0 {
        let neighbors = config.grid().neighbors(treasure);
        if neighbors.is_empty() {
            return Relocation::Stayed(treasure);
        }
        let pick = entropy.next_below(neighbors.len() as u32) as usize;
        Relocation::Walked {
            from: treasure,
            to: neighbors[pick.min(neighbors.len() - 1)],
        }
    } else if is_prime(landed.raw()) {
        Relocation::Rerolled {
            from: treasure,
            to: random_cell(config, entropy),
        }
    } else {
        Relocation::Stayed(treasure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameRng, SpawnRange};
    use crate::entropy::ScriptedEntropy;

    #[test]
    fn test_multiple_of_five_walks_to_neighbor() {
        let config = GameConfig::default();
        let mut entropy = ScriptedEntropy::new([3]);

        let result = relocate(&config, Cell::new(44), Cell::new(35), &mut entropy);
        // Neighbors of 44: up 34, down 54, left 43, right 45
        assert_eq!(result, Relocation::Walked { from: Cell::new(44), to: Cell::new(45) });
        assert_eq!(entropy.requested(), &[4]);
    }

    #[test]
    fn test_corner_treasure_has_two_candidates() {
        let config = GameConfig::default();
        let mut entropy = ScriptedEntropy::new([1]);

        let result = relocate(&config, Cell::new(0), Cell::new(10), &mut entropy);
        assert_eq!(result.position(), Cell::new(1));
        assert_eq!(entropy.requested(), &[2]);
    }

    #[test]
    fn test_cell_zero_counts_as_multiple_of_five() {
        let config = GameConfig::default();
        let mut entropy = ScriptedEntropy::new([0]);

        let result = relocate(&config, Cell::new(50), Cell::new(0), &mut entropy);
        assert!(matches!(result, Relocation::Walked { .. }));
    }

    #[test]
    fn test_five_walks_rather_than_rerolls() {
        let config = GameConfig::default();
        let mut entropy = ScriptedEntropy::new([0]);

        let result = relocate(&config, Cell::new(50), Cell::new(5), &mut entropy);
        assert_eq!(result, Relocation::Walked { from: Cell::new(50), to: Cell::new(40) });
    }

    #[test]
    fn test_prime_rerolls_over_spawn_range() {
        let config = GameConfig::default();
        let mut entropy = ScriptedEntropy::new([77]);

        let result = relocate(&config, Cell::new(12), Cell::new(23), &mut entropy);
        assert_eq!(result, Relocation::Rerolled { from: Cell::new(12), to: Cell::new(77) });
        assert_eq!(entropy.requested(), &[99]);

        let full = GameConfig::default().with_spawn_range(SpawnRange::FullGrid);
        let mut entropy = ScriptedEntropy::new([99]);
        let result = relocate(&full, Cell::new(12), Cell::new(23), &mut entropy);
        assert_eq!(result.position(), Cell::new(99));
    }

    #[test]
    fn test_other_cells_leave_treasure() {
        let config = GameConfig::default();
        let mut entropy = ScriptedEntropy::new([0u32; 0]);

        for landed in [1u16, 4, 24, 49, 98] {
            let result = relocate(&config, Cell::new(60), Cell::new(landed), &mut entropy);
            assert_eq!(result, Relocation::Stayed(Cell::new(60)));
            assert!(!result.changed());
        }
        assert!(entropy.requested().is_empty());
    }

    #[test]
    fn test_legacy_random_cell_never_hits_last_cell() {
        let config = GameConfig::default();
        let mut rng = GameRng::new(5);
        for _ in 0..5_000 {
            assert!(random_cell(&config, &mut rng).raw() < 99);
        }
    }
}
