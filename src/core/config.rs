//! Game configuration.
//!
//! `GameConfig` fixes the grid geometry and the round rules at construction
//! time. The defaults reproduce the classic 10x10 game: 90% of the round
//! balance goes to the winner, moves onto multiples of 5 nudge the treasure
//! to a neighbor, and random placement never lands on the last cell.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use super::grid::Grid;

/// Range used for random placement (join spawn and prime re-roll).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnRange {
    /// `[0, max_cell)`: the last cell is never chosen.
    #[default]
    Legacy,
    /// `[0, max_cell]`: every cell can be chosen.
    FullGrid,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid side length (2-255).
    pub grid_size: u16,

    /// Share of the round balance paid to the winner, in percent.
    pub payout_percent: u8,

    /// Landing on a multiple of this value moves the treasure to a neighbor.
    pub walk_divisor: u16,

    /// Range for random placement.
    pub spawn_range: SpawnRange,

    /// Emit `TreasureMoved` even when the treasure stays put.
    pub emit_unchanged_treasure: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 10,
            payout_percent: 90,
            walk_divisor: 5,
            spawn_range: SpawnRange::Legacy,
            emit_unchanged_treasure: true,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid side length.
    #[must_use]
    pub fn with_grid_size(mut self, size: u16) -> Self {
        self.grid_size = size;
        self
    }

    /// Set the winner's share of the round balance.
    #[must_use]
    pub fn with_payout_percent(mut self, percent: u8) -> Self {
        self.payout_percent = percent;
        self
    }

    /// Set the divisor that triggers a neighbor walk.
    #[must_use]
    pub fn with_walk_divisor(mut self, divisor: u16) -> Self {
        self.walk_divisor = divisor;
        self
    }

    /// Set the random placement range.
    #[must_use]
    pub fn with_spawn_range(mut self, range: SpawnRange) -> Self {
        self.spawn_range = range;
        self
    }

    /// Choose whether unchanged treasure positions are reported.
    #[must_use]
    pub fn with_unchanged_treasure_events(mut self, emit: bool) -> Self {
        self.emit_unchanged_treasure = emit;
        self
    }

    /// Grid described by this configuration.
    #[must_use]
    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_size)
    }

    /// Exclusive upper bound for random placement.
    #[must_use]
    pub fn spawn_bound(&self) -> u32 {
        let cells = self.grid().cell_count();
        match self.spawn_range {
            SpawnRange::Legacy => cells - 1,
            SpawnRange::FullGrid => cells,
        }
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(2..=255).contains(&self.grid_size) {
            return Err(GameError::InvalidConfig(format!(
                "grid_size must be 2-255, got {}",
                self.grid_size
            )));
        }
        if self.payout_percent > 100 {
            return Err(GameError::InvalidConfig(format!(
                "payout_percent must be at most 100, got {}",
                self.payout_percent
            )));
        }
        if self.walk_divisor == 0 {
            return Err(GameError::InvalidConfig("walk_divisor must be non-zero".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 10);
        assert_eq!(config.payout_percent, 90);
        assert_eq!(config.walk_divisor, 5);
        assert_eq!(config.spawn_range, SpawnRange::Legacy);
        assert!(config.emit_unchanged_treasure);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_spawn_bound() {
        let legacy = GameConfig::default();
        assert_eq!(legacy.spawn_bound(), 99);

        let full = GameConfig::default().with_spawn_range(SpawnRange::FullGrid);
        assert_eq!(full.spawn_bound(), 100);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_grid_size(8)
            .with_payout_percent(75)
            .with_walk_divisor(3)
            .with_unchanged_treasure_events(false);

        assert_eq!(config.grid().max_cell().raw(), 63);
        assert_eq!(config.payout_percent, 75);
        assert_eq!(config.walk_divisor, 3);
        assert!(!config.emit_unchanged_treasure);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(matches!(
            GameConfig::new().with_grid_size(1).validate(),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::new().with_grid_size(256).validate(),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::new().with_payout_percent(101).validate(),
            Err(GameError::InvalidConfig(_))
        ));
        assert!(matches!(
            GameConfig::new().with_walk_divisor(0).validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_serde_fills_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"grid_size": 6}"#).unwrap();
        assert_eq!(config.grid_size, 6);
        assert_eq!(config.payout_percent, 90);

        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
