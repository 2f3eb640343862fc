//! Player identification and per-player records.
//!
//! ## PlayerId
//!
//! Opaque account identifier supplied by the caller.
//!
//! ## Player
//!
//! Cumulative record kept across rounds. Round membership is explicit:
//! a player takes part in the current round only if `round` matches the
//! live round number. The position is never used as a membership marker,
//! so cell 0 is an ordinary cell.

use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// Player (account) identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw account value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Round the player last joined. `None` before the first join.
    pub round: Option<u64>,

    /// Last known position. Kept after the round ends for display.
    pub position: Option<Cell>,

    /// Number of rounds won. Never decreases.
    pub score: u32,
}

impl Player {
    /// Check whether the player is taking part in the given round.
    #[must_use]
    pub fn is_participant(&self, round: u64) -> bool {
        self.round == Some(round) && self.position.is_some()
    }

    /// Record a join for `round` at `position`.
    pub fn join(&mut self, round: u64, position: Cell) {
        self.round = Some(round);
        self.position = Some(position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id() {
        let id = PlayerId::new(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(format!("{}", id), "Player 7");
    }

    #[test]
    fn test_default_player_is_not_participant() {
        let player = Player::default();
        assert!(!player.is_participant(1));
        assert_eq!(player.score, 0);
    }

    #[test]
    fn test_cell_zero_is_a_real_position() {
        let mut player = Player::default();
        player.join(3, Cell::new(0));
        assert!(player.is_participant(3));
        assert!(!player.is_participant(4));
        assert_eq!(player.position, Some(Cell::new(0)));
    }
}
