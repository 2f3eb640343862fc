//! Round and player state.
//!
//! `GameState` is the single owned state object the engine mutates. It is
//! cheap to clone: the player table is an `im` persistent map, so the engine
//! can take an O(1) checkpoint before a fallible payout and restore it if the
//! transfer fails.
//!
//! ## Lifecycle
//!
//! - `GameState::new()`: uninitialized, round 0, no treasure
//! - `start_round()`: bumps the round counter, places the treasure, zeroes
//!   the round balance, ends every membership of the previous round

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};

use super::error::{Amount, GameError, Result};
use super::grid::{Cell, Grid};
use super::player::{Player, PlayerId};

/// Complete engine state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    initialized: bool,

    /// Fixed subsidy added to every payout.
    pub initial_reward: Amount,

    /// Current treasure cell.
    pub treasure: Cell,

    /// Entry fees collected in the current round.
    pub round_balance: Amount,

    /// Round counter (1 after initialization).
    pub game_round: u64,

    /// Cleared while paused.
    pub active: bool,

    players: ImHashMap<PlayerId, Player>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create an uninitialized state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            initialized: false,
            initial_reward: 0,
            treasure: Cell::new(0),
            round_balance: 0,
            game_round: 0,
            active: false,
            players: ImHashMap::new(),
        }
    }

    /// Check whether `Initialize` has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Mark the state initialized with the given reward subsidy.
    pub fn initialize(&mut self, initial_reward: Amount) {
        self.initialized = true;
        self.initial_reward = initial_reward;
        self.active = true;
    }

    /// Begin a new round with the treasure at `treasure`.
    ///
    /// Returns the new round number.
    pub fn start_round(&mut self, treasure: Cell) -> u64 {
        self.game_round += 1;
        self.treasure = treasure;
        self.round_balance = 0;
        self.game_round
    }

    // === Players ===

    /// Get a player record.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Get a player record, creating a default one if absent.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        self.players.entry(id).or_insert_with(Player::default)
    }

    /// Check whether a player takes part in the current round.
    #[must_use]
    pub fn is_participant(&self, id: PlayerId) -> bool {
        self.player(id)
            .is_some_and(|p| p.is_participant(self.game_round))
    }

    /// Iterate over all known players.
    pub fn players(&self) -> impl Iterator<Item = (&PlayerId, &Player)> {
        self.players.iter()
    }

    /// Number of players ever seen.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Number of players in the current round.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.players
            .values()
            .filter(|p| p.is_participant(self.game_round))
            .count()
    }

    // === Balances ===

    /// Round balance after collecting `fee`, without applying it.
    pub fn balance_with(&self, fee: Amount) -> Result<Amount> {
        self.round_balance.checked_add(fee).ok_or(GameError::Overflow)
    }

    /// `floor(round_balance * percent / 100) + initial_reward`.
    pub fn reward(&self, payout_percent: u8) -> Result<Amount> {
        let share = self
            .round_balance
            .checked_mul(Amount::from(payout_percent))
            .ok_or(GameError::Overflow)?
            / 100;
        share.checked_add(self.initial_reward).ok_or(GameError::Overflow)
    }

    // === Snapshots ===

    /// Check that every stored cell lies on `grid`.
    pub fn validate(&self, grid: Grid) -> Result<()> {
        if self.initialized && !grid.contains(self.treasure) {
            return Err(GameError::Snapshot(format!("treasure {} is off the grid", self.treasure)));
        }
        for (id, player) in self.players.iter() {
            if let Some(pos) = player.position {
                if !grid.contains(pos) {
                    return Err(GameError::Snapshot(format!("{} at {} is off the grid", id, pos)));
                }
            }
        }
        Ok(())
    }

    /// Encode the state for checkpointing.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| GameError::Snapshot(e.to_string()))
    }

    /// Decode a state produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| GameError::Snapshot(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new();
        assert!(!state.is_initialized());
        assert!(!state.active);
        assert_eq!(state.game_round, 0);
        assert_eq!(state.player_count(), 0);
    }

    #[test]
    fn test_start_round_resets_balance_and_membership() {
        let mut state = GameState::new();
        state.initialize(100);
        assert_eq!(state.start_round(Cell::new(42)), 1);

        let alice = PlayerId::new(1);
        state.player_mut(alice).join(1, Cell::new(7));
        state.round_balance = state.balance_with(50).unwrap();
        assert!(state.is_participant(alice));
        assert_eq!(state.participant_count(), 1);

        assert_eq!(state.start_round(Cell::new(3)), 2);
        assert_eq!(state.round_balance, 0);
        assert_eq!(state.treasure, Cell::new(3));
        assert!(!state.is_participant(alice));
        assert_eq!(state.player(alice).unwrap().position, Some(Cell::new(7)));
    }

    #[test]
    fn test_reward() {
        let mut state = GameState::new();
        state.initialize(1_000);
        state.round_balance = state.balance_with(105).unwrap();
        // floor(105 * 90 / 100) = 94
        assert_eq!(state.reward(90).unwrap(), 1_094);
        assert_eq!(state.reward(0).unwrap(), 1_000);
        assert_eq!(state.reward(100).unwrap(), 1_105);
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut state = GameState::new();
        state.initialize(0);
        state.round_balance = state.balance_with(Amount::MAX).unwrap();
        assert_eq!(state.balance_with(1), Err(GameError::Overflow));
        assert_eq!(state.round_balance, Amount::MAX);
        assert_eq!(state.reward(90), Err(GameError::Overflow));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let mut state = GameState::new();
        state.initialize(5);
        state.start_round(Cell::new(12));
        state.player_mut(PlayerId::new(9)).join(1, Cell::new(0));

        let bytes = state.to_bytes().unwrap();
        let restored = GameState::from_bytes(&bytes).unwrap();
        assert_eq!(state, restored);

        assert!(matches!(GameState::from_bytes(&[1, 2]), Err(GameError::Snapshot(_))));
    }

    #[test]
    fn test_validate_off_grid() {
        let mut state = GameState::new();
        state.initialize(0);
        state.start_round(Cell::new(150));
        assert!(state.validate(Grid::new(10)).is_err());
        assert!(state.validate(Grid::new(20)).is_ok());
    }
}
