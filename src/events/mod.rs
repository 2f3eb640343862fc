//! Domain events emitted by the engine.
//!
//! Every successful operation appends its events to an `EventLog`. External
//! observers drain the log after each call. A failed call appends nothing.

use serde::{Deserialize, Serialize};

use crate::core::{Amount, Cell, PlayerId};

/// Something observable that happened in the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player paid the entry fee and was placed on the grid.
    PlayerJoined { player: PlayerId, position: Cell },

    /// A player moved to a new cell.
    PlayerMoved { player: PlayerId, position: Cell },

    /// The treasure was (possibly) relocated.
    TreasureMoved { position: Cell },

    /// A player found the treasure and was paid.
    GameWon { player: PlayerId, reward: Amount },

    /// A round began.
    NewRoundStarted { round: u64 },

    GamePaused,

    GameResumed,

    /// Someone added liquidity to the ledger.
    FundsDeposited { from: PlayerId, amount: Amount },

    /// The administrator withdrew the ledger balance.
    FundsWithdrawn { to: PlayerId, amount: Amount },
}

impl GameEvent {
    /// Short event name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::PlayerJoined { .. } => "PlayerJoined",
            GameEvent::PlayerMoved { .. } => "PlayerMoved",
            GameEvent::TreasureMoved { .. } => "TreasureMoved",
            GameEvent::GameWon { .. } => "GameWon",
            GameEvent::NewRoundStarted { .. } => "NewRoundStarted",
            GameEvent::GamePaused => "GamePaused",
            GameEvent::GameResumed => "GameResumed",
            GameEvent::FundsDeposited { .. } => "FundsDeposited",
            GameEvent::FundsWithdrawn { .. } => "FundsWithdrawn",
        }
    }
}

/// Append-only buffer of pending events.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: GameEvent) {
        log::trace!("event {:?}", event);
        self.events.push(event);
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop events appended after `len`. Used to undo a failed operation.
    pub fn truncate(&mut self, len: usize) {
        self.events.truncate(len);
    }

    /// Pending events, oldest first.
    #[must_use]
    pub fn as_slice(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take all pending events.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_truncate_and_drain() {
        let mut log = EventLog::new();
        log.push(GameEvent::NewRoundStarted { round: 1 });
        let mark = log.len();
        log.push(GameEvent::GamePaused);
        log.push(GameEvent::GameResumed);

        log.truncate(mark);
        assert_eq!(log.as_slice(), &[GameEvent::NewRoundStarted { round: 1 }]);

        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::PlayerMoved {
            player: PlayerId::new(4),
            position: Cell::new(24),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["PlayerMoved"]["position"], 24);
        assert_eq!(event.name(), "PlayerMoved");

        let back: GameEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
