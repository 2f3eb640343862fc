//! The round state machine.

use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use super::relocation::{random_cell, relocate, Relocation};
use crate::access::AccessControl;
use crate::core::{Amount, Cell, GameConfig, GameError, GameState, Grid, Player, PlayerId, Result};
use crate::entropy::EntropySource;
use crate::events::{EventLog, GameEvent};
use crate::ledger::Ledger;

/// Result of a successful move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The player moved without finding the treasure.
    Moved { position: Cell, relocation: Relocation },
    /// The player found the treasure, was paid, and a new round began.
    Won { reward: Amount, next_round: u64 },
}

/// Multiplayer treasure-hunt engine.
///
/// Owns the game state and drives its collaborators:
/// - `E`: entropy for spawn and treasure placement
/// - `L`: ledger holding fees and paying rewards
/// - `A`: administrator checks for privileged operations
///
/// Every operation takes `&mut self`, so calls are serialized by ownership.
/// Share an engine between threads through `SharedGame`.
///
/// ## Failure atomicity
///
/// Preconditions are checked before anything changes. The only fallible
/// step after mutation is the winner's payout; if the ledger refuses it,
/// the state and event log are restored to their pre-move checkpoint and
/// the ledger error is returned. A ledger that panics gets the same
/// rollback before the panic is resumed.
pub struct GameEngine<E, L, A> {
    config: GameConfig,
    state: GameState,
    entropy: E,
    ledger: L,
    access: A,
    events: EventLog,
}

impl<E, L, A> GameEngine<E, L, A>
where
    E: EntropySource,
    L: Ledger,
    A: AccessControl,
{
    /// Create an uninitialized engine.
    pub fn new(config: GameConfig, entropy: E, ledger: L, access: A) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: GameState::new(),
            entropy,
            ledger,
            access,
            events: EventLog::new(),
        })
    }

    /// Create an engine from a previously saved state.
    pub fn restore(config: GameConfig, state: GameState, entropy: E, ledger: L, access: A) -> Result<Self> {
        config.validate()?;
        state.validate(config.grid())?;
        log::info!("restored game at round {}", state.game_round);
        Ok(Self {
            config,
            state,
            entropy,
            ledger,
            access,
            events: EventLog::new(),
        })
    }

    // === Privileged operations ===

    /// One-time setup: records the reward subsidy and starts round 1.
    pub fn initialize(&mut self, caller: PlayerId, initial_reward: Amount) -> Result<()> {
        self.require_admin(caller)?;
        if self.state.is_initialized() {
            return Err(GameError::AlreadyInitialized);
        }

        self.state.initialize(initial_reward);
        log::info!("game initialized with reward subsidy {}", initial_reward);
        self.start_round();
        Ok(())
    }

    /// Suspend joins and moves. The current round is kept as is.
    pub fn pause(&mut self, caller: PlayerId) -> Result<()> {
        self.require_admin(caller)?;
        self.require_initialized()?;
        if !self.state.active {
            return Err(GameError::AlreadyPaused);
        }

        self.state.active = false;
        log::info!("game paused in round {}", self.state.game_round);
        self.events.push(GameEvent::GamePaused);
        Ok(())
    }

    /// Re-open the current round.
    pub fn resume(&mut self, caller: PlayerId) -> Result<()> {
        self.require_admin(caller)?;
        self.require_initialized()?;
        if self.state.active {
            return Err(GameError::NotPaused);
        }

        self.state.active = true;
        log::info!("game resumed in round {}", self.state.game_round);
        self.events.push(GameEvent::GameResumed);
        Ok(())
    }

    /// Transfer the whole ledger balance to the calling administrator.
    ///
    /// Round state, the round counter and player records are untouched.
    pub fn withdraw(&mut self, caller: PlayerId) -> Result<Amount> {
        self.require_admin(caller)?;

        let amount = self.ledger.balance();
        if amount > 0 {
            self.ledger.pay(caller, amount)?;
        }
        log::info!("{} withdrew {}", caller, amount);
        self.events.push(GameEvent::FundsWithdrawn { to: caller, amount });
        Ok(amount)
    }

    // === Player operations ===

    /// Add liquidity to the ledger, e.g. to cover the reward subsidy.
    pub fn fund(&mut self, from: PlayerId, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Err(GameError::ZeroPayment);
        }
        self.ledger.credit(from, amount)?;
        log::debug!("{} deposited {}", from, amount);
        self.events.push(GameEvent::FundsDeposited { from, amount });
        Ok(())
    }

    /// Pay the entry fee and take a random starting cell.
    pub fn join(&mut self, player: PlayerId, fee: Amount) -> Result<Cell> {
        self.require_live()?;
        if fee == 0 {
            return Err(GameError::ZeroPayment);
        }
        if self.state.is_participant(player) {
            return Err(GameError::AlreadyJoined(player));
        }
        let round_balance = self.state.balance_with(fee)?;

        self.ledger.credit(player, fee)?;

        let position = random_cell(&self.config, &mut self.entropy);
        let round = self.state.game_round;
        self.state.player_mut(player).join(round, position);
        self.state.round_balance = round_balance;

        log::debug!("{} joined round {} at {}", player, round, position);
        self.events.push(GameEvent::PlayerJoined { player, position });
        Ok(position)
    }

    /// Step to an adjacent cell.
    ///
    /// Landing on the treasure pays the winner and starts the next round.
    /// Any other landing runs the relocation rule.
    pub fn make_move(&mut self, player: PlayerId, target: Cell) -> Result<MoveOutcome> {
        self.require_live()?;
        let from = self
            .state
            .player(player)
            .filter(|p| p.is_participant(self.state.game_round))
            .and_then(|p| p.position)
            .ok_or(GameError::NotAParticipant(player))?;
        if !self.grid().is_adjacent(from, target) {
            return Err(GameError::InvalidMove { player, from, to: target });
        }

        if target == self.state.treasure {
            return self.win(player, target);
        }

        self.state.player_mut(player).position = Some(target);
        log::debug!("{} moved {} -> {}", player, from, target);
        self.events.push(GameEvent::PlayerMoved { player, position: target });

        let relocation = relocate(&self.config, self.state.treasure, target, &mut self.entropy);
        self.state.treasure = relocation.position();
        log::debug!("treasure relocation: {:?}", relocation);
        if relocation.changed() || self.config.emit_unchanged_treasure {
            self.events.push(GameEvent::TreasureMoved { position: relocation.position() });
        }

        Ok(MoveOutcome::Moved { position: target, relocation })
    }

    fn win(&mut self, player: PlayerId, target: Cell) -> Result<MoveOutcome> {
        let reward = self.state.reward(self.config.payout_percent)?;
        let checkpoint = self.state.clone();
        let mark = self.events.len();

        {
            let record = self.state.player_mut(player);
            record.position = Some(target);
            record.score = record.score.saturating_add(1);
        }
        self.events.push(GameEvent::PlayerMoved { player, position: target });
        self.events.push(GameEvent::GameWon { player, reward });
        let next_round = self.start_round();

        // Transfer last, after every state change is in place.
        let ledger = &mut self.ledger;
        match panic::catch_unwind(AssertUnwindSafe(|| ledger.pay(player, reward))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                log::warn!("payout of {} to {} failed, rolling back win: {}", reward, player, err);
                self.state = checkpoint;
                self.events.truncate(mark);
                return Err(err.into());
            }
            Err(payload) => {
                log::warn!("ledger panicked paying {} to {}, rolling back win", reward, player);
                self.state = checkpoint;
                self.events.truncate(mark);
                panic::resume_unwind(payload);
            }
        }

        log::info!("{} found the treasure at {} and won {}", player, target, reward);
        Ok(MoveOutcome::Won { reward, next_round })
    }

    fn start_round(&mut self) -> u64 {
        let treasure = random_cell(&self.config, &mut self.entropy);
        let round = self.state.start_round(treasure);
        log::info!("round {} started", round);
        self.events.push(GameEvent::NewRoundStarted { round });
        round
    }

    fn require_admin(&self, caller: PlayerId) -> Result<()> {
        if self.access.is_admin(caller) {
            Ok(())
        } else {
            Err(GameError::Unauthorized(caller))
        }
    }

    fn require_initialized(&self) -> Result<()> {
        if self.state.is_initialized() {
            Ok(())
        } else {
            Err(GameError::NotInitialized)
        }
    }

    fn require_live(&self) -> Result<()> {
        self.require_initialized()?;
        if self.state.active {
            Ok(())
        } else {
            Err(GameError::GameNotActive)
        }
    }
}

impl<E, L, A> GameEngine<E, L, A> {
    // === Accessors ===

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Grid geometry.
    #[must_use]
    pub fn grid(&self) -> Grid {
        self.config.grid()
    }

    /// Full state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Player record, if the player ever joined.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.state.player(id)
    }

    /// Current treasure cell.
    #[must_use]
    pub fn treasure_position(&self) -> Cell {
        self.state.treasure
    }

    /// Current round number.
    #[must_use]
    pub fn game_round(&self) -> u64 {
        self.state.game_round
    }

    /// Whether joins and moves are accepted.
    #[must_use]
    pub fn is_game_active(&self) -> bool {
        self.state.active
    }

    /// Fees collected in the current round.
    #[must_use]
    pub fn round_balance(&self) -> Amount {
        self.state.round_balance
    }

    /// Reward subsidy set at initialization.
    #[must_use]
    pub fn initial_reward(&self) -> Amount {
        self.state.initial_reward
    }

    /// Players ordered by score (highest first), ties by id.
    #[must_use]
    pub fn leaderboard(&self, limit: usize) -> Vec<(PlayerId, u32)> {
        let mut board: Vec<_> = self.state.players().map(|(id, p)| (*id, p.score)).collect();
        board.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        board.truncate(limit);
        board
    }

    /// The ledger collaborator.
    #[must_use]
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The entropy collaborator.
    #[must_use]
    pub fn entropy(&self) -> &E {
        &self.entropy
    }

    /// Events emitted since the last drain.
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        self.events.as_slice()
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Checkpoint of the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }
}
