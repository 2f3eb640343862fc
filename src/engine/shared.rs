//! Thread-safe handle around a `GameEngine`.
//!
//! All operations funnel through one mutex, so each Join/Move/Pause/Resume/
//! Withdraw runs to completion before the next is admitted. Two players
//! racing to join can never both pass the membership check.
//!
//! A collaborator (typically a ledger paying a winner) may hold a clone of
//! the handle and call back into it while an operation is running. Such a
//! call comes from the thread that already holds the engine and is rejected
//! with `ReentrantCall` instead of deadlocking.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

use super::game::{GameEngine, MoveOutcome};
use crate::access::AccessControl;
use crate::core::{Amount, Cell, GameError, PlayerId, Result};
use crate::entropy::EntropySource;
use crate::events::GameEvent;
use crate::ledger::Ledger;

struct Inner<E, L, A> {
    engine: Mutex<GameEngine<E, L, A>>,
    holder: Mutex<Option<ThreadId>>,
}

/// Cloneable, serialized handle to a shared engine.
pub struct SharedGame<E, L, A> {
    inner: Arc<Inner<E, L, A>>,
}

impl<E, L, A> Clone for SharedGame<E, L, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Marks the current thread as inside the engine until dropped.
struct Entry<'a> {
    holder: &'a Mutex<Option<ThreadId>>,
}

impl<'a> Entry<'a> {
    fn enter(holder: &'a Mutex<Option<ThreadId>>, id: ThreadId) -> Self {
        *lock(holder) = Some(id);
        Self { holder }
    }
}

impl Drop for Entry<'_> {
    fn drop(&mut self) {
        *lock(self.holder) = None;
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // Poisoning is not propagated. A panicking payout is rolled back by the
    // engine before the unwind reaches this lock.
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<E, L, A> SharedGame<E, L, A> {
    /// Wrap an engine.
    pub fn new(engine: GameEngine<E, L, A>) -> Self {
        Self {
            inner: Arc::new(Inner {
                engine: Mutex::new(engine),
                holder: Mutex::new(None),
            }),
        }
    }

    /// Run `op` with exclusive access to the engine.
    ///
    /// Fails with `ReentrantCall` if this thread is already inside an operation
    /// on the same engine.
    pub fn with_engine<T>(&self, op: impl FnOnce(&mut GameEngine<E, L, A>) -> Result<T>) -> Result<T> {
        let me = thread::current().id();
        if *lock(&self.inner.holder) == Some(me) {
            log::warn!("rejected re-entrant engine call");
            return Err(GameError::ReentrantCall);
        }

        let mut engine = lock(&self.inner.engine);
        let _entry = Entry::enter(&self.inner.holder, me);
        op(&mut *engine)
    }

    /// Take all events emitted since the last drain.
    pub fn drain_events(&self) -> Result<Vec<GameEvent>> {
        self.with_engine(|game| Ok(game.drain_events()))
    }
}

impl<E, L, A> SharedGame<E, L, A>
where
    E: EntropySource,
    L: Ledger,
    A: AccessControl,
{
    /// See `GameEngine::initialize`.
    pub fn initialize(&self, caller: PlayerId, initial_reward: Amount) -> Result<()> {
        self.with_engine(|game| game.initialize(caller, initial_reward))
    }

    /// See `GameEngine::join`.
    pub fn join(&self, player: PlayerId, fee: Amount) -> Result<Cell> {
        self.with_engine(|game| game.join(player, fee))
    }

    /// See `GameEngine::make_move`.
    pub fn make_move(&self, player: PlayerId, target: Cell) -> Result<MoveOutcome> {
        self.with_engine(|game| game.make_move(player, target))
    }

    /// See `GameEngine::pause`.
    pub fn pause(&self, caller: PlayerId) -> Result<()> {
        self.with_engine(|game| game.pause(caller))
    }

    /// See `GameEngine::resume`.
    pub fn resume(&self, caller: PlayerId) -> Result<()> {
        self.with_engine(|game| game.resume(caller))
    }

    /// See `GameEngine::withdraw`.
    pub fn withdraw(&self, caller: PlayerId) -> Result<Amount> {
        self.with_engine(|game| game.withdraw(caller))
    }

    /// See `GameEngine::fund`.
    pub fn fund(&self, from: PlayerId, amount: Amount) -> Result<()> {
        self.with_engine(|game| game.fund(from, amount))
    }
}
