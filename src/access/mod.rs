//! Administrator checks for privileged operations.
//!
//! Initialize, Pause, Resume and Withdraw consult an `AccessControl`
//! before doing anything. Ownership management itself lives elsewhere.

use rustc_hash::FxHashSet;

use crate::core::PlayerId;

/// Answers whether a caller may run privileged operations.
pub trait AccessControl {
    /// Check if `caller` is an administrator.
    fn is_admin(&self, caller: PlayerId) -> bool;
}

/// A single fixed administrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleAdmin(pub PlayerId);

impl AccessControl for SingleAdmin {
    fn is_admin(&self, caller: PlayerId) -> bool {
        self.0 == caller
    }
}

/// A set of administrators.
#[derive(Clone, Debug, Default)]
pub struct AdminSet {
    admins: FxHashSet<PlayerId>,
}

impl AdminSet {
    /// Create a set from the given administrators.
    pub fn new(admins: impl IntoIterator<Item = PlayerId>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }

    /// Grant administrator rights.
    pub fn grant(&mut self, player: PlayerId) {
        self.admins.insert(player);
    }

    /// Revoke administrator rights.
    pub fn revoke(&mut self, player: PlayerId) {
        self.admins.remove(&player);
    }
}

impl AccessControl for AdminSet {
    fn is_admin(&self, caller: PlayerId) -> bool {
        self.admins.contains(&caller)
    }
}
