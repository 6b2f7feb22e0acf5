use crate::types::{AccountId, EraIndex, PoolId};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// PoolState
///
/// Lifecycle state of a bonded pool. Anything the chain reports that is not
/// one of the known states maps to `Unknown`.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, Deserialize, Serialize)]
pub enum PoolState {
    Open,
    Blocked,
    Destroying,
    #[default]
    #[serde(other)]
    Unknown,
}

impl PoolState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

///
/// PoolRoles
///
/// Every role may be unset on chain.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolRoles {
    pub depositor: Option<AccountId>,
    pub root: Option<AccountId>,
    pub nominator: Option<AccountId>,
    pub state_toggler: Option<AccountId>,
}

///
/// BondedPool
///
/// Pool metadata as read from the chain.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BondedPool {
    pub state: PoolState,
    pub member_counter: u32,
    pub roles: PoolRoles,
}

///
/// PoolRecord
///
/// Outcome of qualifying one candidate. `pass = true` means every enabled
/// check ran and succeeded; `pass = false` says nothing about checks after
/// the first failing one.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct PoolRecord {
    pub pool_id: PoolId,
    pub era: EraIndex,
    pub stash_account: AccountId,
    pub reward_account: AccountId,
    pub roles: PoolRoles,
    pub state: PoolState,
    pub member_count: u32,
    pub pass: bool,
}

impl PoolRecord {
    /// Record for an identifier whose pool no longer exists.
    #[must_use]
    pub fn missing(pool_id: PoolId, era: EraIndex) -> Self {
        Self {
            pool_id,
            era,
            ..Self::default()
        }
    }
}

///
/// TESTS
///
