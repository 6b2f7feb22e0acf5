//! Shared stubs for unit tests: an in-memory chain with call counters, a
//! counting validator oracle, and a self-waking delay future.

use crate::{
    domain::{BondedPool, PalletId, PoolAccounts, PoolRoles, PoolState},
    interface::{ChainSource, Exposure, Identity, Nominations, SourceError, ValidatorSelector},
    types::{AccountId, Balance, EraIndex, PoolId},
};
use async_trait::async_trait;
use futures::future;
use std::{
    collections::{HashMap, HashSet},
    sync::atomic::{AtomicUsize, Ordering},
    task::Poll,
};

/// Resolve to `value` after returning `Pending` `polls` times, waking itself
/// each time so executors keep polling.
pub async fn ready_after<T>(polls: usize, value: T) -> T {
    let mut remaining = polls;
    future::poll_fn(|cx| {
        if remaining == 0 {
            Poll::Ready(())
        } else {
            remaining -= 1;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    })
    .await;

    value
}

#[must_use]
pub const fn acct(n: u8) -> AccountId {
    AccountId::new([n; 32])
}

#[must_use]
pub fn stash_of(pool_id: PoolId) -> AccountId {
    PoolAccounts::derive(PalletId::default(), pool_id).stash
}

#[must_use]
pub const fn pool(state: PoolState, root: Option<AccountId>, member_counter: u32) -> BondedPool {
    BondedPool {
        state,
        member_counter,
        roles: PoolRoles {
            depositor: root,
            root,
            nominator: root,
            state_toggler: root,
        },
    }
}

// -----------------------------------------------------------------------------
// StubChain
// -----------------------------------------------------------------------------

///
/// StubChain
///

#[derive(Default)]
pub struct StubChain {
    pub era: EraIndex,
    pub fail_era: bool,
    pub fail_count: bool,
    pub pools: HashMap<PoolId, BondedPool>,
    pub pool_count: Option<u32>,
    pub identities: HashMap<AccountId, Identity>,
    pub exposures: HashMap<(EraIndex, AccountId), Exposure>,
    pub nominations: HashMap<AccountId, Nominations>,
    pub stalled_pools: HashSet<PoolId>,
    pub failing_pools: HashSet<PoolId>,
    pub failing_identities: HashSet<AccountId>,

    pub era_calls: AtomicUsize,
    pub pool_calls: AtomicUsize,
    pub identity_calls: AtomicUsize,
    pub stake_calls: AtomicUsize,
    pub nomination_calls: AtomicUsize,
}

impl StubChain {
    #[must_use]
    pub fn new(era: EraIndex) -> Self {
        Self {
            era,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_pool(mut self, pool_id: PoolId, pool: BondedPool) -> Self {
        self.pools.insert(pool_id, pool);
        self
    }

    #[must_use]
    pub fn with_identity(mut self, account: AccountId, display: &str) -> Self {
        self.identities.insert(account, Identity::named(display));
        self
    }

    #[must_use]
    pub fn with_stake(mut self, era: EraIndex, account: AccountId, own: u128) -> Self {
        self.exposures.insert(
            (era, account),
            Exposure {
                own: Balance(own),
                total: Balance(own),
            },
        );
        self
    }

    #[must_use]
    pub fn with_targets(mut self, nominator: AccountId, targets: Vec<AccountId>) -> Self {
        self.nominations.insert(
            nominator,
            Nominations {
                targets,
                submitted_in: self.era,
            },
        );
        self
    }

    /// Open pool whose root is verified and staked, nominating `validators`
    /// that each carry a unique display name.
    #[must_use]
    pub fn with_passing_pool(self, pool_id: PoolId, root: AccountId, validators: &[u8]) -> Self {
        let era = self.era;
        let targets: Vec<AccountId> = validators.iter().copied().map(acct).collect();
        let mut chain = self
            .with_pool(pool_id, pool(PoolState::Open, Some(root), 3))
            .with_identity(root, &format!("root-{pool_id}"))
            .with_stake(era, root, 1_000)
            .with_targets(stash_of(pool_id), targets);

        for v in validators {
            chain = chain.with_identity(acct(*v), &format!("validator-{v}"));
        }

        chain
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainSource for StubChain {
    async fn active_era(&self) -> Result<EraIndex, SourceError> {
        self.era_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_era {
            return Err(SourceError::call("active_era", "stub failure"));
        }

        Ok(self.era)
    }

    async fn pool_count(&self) -> Result<u32, SourceError> {
        if self.fail_count {
            return Err(SourceError::call("pool_count", "stub failure"));
        }

        let highest = self.pools.keys().copied().max().unwrap_or(0);
        Ok(self.pool_count.unwrap_or(highest))
    }

    async fn bonded_pool(&self, pool_id: PoolId) -> Result<Option<BondedPool>, SourceError> {
        self.pool_calls.fetch_add(1, Ordering::SeqCst);
        if self.stalled_pools.contains(&pool_id) {
            future::pending::<()>().await;
        }
        if self.failing_pools.contains(&pool_id) {
            return Err(SourceError::call("bonded_pool", "stub failure"));
        }

        Ok(self.pools.get(&pool_id).copied())
    }

    async fn identity_of(&self, account: &AccountId) -> Result<Option<Identity>, SourceError> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_identities.contains(account) {
            return Err(SourceError::call("identity_of", "stub failure"));
        }

        Ok(self.identities.get(account).cloned())
    }

    async fn eras_stakers(
        &self,
        era: EraIndex,
        account: &AccountId,
    ) -> Result<Option<Exposure>, SourceError> {
        self.stake_calls.fetch_add(1, Ordering::SeqCst);

        Ok(self.exposures.get(&(era, *account)).copied())
    }

    async fn nominations(&self, account: &AccountId) -> Result<Option<Nominations>, SourceError> {
        self.nomination_calls.fetch_add(1, Ordering::SeqCst);

        Ok(self.nominations.get(account).cloned())
    }
}

// -----------------------------------------------------------------------------
// CountingSelector
// -----------------------------------------------------------------------------

///
/// CountingSelector
/// Accepts every validator not listed in `rejected`; counts invocations.
///

#[derive(Default)]
pub struct CountingSelector {
    pub rejected: HashSet<AccountId>,
    pub failing: HashSet<AccountId>,
    pub calls: AtomicUsize,
}

impl CountingSelector {
    #[must_use]
    pub fn rejecting(accounts: &[AccountId]) -> Self {
        Self {
            rejected: accounts.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ValidatorSelector for CountingSelector {
    async fn meets_criteria(&self, validator: &AccountId) -> Result<bool, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(validator) {
            return Err(SourceError::call("meets_criteria", "stub failure"));
        }

        Ok(!self.rejected.contains(validator))
    }
}
