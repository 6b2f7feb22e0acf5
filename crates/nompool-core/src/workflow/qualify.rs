//! Single-candidate qualification.
//!
//! A qualifier reads one pool's metadata, derives its accounts, and runs the
//! enabled checks through [`every`] so the first failing check settles the
//! decision. Checks that are switched off are never started.

use crate::{
    Error,
    combinator::every,
    domain::{BondedPool, PalletId, PoolAccounts, PoolRecord},
    interface::{ChainSource, SourceError, ValidatorSelector},
    log,
    log::Topic,
    policy::{
        Policy,
        rules::{self, DisplayNameSet},
    },
    types::{AccountId, EraIndex, PoolId},
};
use futures::{TryFutureExt, future};
use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, OnceLock},
};

type CheckFuture<'a> = Pin<Box<dyn Future<Output = Result<bool, SourceError>> + Send + 'a>>;

///
/// PoolQualifier
///
/// Holds the collaborators and the policy. The era is resolved on first use
/// and then fixed for the lifetime of the instance; to evaluate another era
/// build a new qualifier with that era in its policy.
///

pub struct PoolQualifier {
    source: Arc<dyn ChainSource>,
    selector: Arc<dyn ValidatorSelector>,
    policy: Policy,
    pallet_id: PalletId,
    era: OnceLock<EraIndex>,
}

impl PoolQualifier {
    #[must_use]
    pub fn new(
        source: Arc<dyn ChainSource>,
        selector: Arc<dyn ValidatorSelector>,
        policy: Policy,
    ) -> Self {
        Self {
            source,
            selector,
            policy,
            pallet_id: PalletId::default(),
            era: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn with_pallet_id(mut self, pallet_id: PalletId) -> Self {
        self.pallet_id = pallet_id;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> &Policy {
        &self.policy
    }

    #[must_use]
    pub const fn pallet_id(&self) -> PalletId {
        self.pallet_id
    }

    #[must_use]
    pub fn source(&self) -> &dyn ChainSource {
        self.source.as_ref()
    }

    /// Era fixed for this instance, if it has been resolved yet.
    #[must_use]
    pub fn era(&self) -> Option<EraIndex> {
        self.era.get().copied()
    }

    /// Resolve the era once.
    ///
    /// A non-zero policy era is taken as is; zero asks the chain for the
    /// active era. Concurrent first calls may each query the chain, but only
    /// one answer is stored and every caller gets that one.
    pub async fn resolve_era(&self) -> Result<EraIndex, Error> {
        if let Some(era) = self.era.get() {
            return Ok(*era);
        }

        let era = if self.policy.era == 0 {
            self.source.active_era().await.map_err(Error::Era)?
        } else {
            self.policy.era
        };

        let era = *self.era.get_or_init(|| era);
        log!(Topic::Era, Debug, "checking pools at era {era}");

        Ok(era)
    }

    /// Produce the decision record for one pool.
    ///
    /// Errors only when the era cannot be resolved or the pool metadata
    /// cannot be read. A deleted pool is a failing record, not an error.
    pub async fn qualify(&self, pool_id: PoolId) -> Result<PoolRecord, Error> {
        let era = self.resolve_era().await?;

        let Some(pool) = self
            .source
            .bonded_pool(pool_id)
            .await
            .map_err(|source| Error::BondedPool { pool_id, source })?
        else {
            log!(Topic::Qualify, Debug, "pool {pool_id}: not found");
            return Ok(PoolRecord::missing(pool_id, era));
        };

        let accounts = PoolAccounts::derive(self.pallet_id, pool_id);
        let pass = if pool.state.is_open() {
            self.meets_criteria(pool_id, &pool, &accounts, era).await
        } else {
            log!(Topic::Qualify, Debug, "pool {pool_id}: state {}", pool.state);
            false
        };

        log!(Topic::Qualify, Debug, "pool {pool_id}: pass={pass}");

        Ok(PoolRecord {
            pool_id,
            era,
            stash_account: accounts.stash,
            reward_account: accounts.reward,
            roles: pool.roles,
            state: pool.state,
            member_count: pool.member_counter,
            pass,
        })
    }

    // -------------------------------------------------------------------------
    // Checks
    // -------------------------------------------------------------------------

    async fn meets_criteria(
        &self,
        pool_id: PoolId,
        pool: &BondedPool,
        accounts: &PoolAccounts,
        era: EraIndex,
    ) -> bool {
        let root = pool.roles.root;
        let mut checks: Vec<CheckFuture<'_>> = Vec::new();

        if let Some(capacity) = &self.policy.member_capacity {
            let has_room = rules::has_free_spots(capacity, pool.member_counter);
            checks.push(Box::pin(future::ready(Ok::<_, SourceError>(has_room))));
        }
        if self.policy.check_root_verified {
            checks.push(check(
                "root_verified",
                pool_id,
                self.root_is_verified(root),
            ));
        }
        if self.policy.checks_root_stake() {
            checks.push(check(
                "root_stake",
                pool_id,
                self.root_meets_stake(root, era),
            ));
        }
        if self.policy.checks_validator_set() {
            checks.push(check(
                "validators",
                pool_id,
                self.validators_meet_criteria(pool_id, accounts.stash),
            ));
        }

        every(checks, |passed| *passed).await
    }

    async fn root_is_verified(&self, root: Option<AccountId>) -> Result<bool, SourceError> {
        let Some(root) = root else {
            return Ok(false);
        };

        Ok(self.source.identity_of(&root).await?.is_some())
    }

    async fn root_meets_stake(
        &self,
        root: Option<AccountId>,
        era: EraIndex,
    ) -> Result<bool, SourceError> {
        let Some(root) = root else {
            return Ok(false);
        };

        let own = self
            .source
            .eras_stakers(era, &root)
            .await?
            .map(|exposure| exposure.own)
            .unwrap_or_default();

        Ok(rules::meets_min_stake(own, self.policy.root_min_stake))
    }

    /// Validator-set checks against the pool's nomination targets. The size
    /// check is synchronous; distinctness and eligibility race each other.
    async fn validators_meet_criteria(
        &self,
        pool_id: PoolId,
        stash: AccountId,
    ) -> Result<bool, SourceError> {
        let targets = self
            .source
            .nominations(&stash)
            .await?
            .map(|nominations| nominations.targets)
            .unwrap_or_default();

        if targets.len() < self.policy.min_validators {
            log!(
                Topic::Qualify,
                Debug,
                "pool {pool_id}: {} validators, need {}",
                targets.len(),
                self.policy.min_validators
            );
            return Ok(false);
        }

        let mut checks: Vec<CheckFuture<'_>> = Vec::new();
        if self.policy.check_duplicate_validators {
            checks.push(check(
                "distinct_validators",
                pool_id,
                self.validators_are_distinct(pool_id, &targets),
            ));
        }
        if self.policy.check_validators {
            checks.push(check(
                "eligible_validators",
                pool_id,
                self.validators_are_eligible(pool_id, &targets),
            ));
        }

        Ok(every(checks, |passed| *passed).await)
    }

    async fn validators_are_distinct(
        &self,
        pool_id: PoolId,
        targets: &[AccountId],
    ) -> Result<bool, SourceError> {
        let mut names = DisplayNameSet::new();
        let lookups = targets.iter().map(|validator| {
            self.source
                .identity_of(validator)
                .inspect_err(move |err| log_lookup_failure(pool_id, validator, err))
        });

        Ok(every(lookups, |identity| names.admit(identity.as_ref())).await)
    }

    async fn validators_are_eligible(
        &self,
        pool_id: PoolId,
        targets: &[AccountId],
    ) -> Result<bool, SourceError> {
        let verdicts = targets.iter().map(|validator| {
            self.selector
                .meets_criteria(validator)
                .inspect_err(move |err| log_lookup_failure(pool_id, validator, err))
        });

        Ok(every(verdicts, |eligible| *eligible).await)
    }
}

/// Box a check and log the remote failure that makes it count as failed.
fn check<'a>(
    name: &'static str,
    pool_id: PoolId,
    fut: impl Future<Output = Result<bool, SourceError>> + Send + 'a,
) -> CheckFuture<'a> {
    Box::pin(fut.inspect_err(move |err| {
        log!(
            Topic::Source,
            Warn,
            "pool {pool_id}: check {name} failed remotely: {err}"
        );
    }))
}

fn log_lookup_failure(pool_id: PoolId, validator: &AccountId, err: &SourceError) {
    log!(
        Topic::Source,
        Warn,
        "pool {pool_id}: lookup for validator {} failed: {err}",
        validator.short()
    );
}

///
/// TESTS
///
