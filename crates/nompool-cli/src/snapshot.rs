//! JSON chain snapshot.
//!
//! A frozen view of the staking chain at one era, used to run the selection
//! pipeline offline. It answers both the chain reads and the validator
//! eligibility oracle.

use crate::error::CliError;
use async_trait::async_trait;
use nompool_core::{
    domain::BondedPool,
    interface::{ChainSource, Exposure, Identity, Nominations, SourceError, ValidatorSelector},
    types::{AccountId, EraIndex, PoolId},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::Path,
};

///
/// Snapshot
///
/// `pool_count` defaults to the highest pool id present. Exposures are only
/// answered for `era`. When `eligible_validators` is absent every validator
/// is accepted.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Snapshot {
    pub era: EraIndex,
    pub pool_count: Option<u32>,
    pub pools: BTreeMap<PoolId, BondedPool>,
    pub identities: BTreeMap<AccountId, Identity>,
    pub exposures: BTreeMap<AccountId, Exposure>,
    pub nominations: BTreeMap<AccountId, Nominations>,
    pub eligible_validators: Option<BTreeSet<AccountId>>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self, CliError> {
        serde_json::from_str(json).map_err(|err| CliError::SnapshotParse(err.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| CliError::SnapshotRead {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

        Self::from_json(&text)
    }
}

#[async_trait]
impl ChainSource for Snapshot {
    async fn active_era(&self) -> Result<EraIndex, SourceError> {
        Ok(self.era)
    }

    async fn pool_count(&self) -> Result<u32, SourceError> {
        let highest = self.pools.keys().next_back().copied().unwrap_or(0);

        Ok(self.pool_count.unwrap_or(highest))
    }

    async fn bonded_pool(&self, pool_id: PoolId) -> Result<Option<BondedPool>, SourceError> {
        Ok(self.pools.get(&pool_id).copied())
    }

    async fn identity_of(&self, account: &AccountId) -> Result<Option<Identity>, SourceError> {
        Ok(self.identities.get(account).cloned())
    }

    async fn eras_stakers(
        &self,
        era: EraIndex,
        account: &AccountId,
    ) -> Result<Option<Exposure>, SourceError> {
        if era != self.era {
            return Ok(None);
        }

        Ok(self.exposures.get(account).copied())
    }

    async fn nominations(&self, account: &AccountId) -> Result<Option<Nominations>, SourceError> {
        Ok(self.nominations.get(account).cloned())
    }
}

#[async_trait]
impl ValidatorSelector for Snapshot {
    async fn meets_criteria(&self, validator: &AccountId) -> Result<bool, SourceError> {
        Ok(self
            .eligible_validators
            .as_ref()
            .is_none_or(|eligible| eligible.contains(validator)))
    }
}

///
/// TESTS
///
