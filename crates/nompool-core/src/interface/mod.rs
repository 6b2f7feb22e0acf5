//! Collaborator seams.
//!
//! The qualification pipeline only ever talks to the chain and to the
//! validator oracle through these traits. Implementations own transport,
//! decoding, retries and timeouts.

mod selector;

pub use selector::ValidatorSelector;

use crate::{
    domain::BondedPool,
    types::{AccountId, Balance, EraIndex, PoolId},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// SourceError
///
/// Failure reported by a collaborator. The core never retries.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SourceError {
    #[error("remote call '{call}' failed: {message}")]
    Call { call: &'static str, message: String },

    #[error("remote call '{call}' returned malformed data: {message}")]
    Decode { call: &'static str, message: String },
}

impl SourceError {
    pub fn call(call: &'static str, message: impl Into<String>) -> Self {
        Self::Call {
            call,
            message: message.into(),
        }
    }

    pub fn decode(call: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            call,
            message: message.into(),
        }
    }
}

///
/// Identity
///
/// On-chain identity registration. `display` is `None` when the record
/// exists but carries no display name.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Identity {
    pub display: Option<String>,
}

impl Identity {
    #[must_use]
    pub fn named(display: impl Into<String>) -> Self {
        Self {
            display: Some(display.into()),
        }
    }
}

///
/// Exposure
///
/// Era-indexed stake exposure of an account.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Exposure {
    pub own: Balance,
    pub total: Balance,
}

///
/// Nominations
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Nominations {
    pub targets: Vec<AccountId>,
    pub submitted_in: EraIndex,
}

///
/// ChainSource
///
/// Typed read access to the staking chain. Absent storage is `Ok(None)`,
/// never an error.
///

#[async_trait]
pub trait ChainSource: Send + Sync {
    async fn active_era(&self) -> Result<EraIndex, SourceError>;

    /// Number of pool identifiers ever assigned (ids run `1..=count`).
    async fn pool_count(&self) -> Result<u32, SourceError>;

    async fn bonded_pool(&self, pool_id: PoolId) -> Result<Option<BondedPool>, SourceError>;

    async fn identity_of(&self, account: &AccountId) -> Result<Option<Identity>, SourceError>;

    async fn eras_stakers(
        &self,
        era: EraIndex,
        account: &AccountId,
    ) -> Result<Option<Exposure>, SourceError>;

    async fn nominations(&self, account: &AccountId) -> Result<Option<Nominations>, SourceError>;
}
