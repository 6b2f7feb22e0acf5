//! Pool-owned account derivation.
//!
//! Nomination pools do not hold keys; their stash and reward accounts are
//! derived from the pallet id and the pool id. The layout is
//! `b"modl" ++ pallet_id ++ [account_type] ++ pool_id.to_le_bytes()`,
//! zero padded to the 32-byte account size.

use crate::types::{ACCOUNT_ID_LEN, AccountId, PoolId};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const MODULE_PREFIX: &[u8; 4] = b"modl";
pub const PALLET_ID_LEN: usize = 8;

///
/// PalletId
///

#[derive(Clone, Copy, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct PalletId(pub [u8; PALLET_ID_LEN]);

impl PalletId {
    /// Nomination pools pallet id on Polkadot and Kusama.
    pub const NOMINATION_POOLS: Self = Self(*b"py/nopls");

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; PALLET_ID_LEN] {
        &self.0
    }
}

impl Default for PalletId {
    fn default() -> Self {
        Self::NOMINATION_POOLS
    }
}

impl fmt::Display for PalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for PalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PalletId({self})")
    }
}

impl FromStr for PalletId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; PALLET_ID_LEN] = s.as_bytes().try_into().map_err(|_| {
            format!(
                "pallet id '{s}' must be exactly {PALLET_ID_LEN} bytes, got {}",
                s.len()
            )
        })?;

        Ok(Self(bytes))
    }
}

impl TryFrom<String> for PalletId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PalletId> for String {
    fn from(id: PalletId) -> Self {
        id.to_string()
    }
}

///
/// PoolAccountType
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum PoolAccountType {
    Bonded = 0,
    Reward = 1,
}

/// Derive one pool-owned account. Pure; no remote call.
#[must_use]
pub fn derive_pool_account(
    pallet_id: PalletId,
    account_type: PoolAccountType,
    pool_id: PoolId,
) -> AccountId {
    let mut bytes = [0u8; ACCOUNT_ID_LEN];
    let (prefix, rest) = bytes.split_at_mut(MODULE_PREFIX.len());
    prefix.copy_from_slice(MODULE_PREFIX);
    let (pallet, rest) = rest.split_at_mut(PALLET_ID_LEN);
    pallet.copy_from_slice(pallet_id.as_bytes());
    let (kind, rest) = rest.split_at_mut(1);
    kind[0] = account_type as u8;
    rest[..4].copy_from_slice(&pool_id.to_le_bytes());

    AccountId::new(bytes)
}

///
/// PoolAccounts
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PoolAccounts {
    pub stash: AccountId,
    pub reward: AccountId,
}

impl PoolAccounts {
    #[must_use]
    pub fn derive(pallet_id: PalletId, pool_id: PoolId) -> Self {
        Self {
            stash: derive_pool_account(pallet_id, PoolAccountType::Bonded, pool_id),
            reward: derive_pool_account(pallet_id, PoolAccountType::Reward, pool_id),
        }
    }
}

///
/// TESTS
///
