use nompool_utils::format::{hex_prefixed, short_hex};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

pub const ACCOUNT_ID_LEN: usize = 32;

///
/// AccountIdError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum AccountIdError {
    #[error("account id is not valid hex: {0}")]
    InvalidHex(String),

    #[error("account id must be {ACCOUNT_ID_LEN} bytes, got {0}")]
    InvalidLength(usize),
}

///
/// AccountId
///
/// Raw 32-byte chain account. Rendered as `0x`-prefixed hex; address
/// encodings such as SS58 belong to the RPC client.
///

#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId([u8; ACCOUNT_ID_LEN]);

impl AccountId {
    #[must_use]
    pub const fn new(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0; ACCOUNT_ID_LEN]
    }

    /// Compact form for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        short_hex(&self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex_prefixed(&self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.short())
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|err| AccountIdError::InvalidHex(err.to_string()))?;
        let bytes: [u8; ACCOUNT_ID_LEN] = bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| AccountIdError::InvalidLength(bytes.len()))?;

        Ok(Self(bytes))
    }
}

impl TryFrom<String> for AccountId {
    type Error = AccountIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.to_string()
    }
}

impl From<[u8; ACCOUNT_ID_LEN]> for AccountId {
    fn from(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }
}

///
/// TESTS
///
