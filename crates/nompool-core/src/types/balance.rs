use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

///
/// Balance
///
/// On-chain token amount in plancks. Serialized as a decimal string so that
/// values above `i64::MAX` survive TOML and JSON; integers are accepted on
/// input as well.
///

#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize,
)]
#[serde(try_from = "BalanceRepr", into = "String")]
pub struct Balance(pub u128);

impl Balance {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(amount: u128) -> Self {
        Self(amount)
    }

    #[must_use]
    pub const fn get(self) -> u128 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl FromStr for Balance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s.trim().chars().filter(|c| *c != '_').collect();
        cleaned
            .parse::<u128>()
            .map(Self)
            .map_err(|err| format!("invalid balance '{s}': {err}"))
    }
}

impl From<u128> for Balance {
    fn from(amount: u128) -> Self {
        Self(amount)
    }
}

impl From<Balance> for String {
    fn from(balance: Balance) -> Self {
        balance.0.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BalanceRepr {
    Int(u64),
    Text(String),
}

impl TryFrom<BalanceRepr> for Balance {
    type Error = String;

    fn try_from(repr: BalanceRepr) -> Result<Self, Self::Error> {
        match repr {
            BalanceRepr::Int(amount) => Ok(Self(u128::from(amount))),
            BalanceRepr::Text(text) => text.parse(),
        }
    }
}

///
/// TESTS
///
