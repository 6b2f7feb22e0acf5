//! Selection policy and its deterministic decision rules.
//!
//! Everything here is pure: no remote calls, no logging. The qualifier
//! gathers chain data and asks these rules for verdicts.

pub mod rules;

use crate::types::{Balance, EraIndex};
use serde::{Deserialize, Serialize};

///
/// Defaults
///

mod defaults {
    pub const fn desired_pools() -> usize {
        1
    }

    pub const fn min_validators() -> usize {
        1
    }
}

///
/// Policy
///
/// Immutable selection criteria. A zero threshold disables the check it
/// guards, so an all-default policy with the toggles off accepts any open
/// pool that nominates at least one validator.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Policy {
    /// Minimum own stake of the root account at the checked era.
    #[serde(default)]
    pub root_min_stake: Balance,

    /// Number of passing pools a scan should return.
    #[serde(default = "defaults::desired_pools")]
    pub desired_pools: usize,

    /// Minimum number of nominated validators.
    #[serde(default = "defaults::min_validators")]
    pub min_validators: usize,

    /// Era to check; 0 resolves to the active era on first use.
    #[serde(default)]
    pub era: EraIndex,

    #[serde(default)]
    pub check_root_verified: bool,

    /// Fails closed: a validator without a display name counts as a
    /// possible duplicate.
    #[serde(default)]
    pub check_duplicate_validators: bool,

    #[serde(default)]
    pub check_validators: bool,

    #[serde(default)]
    pub member_capacity: Option<MemberCapacity>,
}

impl Policy {
    /// Policy that enables no check at all.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            min_validators: 0,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn checks_root_stake(&self) -> bool {
        !self.root_min_stake.is_zero()
    }

    /// Whether the nomination targets have to be fetched at all.
    #[must_use]
    pub const fn checks_validator_set(&self) -> bool {
        self.min_validators > 0 || self.check_duplicate_validators || self.check_validators
    }

    /// Copy of this policy pinned to `era`.
    #[must_use]
    pub fn at_era(&self, era: EraIndex) -> Self {
        Self {
            era,
            ..self.clone()
        }
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            root_min_stake: Balance::ZERO,
            desired_pools: defaults::desired_pools(),
            min_validators: defaults::min_validators(),
            era: 0,
            check_root_verified: false,
            check_duplicate_validators: false,
            check_validators: false,
            member_capacity: None,
        }
    }
}

///
/// MemberCapacity
///
/// Optional check that a pool still has room for new members.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemberCapacity {
    pub max_members: u32,
    pub min_free_spots: u32,
}

///
/// TESTS
///
