use crate::{interface::Identity, policy::MemberCapacity, types::Balance};
use std::collections::HashSet;

/// Root stake requirement: own stake at the era must reach the minimum.
#[must_use]
pub fn meets_min_stake(own: Balance, min: Balance) -> bool {
    own >= min
}

/// Capacity requirement: at least `min_free_spots` open member slots.
#[must_use]
pub const fn has_free_spots(capacity: &MemberCapacity, member_count: u32) -> bool {
    capacity.max_members.saturating_sub(member_count) >= capacity.min_free_spots
}

/// Key used to compare identity display names: trimmed and lowercased.
/// Blank names have no key.
#[must_use]
pub fn display_name_key(display: &str) -> Option<String> {
    let trimmed = display.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

///
/// DisplayNameSet
///
/// Duplicate tracker for one validator set, built per qualification and
/// dropped afterwards.
///

#[derive(Debug, Default)]
pub struct DisplayNameSet {
    seen: HashSet<String>,
}

impl DisplayNameSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit one validator identity.
    ///
    /// Returns `false` when the name was already seen, and also when there
    /// is no usable name, since an unverifiable validator may be a duplicate.
    pub fn admit(&mut self, identity: Option<&Identity>) -> bool {
        identity
            .and_then(|identity| identity.display.as_deref())
            .and_then(display_name_key)
            .is_some_and(|key| self.seen.insert(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

///
/// TESTS
///
