mod account;
mod balance;

pub use account::*;
pub use balance::*;

/// Ordinal pool identifier, densely assigned from 1.
pub type PoolId = u32;

/// Staking era index.
pub type EraIndex = u32;
