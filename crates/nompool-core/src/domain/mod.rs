//! Domain types: pool metadata, decision records, and the pure derivation
//! of pool-owned accounts.

pub mod account;
pub mod pool;

pub use account::{PalletId, PoolAccountType, PoolAccounts, derive_pool_account};
pub use pool::{BondedPool, PoolRecord, PoolRoles, PoolState};
