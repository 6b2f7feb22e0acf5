//! Nomination pool selection.
//!
//! Picks pools worth joining on a Substrate staking chain: every candidate
//! pool is checked against a [`policy::Policy`] using concurrent reads from a
//! [`interface::ChainSource`], and checks short-circuit as soon as their
//! outcome is settled.
//!
//! ## Layering
//!
//! - `combinator` holds the async `every` / `some` / `filter` helpers.
//! - `workflow/` drives qualification of one pool and the randomized scan.
//! - `policy/` owns the thresholds and pure decision rules.
//! - `interface/` is the seam to the chain and the validator oracle.
//! - `domain/` and `types/` hold pool records, accounts and balances.
//!
//! The default flow is: workflow → policy → interface.

pub mod combinator;
pub mod config;
pub mod domain;
pub mod error;
pub mod interface;
pub mod log;
pub mod policy;
#[cfg(test)]
pub mod test;
pub mod types;
pub mod workflow;

pub use {
    ::nompool_utils as utils,
    error::Error,
    workflow::{PoolQualifier, PoolScanner},
};

///
/// Crate Version
///

pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
