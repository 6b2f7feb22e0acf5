use crate::{config::ConfigError, interface::SourceError, types::PoolId};
use nompool_utils::rand::RngError;
use thiserror::Error as ThisError;

///
/// Error
///
/// Failures that abort a qualify or scan call. Remote failures inside an
/// individual check never surface here; they only fail that check.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("cannot resolve active era: {0}")]
    Era(#[source] SourceError),

    #[error("cannot read pool count: {0}")]
    PoolCount(#[source] SourceError),

    #[error("cannot read bonded pool {pool_id}: {source}")]
    BondedPool {
        pool_id: PoolId,
        #[source]
        source: SourceError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot seed scan order: {0}")]
    Rng(#[from] RngError),
}
