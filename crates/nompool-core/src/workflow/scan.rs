//! Candidate scan.
//!
//! Walks the whole pool id range in a random order so that early-created
//! pools get no advantage, qualifies every candidate concurrently, and stops
//! as soon as enough pools pass.

use crate::{
    Error,
    combinator::{filter, filter_buffered},
    config::schema::ScanConfig,
    domain::PoolRecord,
    interface::{ChainSource, ValidatorSelector},
    log,
    log::Topic,
    policy::Policy,
    types::PoolId,
    workflow::qualify::PoolQualifier,
};
use futures::TryFutureExt;
use nompool_utils::rand;
use std::sync::Arc;

///
/// PoolScanner
///

pub struct PoolScanner {
    qualifier: PoolQualifier,
    config: ScanConfig,
}

impl PoolScanner {
    #[must_use]
    pub fn new(
        source: Arc<dyn ChainSource>,
        selector: Arc<dyn ValidatorSelector>,
        policy: Policy,
        config: ScanConfig,
    ) -> Self {
        let qualifier =
            PoolQualifier::new(source, selector, policy).with_pallet_id(config.pallet_id);

        Self { qualifier, config }
    }

    #[must_use]
    pub const fn qualifier(&self) -> &PoolQualifier {
        &self.qualifier
    }

    /// Find up to `policy.desired_pools` passing pools.
    ///
    /// Records come back in completion order. Only a failure to resolve the
    /// era, read the pool count or seed the scan order aborts the scan; a
    /// candidate that errors is skipped. Finding nothing is `Ok(vec![])`.
    pub async fn scan(&self) -> Result<Vec<PoolRecord>, Error> {
        let era = self.qualifier.resolve_era().await?;
        let count = self
            .qualifier
            .source()
            .pool_count()
            .await
            .map_err(Error::PoolCount)?;
        let desired = self.qualifier.policy().desired_pools;

        let (order, tag) = self.scan_order(count)?;
        log!(
            Topic::Scan,
            Info,
            "scan {tag}: {count} pools at era {era}, want {desired}"
        );

        let qualifier = &self.qualifier;
        let tag = tag.as_str();
        let candidates = order.into_iter().map(|pool_id| {
            qualifier
                .qualify(pool_id)
                .inspect_err(move |err| {
                    log!(Topic::Scan, Warn, "scan {tag}: pool {pool_id} skipped: {err}");
                })
        });
        let passed = |record: &PoolRecord| record.pass;

        let matches = match self.config.max_in_flight {
            Some(cap) => filter_buffered(candidates, passed, Some(desired), cap).await,
            None => filter(candidates, passed, Some(desired)).await,
        };

        log!(
            Topic::Scan,
            Ok,
            "scan {tag}: found {}/{desired} pools: {:?}",
            matches.len(),
            matches.iter().map(|r| r.pool_id).collect::<Vec<_>>()
        );

        Ok(matches)
    }

    /// Random visiting order plus a short hex tag for this scan's log lines.
    fn scan_order(&self, count: u32) -> Result<(Vec<PoolId>, String), Error> {
        let mut rng = match self.config.seed {
            Some(seed) => rand::rng_from_seed(seed),
            None => rand::rng_from_time()?,
        };
        let order = rand::permutation(&mut rng, count);

        Ok((order, rand::random_hex(&mut rng, 4)))
    }
}

///
/// TESTS
///
