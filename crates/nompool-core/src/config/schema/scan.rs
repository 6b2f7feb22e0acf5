use super::{ConfigSchemaError, Validate};
use crate::domain::PalletId;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

///
/// ScanConfig
///
/// How a scan walks the candidate range. `max_in_flight = None` launches
/// every qualification at once, which assumes the RPC endpoint tolerates
/// full fan-out.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    #[serde(default)]
    pub pallet_id: PalletId,

    /// Fixed seed for a reproducible scan order.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub max_in_flight: Option<NonZeroUsize>,
}

impl Validate for ScanConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        // pallet id length and a non-zero cap are enforced while parsing
        Ok(())
    }
}
