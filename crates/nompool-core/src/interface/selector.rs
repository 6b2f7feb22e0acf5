use crate::{interface::SourceError, types::AccountId};
use async_trait::async_trait;

///
/// ValidatorSelector
///
/// External validator-eligibility oracle.
///
/// Contract:
/// - May perform I/O.
/// - Must be side-effect free and idempotent.
/// - An `Err` is treated exactly like `Ok(false)` by the qualifier.
///

#[async_trait]
pub trait ValidatorSelector: Send + Sync {
    async fn meets_criteria(&self, validator: &AccountId) -> Result<bool, SourceError>;
}
