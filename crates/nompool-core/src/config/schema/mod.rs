mod log;
mod scan;

pub use log::*;
pub use scan::*;

use crate::policy::{MemberCapacity, Policy};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigSchemaError
///

#[derive(Debug, ThisError)]
pub enum ConfigSchemaError {
    #[error("validation error: {0}")]
    ValidationError(String),
}

///
/// Validate
///

pub trait Validate {
    fn validate(&self) -> Result<(), ConfigSchemaError>;
}

///
/// ConfigModel
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigModel {
    #[serde(default)]
    pub policy: Policy,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Validate for ConfigModel {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        self.policy.validate()?;
        self.scan.validate()?;
        self.log.validate()?;

        Ok(())
    }
}

impl Validate for Policy {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        if self.desired_pools == 0 {
            return Err(ConfigSchemaError::ValidationError(
                "policy.desired_pools must be at least 1".into(),
            ));
        }

        if let Some(capacity) = &self.member_capacity {
            capacity.validate()?;
        }

        Ok(())
    }
}

impl Validate for MemberCapacity {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        if self.min_free_spots > self.max_members {
            return Err(ConfigSchemaError::ValidationError(format!(
                "policy.member_capacity.min_free_spots {} exceeds max_members {}",
                self.min_free_spots, self.max_members
            )));
        }

        Ok(())
    }
}
