use super::{ConfigSchemaError, Validate};
use crate::log::{self, Level};
use serde::{Deserialize, Serialize};

///
/// Defaults
///

mod defaults {
    use crate::log::Level;

    pub const fn level() -> Level {
        Level::Info
    }
}

///
/// LogConfig
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "defaults::level")]
    pub level: Level,
}

impl LogConfig {
    /// Install this config's minimum level process-wide.
    pub fn apply(&self) {
        log::set_min_level(self.level);
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: defaults::level(),
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> Result<(), ConfigSchemaError> {
        Ok(())
    }
}
