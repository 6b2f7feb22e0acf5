pub mod schema;

use crate::{log, log::Topic};
use schema::{ConfigSchemaError, Validate};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

pub use schema::ConfigModel;

/// Errors related to loading and parsing configuration.
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {message}")]
    CannotRead { path: String, message: String },

    /// TOML could not be parsed into the expected structure.
    #[error("toml error: {0}")]
    CannotParseToml(String),

    #[error("toml error: {0}")]
    CannotRenderToml(String),

    /// Wrapper for data schema-level errors.
    #[error(transparent)]
    ConfigSchema(#[from] ConfigSchemaError),
}

///
/// Config
///

pub struct Config;

impl Config {
    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(config_str: &str) -> Result<ConfigModel, ConfigError> {
        let config: ConfigModel =
            toml::from_str(config_str).map_err(|e| ConfigError::CannotParseToml(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<ConfigModel, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| ConfigError::CannotRead {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;

        let config = Self::from_toml(&text)?;
        log!(Topic::Config, Info, "loaded config from {}", path.display());

        Ok(config)
    }

    /// Render a configuration back to TOML.
    pub fn to_toml(config: &ConfigModel) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|err| ConfigError::CannotRenderToml(err.to_string()))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::PalletId, log::Level, types::Balance};

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").expect("empty config is valid");

        assert_eq!(config.policy.desired_pools, 1);
        assert_eq!(config.policy.min_validators, 1);
        assert_eq!(config.scan.pallet_id, PalletId::NOMINATION_POOLS);
        assert_eq!(config.log.level, Level::Info);
    }

    #[test]
    fn parses_full_config() {
        let toml = r#"
            [policy]
            root_min_stake = "5000000000000000000000"
            desired_pools = 3
            min_validators = 4
            era = 1200
            check_root_verified = true
            check_duplicate_validators = true
            check_validators = true
            member_capacity = { max_members = 1024, min_free_spots = 8 }

            [scan]
            pallet_id = "py/nopls"
            seed = 42
            max_in_flight = 16

            [log]
            level = "Warn"
        "#;

        let config = Config::from_toml(toml).expect("valid config");

        assert_eq!(
            config.policy.root_min_stake,
            Balance(5_000_000_000_000_000_000_000)
        );
        assert_eq!(config.policy.desired_pools, 3);
        assert_eq!(config.policy.era, 1200);
        assert!(config.policy.check_duplicate_validators);
        assert_eq!(
            config.policy.member_capacity.map(|c| c.min_free_spots),
            Some(8)
        );
        assert_eq!(config.scan.seed, Some(42));
        assert_eq!(config.scan.max_in_flight.map(|n| n.get()), Some(16));
        assert_eq!(config.log.level, Level::Warn);
    }

    #[test]
    fn accepts_integer_stake() {
        let config = Config::from_toml("[policy]\nroot_min_stake = 100\n").expect("valid");
        assert_eq!(config.policy.root_min_stake, Balance(100));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = Config::from_toml("[policy]\nmin_stake = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::CannotParseToml(_)));
    }

    #[test]
    fn rejects_zero_desired_pools() {
        let err = Config::from_toml("[policy]\ndesired_pools = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ConfigSchema(_)));
    }

    #[test]
    fn rejects_bad_pallet_id() {
        let err = Config::from_toml("[scan]\npallet_id = \"nopls\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::CannotParseToml(_)));
    }

    #[test]
    fn rejects_impossible_capacity() {
        let toml = "[policy]\nmember_capacity = { max_members = 4, min_free_spots = 5 }\n";
        let err = Config::from_toml(toml).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigSchema(_)));
    }

    #[test]
    fn renders_back_to_toml() {
        let config = Config::from_toml("[policy]\ndesired_pools = 2\n").expect("valid");
        let text = Config::to_toml(&config).expect("render");
        let again = Config::from_toml(&text).expect("reparse");

        assert_eq!(again.policy, config.policy);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Config::load("/definitely/not/here/nompool.toml").unwrap_err();
        assert!(matches!(err, ConfigError::CannotRead { .. }));
    }
}
