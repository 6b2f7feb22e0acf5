use nompool_core::config::ConfigError;
use thiserror::Error as ThisError;

///
/// CliError
///

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] nompool_core::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot read snapshot '{path}': {message}")]
    SnapshotRead { path: String, message: String },

    #[error("cannot parse snapshot: {0}")]
    SnapshotParse(String),

    #[error("cannot render output: {0}")]
    Render(String),
}
