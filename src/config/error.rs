//! Configuration loading errors.

use thiserror::Error;

/// Why a configuration failed to load.
#[derive(Debug, Clone, Error)]
pub enum ConfigLoadError {
    /// The file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// The YAML did not parse into the config schema.
    #[error("config parse error: {0}")]
    Parse(String),
}
