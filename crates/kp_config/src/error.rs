//! Configuration errors.

use std::path::PathBuf;

use kp_vedic_base::VedicError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {path}: {message}")]
    Io { path: PathBuf, message: String },
    /// Not valid TOML, or keys of the wrong type.
    #[error("config parse error: {0}")]
    Parse(String),
    /// A value is well-formed but unusable.
    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },
    /// The configured partition table failed to load.
    #[error(transparent)]
    Partition(#[from] VedicError),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, value: impl ToString, reason: impl ToString) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}
