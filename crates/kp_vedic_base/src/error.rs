//! Error types for Vedic base calculations.

use thiserror::Error;

/// Errors from lookups, partition loading and chart geometry.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// Horary number outside 1..=249.
    #[error("horary number {0} is outside 1..=249")]
    HoraryOutOfRange(u32),
    /// A loaded partition table violates a partition invariant.
    #[error("malformed partition table: {0}")]
    MalformedPartitionTable(String),
    /// Invalid geographic location parameter.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
    /// Unknown name for a graha, rashi, ayanamsha or house system.
    #[error("unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },
    /// Partition file could not be read or written.
    #[error("partition file I/O: {0}")]
    Io(String),
}

impl From<std::io::Error> for VedicError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<csv::Error> for VedicError {
    fn from(e: csv::Error) -> Self {
        match e.kind() {
            csv::ErrorKind::Io(_) => Self::Io(e.to_string()),
            _ => Self::MalformedPartitionTable(e.to_string()),
        }
    }
}
