//! Configuration for the KP horary tools.
//!
//! A [`Config`] is read from TOML, validated as a whole, and converted into
//! the search and chart settings of `kp_search`.

pub mod config;
pub mod error;

pub use config::{ChartSection, Config, LoggingSection, PartitionSection, SearchSection};
pub use error::ConfigError;
