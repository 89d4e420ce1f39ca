//! The `kp.toml` file.
//!
//! ```toml
//! [search]
//! step_minutes = 2.0
//! max_iterations = 60
//! tolerance_deg = 0.0001
//! workers = 4
//!
//! [chart]
//! ayanamsha = "KP"
//! house_system = "Placidus"
//! utc_offset = "+05:30"
//! latitude_deg = 13.0827
//! longitude_deg = 80.2707
//!
//! [partition]
//! table_path = "KP_SL_Divisions.csv"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every key is optional. A relative `table_path` is resolved against the
//! directory of the file it was read from.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use kp_search::{AscendantSearchConfig, HoraryConfig};
use kp_time::parse_utc_offset;
use kp_vedic_base::{
    AyanamshaSystem, BhavaSystem, GeoLocation, SubDivisionTable, load_partition_csv,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub search: SearchSection,
    pub chart: ChartSection,
    pub partition: PartitionSection,
    pub logging: LoggingSection,
    /// Directory of the file this was loaded from.
    #[serde(skip)]
    source_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSection {
    pub step_minutes: f64,
    pub max_iterations: u32,
    pub tolerance_deg: f64,
    pub refine_factor: u32,
    /// Threads for batch resolution.
    pub workers: usize,
}

impl Default for SearchSection {
    fn default() -> Self {
        let search = AscendantSearchConfig::default();
        Self {
            step_minutes: search.step_minutes(),
            max_iterations: search.max_iterations,
            tolerance_deg: search.tolerance_deg,
            refine_factor: search.refine_factor,
            workers: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartSection {
    pub ayanamsha: String,
    pub house_system: String,
    pub verify_sub_lord: bool,
    /// Default UTC offset for requests that give none.
    pub utc_offset: Option<String>,
    /// Default observer, used when both coordinates are set.
    pub latitude_deg: Option<f64>,
    pub longitude_deg: Option<f64>,
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            ayanamsha: AyanamshaSystem::KP.name().to_string(),
            house_system: BhavaSystem::Placidus.name().to_string(),
            verify_sub_lord: true,
            utc_offset: None,
            latitude_deg: None,
            longitude_deg: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartitionSection {
    /// CSV partition file; the built-in KP table when absent.
    pub table_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.source_dir = path.parent().map(Path::to_path_buf);
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search_config()
            .validate()
            .map_err(|reason| ConfigError::invalid("search", self.search.step_minutes, reason))?;
        if self.search.workers == 0 {
            return Err(ConfigError::invalid("search.workers", 0, "must be at least 1"));
        }
        self.ayanamsha()?;
        self.house_system()?;
        self.utc_offset()?;
        self.location()?;
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::invalid(
                "logging.level",
                &self.logging.level,
                format!("expected one of {}", LOG_LEVELS.join(", ")),
            ));
        }
        Ok(())
    }

    pub fn search_config(&self) -> AscendantSearchConfig {
        AscendantSearchConfig {
            max_iterations: self.search.max_iterations,
            tolerance_deg: self.search.tolerance_deg,
            refine_factor: self.search.refine_factor,
            ..AscendantSearchConfig::default()
        }
        .with_step_minutes(self.search.step_minutes)
    }

    pub fn horary_config(&self) -> Result<HoraryConfig, ConfigError> {
        Ok(HoraryConfig {
            search: self.search_config(),
            bhava_system: self.house_system()?,
            verify_sub_lord: self.chart.verify_sub_lord,
        })
    }

    pub fn ayanamsha(&self) -> Result<AyanamshaSystem, ConfigError> {
        self.chart
            .ayanamsha
            .parse()
            .map_err(|e| ConfigError::invalid("chart.ayanamsha", &self.chart.ayanamsha, e))
    }

    pub fn house_system(&self) -> Result<BhavaSystem, ConfigError> {
        self.chart
            .house_system
            .parse()
            .map_err(|e| ConfigError::invalid("chart.house_system", &self.chart.house_system, e))
    }

    pub fn utc_offset(&self) -> Result<Option<FixedOffset>, ConfigError> {
        self.chart
            .utc_offset
            .as_deref()
            .map(|s| parse_utc_offset(s).map_err(|e| ConfigError::invalid("chart.utc_offset", s, e)))
            .transpose()
    }

    /// Default observer; `None` unless both coordinates are configured.
    pub fn location(&self) -> Result<Option<GeoLocation>, ConfigError> {
        match (self.chart.latitude_deg, self.chart.longitude_deg) {
            (Some(lat), Some(lon)) => {
                let loc = GeoLocation::new(lat, lon, 0.0);
                loc.validate()
                    .map_err(|e| ConfigError::invalid("chart.latitude_deg", format!("{lat}, {lon}"), e))?;
                Ok(Some(loc))
            }
            (None, None) => Ok(None),
            _ => Err(ConfigError::invalid(
                "chart.latitude_deg",
                "",
                "latitude and longitude must be given together",
            )),
        }
    }

    /// `table_path`, resolved against the config file's directory.
    pub fn table_path(&self) -> Option<PathBuf> {
        let path = self.partition.table_path.as_ref()?;
        Some(match &self.source_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.clone(),
        })
    }

    /// The configured partition table, or the built-in one.
    pub fn partition_table(&self) -> Result<Cow<'static, SubDivisionTable>, ConfigError> {
        match self.table_path() {
            Some(path) => Ok(Cow::Owned(load_partition_csv(path)?)),
            None => Ok(Cow::Borrowed(SubDivisionTable::kp())),
        }
    }

    pub fn workers(&self) -> usize {
        self.search.workers
    }

    pub fn log_level(&self) -> &str {
        &self.logging.level
    }
}
