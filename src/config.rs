//! Configuration management and validation.
//!
//! Configuration is layered: built-in defaults, then an optional TOML file,
//! then command-line flags applied through the `with_*` builders.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::app::services::filter_engine::FilterThresholds;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_READ_CHUNK_SIZE, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SHEET_URL, MAX_RATING,
};
use crate::{CafeError, Result};

/// Output format for the rendered directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Global configuration for the cafe finder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Published CSV export to fetch
    pub sheet_url: String,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,

    /// Chunk size when streaming local files
    pub read_chunk_size: usize,

    pub output_format: OutputFormat,

    /// Colorize text output
    pub color: bool,

    /// Minimum ratings for the named quick filters
    pub thresholds: FilterThresholds,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            sheet_url: DEFAULT_SHEET_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            output_format: OutputFormat::Text,
            color: true,
            thresholds: FilterThresholds::default(),
        }
    }
}

impl FinderConfig {
    /// Platform config file location, e.g. `~/.config/cafe-finder/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            CafeError::configuration("Could not determine user configuration directory")
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sheet_url.trim().is_empty() {
            return Err(CafeError::configuration("sheet_url must not be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(CafeError::configuration(
                "request_timeout_secs must be greater than zero",
            ));
        }
        if self.read_chunk_size == 0 {
            return Err(CafeError::configuration(
                "read_chunk_size must be greater than zero",
            ));
        }

        let thresholds = [
            ("wifi", self.thresholds.wifi),
            ("quiet", self.thresholds.quiet),
            ("coffee", self.thresholds.coffee),
        ];
        for (name, value) in thresholds {
            if !(0..=MAX_RATING).contains(&value) {
                return Err(CafeError::configuration(format!(
                    "thresholds.{} must be between 0 and {}, got {}",
                    name, MAX_RATING, value
                )));
            }
        }
        Ok(())
    }

    pub fn with_sheet_url(mut self, url: impl Into<String>) -> Self {
        self.sheet_url = url.into();
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_thresholds(mut self, thresholds: FilterThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}
