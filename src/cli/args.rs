//! Command-line argument definitions for the cafe finder
//!
//! This module defines the CLI interface using the clap derive API.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::app::services::transport::SheetSource;
use crate::config::{FinderConfig, OutputFormat};

/// CLI arguments for the cafe directory viewer
///
/// Fetches the published cafe spreadsheet, applies the search and quick
/// filters, and prints the matching cafes.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cafe-finder",
    version,
    about = "Browse a published cafe directory spreadsheet from the terminal",
    long_about = "Streams a published spreadsheet CSV export, normalizes its columns into cafe \
                  records, and shows the cafes matching a free-text search and quick filters \
                  (wifi, quiet, power, coffee). Searches can be pinned as persistent filters."
)]
pub struct Args {
    /// URL of the published CSV export
    ///
    /// Overrides `sheet_url` from the configuration file.
    #[arg(short = 'u', long = "url", value_name = "URL", conflicts_with = "file")]
    pub url: Option<String>,

    /// Read the CSV export from a local file instead of fetching it
    #[arg(long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Free-text search over cafe name and city
    #[arg(short = 's', long = "search", value_name = "TEXT")]
    pub search: Option<String>,

    /// Enable a quick filter (wifi, quiet, power, coffee); repeatable
    #[arg(short = 'f', long = "filter", value_name = "NAME")]
    pub filters: Vec<String>,

    /// Pin a search phrase as a persistent filter; repeatable
    #[arg(short = 'p', long = "pin", value_name = "PHRASE")]
    pub pins: Vec<String>,

    /// Output format
    #[arg(long = "format", value_enum, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Path to configuration file
    ///
    /// If not specified, looks for ~/.config/cafe-finder/config.toml
    #[arg(long = "config", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// After the first render, read session commands from stdin
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,

    /// Print ingestion statistics to stderr
    #[arg(long = "stats")]
    pub show_stats: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Output format selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_to_config(&self, mut config: FinderConfig) -> FinderConfig {
        if let Some(url) = &self.url {
            config = config.with_sheet_url(url.clone());
        }
        if let Some(format) = self.format {
            config = config.with_output_format(format.into());
        }
        if self.no_color {
            config = config.with_color(false);
        }
        config
    }

    /// Local file wins over the configured URL
    pub fn source(&self, config: &FinderConfig) -> SheetSource {
        match &self.file {
            Some(path) => SheetSource::File(path.clone()),
            None => SheetSource::Url(config.sheet_url.clone()),
        }
    }
}
