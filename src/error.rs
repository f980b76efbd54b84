//! Error handling for cafe directory ingestion.
//!
//! Only whole-payload failures are errors. Per-row anomalies (ragged rows,
//! unterminated quotes, blank rows) are absorbed by the parser and counted
//! in [`ParseStats`](crate::app::services::csv_ingest::ParseStats).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CafeError {
    #[error("Transport failure fetching {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} returned non-success status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Response from {url} has no body to read")]
    EmptyBody { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to parse configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Ingestion interrupted: {reason}")]
    Interrupted { reason: String },
}

impl CafeError {
    /// Create a transport failure error
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a non-success status error
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Create an empty body error
    pub fn empty_body(url: impl Into<String>) -> Self {
        Self::EmptyBody { url: url.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an interruption error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }

    /// True when the fetch or the byte stream itself failed.
    ///
    /// Local file read errors count as transport failures: they are the
    /// file-backed equivalent of a broken network stream.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::HttpStatus { .. } | Self::Http(_) | Self::Io(_)
        )
    }

    /// True when the source produced no body at all.
    pub fn is_empty_body(&self) -> bool {
        matches!(self, Self::EmptyBody { .. })
    }
}

pub type Result<T> = std::result::Result<T, CafeError>;
