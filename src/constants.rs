//! Application constants for the cafe finder
//!
//! This module contains the header lookup table, quick-filter thresholds and
//! default values used throughout the application.

use crate::app::models::FieldKey;

// =============================================================================
// Source
// =============================================================================

/// Published spreadsheet export (CSV) used when no URL is configured
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vSFvLd2tOTDsWRnff1_Q45swX5Y5GVAWr_iv5B-qsUSOoWmQY1asnQvW0gWKi1jPCF3VrMiO2Pnl2Mp/pub?gid=1569478054&single=true&output=csv";

/// Default HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default chunk size when streaming a local file
pub const DEFAULT_READ_CHUNK_SIZE: usize = 8192;

/// Application directory name under the platform config dir
pub const CONFIG_DIR_NAME: &str = "cafe-finder";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Header Mapping
// =============================================================================

/// Normalized header text to canonical field key.
///
/// Lookup keys are already lowercased with quotes stripped. Both the raw
/// form-response headers and the "avg ..." summary-sheet headers are listed.
pub const HEADER_ALIASES: &[(&str, FieldKey)] = &[
    ("cafe name", FieldKey::Name),
    ("city", FieldKey::Location),
    ("google maps link", FieldKey::MapUrl),
    ("wifi quality", FieldKey::Wifi),
    ("avg wifi quality", FieldKey::Wifi),
    ("comfort", FieldKey::Comfort),
    ("avg comfort", FieldKey::Comfort),
    ("noise level", FieldKey::Noise),
    ("avg quietness", FieldKey::Noise),
    ("coffee quality", FieldKey::Coffee),
    ("avg coffee quality", FieldKey::Coffee),
    ("food quality", FieldKey::Food),
    ("avg food quality", FieldKey::Food),
    ("power outlets availability", FieldKey::Power),
    ("avg power outlets availability", FieldKey::Power),
    ("temperature", FieldKey::Temperature),
    ("avg temperature", FieldKey::Temperature),
    ("comments", FieldKey::Comments),
    ("timestamp", FieldKey::Timestamp),
];

// =============================================================================
// Quick Filters
// =============================================================================

/// Prefix marking a pinned-search filter token
pub const PINNED_SEARCH_PREFIX: &str = "search:";

/// Minimum wifi rating for the `wifi` filter
pub const DEFAULT_MIN_WIFI: i64 = 4;

/// Minimum quietness rating for the `quiet` filter (higher = quieter)
pub const DEFAULT_MIN_QUIET: i64 = 4;

/// Minimum coffee rating for the `coffee` filter
pub const DEFAULT_MIN_COFFEE: i64 = 4;

/// Highest rating on the star scale
pub const MAX_RATING: i64 = 5;
