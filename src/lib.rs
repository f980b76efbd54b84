//! Cafe Finder Library
//!
//! Streams a published spreadsheet export (CSV), turns it into sparse cafe
//! records and filters them by free-text search and quick filters.
//!
//! This library provides tools for:
//! - Incremental CSV ingestion with quoted-field handling across chunk boundaries
//! - Mapping human-authored headers onto a stable set of field keys
//! - Evaluating search terms, quality filters and pinned searches
//! - Holding per-session search and filter state
//! - Rendering the filtered view as text cards or JSON

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_ingest;
        pub mod filter_engine;
        pub mod renderer;
        pub mod session;
        pub mod transport;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod interactive;
}

// Re-export commonly used types
pub use app::models::{ActiveFilterSet, FieldKey, FilterToken, QualityFilter, Record, RecordSet};
pub use app::services::csv_ingest::{CsvIngestor, ParseResult, ParseStats};
pub use app::services::filter_engine::FilterEngine;
pub use app::services::session::SessionState;
pub use config::FinderConfig;
pub use error::{CafeError, Result};
