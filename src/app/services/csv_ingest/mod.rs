//! Streaming CSV ingestion for published spreadsheet exports
//!
//! This module turns a chunked CSV byte stream into an ordered set of sparse
//! cafe records. Per-row anomalies never fail a payload; only the underlying
//! stream can.
//!
//! ## Architecture
//!
//! - [`assembler`] - Buffers partial lines across chunk boundaries
//! - [`tokenizer`] - Splits one line into cells with quote handling
//! - [`schema_mapper`] - Maps human-authored headers to canonical keys
//! - [`record_builder`] - Pairs header and data rows into sparse records
//! - [`parser`] - Drives the pipeline over strings and streams
//! - [`stats`] - Ingestion statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use cafe_finder::app::services::csv_ingest::CsvIngestor;
//!
//! let result = CsvIngestor::new().ingest_str("Cafe Name,City\nBean There,Springfield\n");
//! assert_eq!(result.records.len(), 1);
//! ```

pub mod assembler;
pub mod parser;
pub mod record_builder;
pub mod schema_mapper;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

pub use assembler::StreamAssembler;
pub use parser::CsvIngestor;
pub use record_builder::build_record;
pub use schema_mapper::{HeaderSchema, map_header, normalize_header};
pub use stats::{ParseResult, ParseStats};
pub use tokenizer::{RawRow, tokenize_row};
