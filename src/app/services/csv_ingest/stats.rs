//! Ingestion statistics and result structures

use super::schema_mapper::HeaderSchema;
use crate::app::models::RecordSet;

/// Result of one complete ingestion
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Records in source order
    pub records: RecordSet,

    /// Header schema, `None` when the payload had no non-blank line
    pub header: Option<HeaderSchema>,

    pub stats: ParseStats,
}

/// Counters for one ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ParseStats {
    /// Bytes fed to the assembler
    pub bytes_consumed: usize,

    /// Logical lines emitted by the assembler, blank ones included
    pub lines_seen: usize,

    /// Whitespace-only lines skipped before tokenization
    pub blank_lines_skipped: usize,

    /// Data rows rejected because every cell was blank
    pub blank_rows_rejected: usize,

    /// Data rows whose length differs from the header row
    pub ragged_rows: usize,

    /// Rows (header included) that ended inside an open quote
    pub unterminated_quotes: usize,

    /// Records produced
    pub records_built: usize,
}

impl ParseStats {
    /// Data rows that reached the record builder
    pub fn data_rows(&self) -> usize {
        self.records_built + self.blank_rows_rejected
    }

    /// True when any per-row fallback rule was applied
    pub fn has_anomalies(&self) -> bool {
        self.ragged_rows > 0 || self.unterminated_quotes > 0
    }
}
