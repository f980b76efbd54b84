//! Ingestion driver
//!
//! Wires the assembler, tokenizer, schema mapper and record builder together.
//! The same line pipeline serves both whole-string payloads and chunked
//! streams; a whole string is just a stream of one chunk.

use futures::{Stream, StreamExt};
use tracing::{debug, info};

use super::assembler::StreamAssembler;
use super::record_builder::build_record;
use super::schema_mapper::HeaderSchema;
use super::stats::{ParseResult, ParseStats};
use super::tokenizer::tokenize_row;
use crate::Result;
use crate::app::models::{Record, RecordSet};

/// Turns CSV payloads into [`RecordSet`]s
#[derive(Debug, Clone, Default)]
pub struct CsvIngestor;

impl CsvIngestor {
    pub fn new() -> Self {
        Self
    }

    /// Ingest a payload that is already fully in memory
    pub fn ingest_str(&self, payload: &str) -> ParseResult {
        let mut assembler = StreamAssembler::new();
        let mut pipeline = LinePipeline::default();

        for line in assembler.push_str(payload) {
            pipeline.accept_line(&line);
        }
        pipeline.finish(assembler)
    }

    /// Ingest an incrementally delivered byte stream.
    ///
    /// The first stream error aborts ingestion and is returned as-is; records
    /// accumulated so far are discarded, never returned as a truncated set.
    pub async fn ingest_stream<S, B>(&self, stream: S) -> Result<ParseResult>
    where
        S: Stream<Item = Result<B>>,
        B: AsRef<[u8]>,
    {
        let mut stream = std::pin::pin!(stream);
        let mut assembler = StreamAssembler::new();
        let mut pipeline = LinePipeline::default();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            for line in assembler.push_bytes(chunk.as_ref()) {
                pipeline.accept_line(&line);
            }
        }

        Ok(pipeline.finish(assembler))
    }
}

/// Per-payload state: header capture, record accumulation, statistics
#[derive(Debug, Default)]
struct LinePipeline {
    header: Option<HeaderSchema>,
    records: Vec<Record>,
    stats: ParseStats,
}

impl LinePipeline {
    fn accept_line(&mut self, line: &str) {
        self.stats.lines_seen += 1;

        if line.trim().is_empty() {
            self.stats.blank_lines_skipped += 1;
            return;
        }

        let row = tokenize_row(line);
        if row.unterminated_quote {
            self.stats.unterminated_quotes += 1;
            debug!("Line {} ends inside an open quote", self.stats.lines_seen);
        }

        let Some(schema) = &self.header else {
            let schema = HeaderSchema::from_header_row(&row);
            let (total, mapped, passed_through) = schema.stats();
            debug!(
                "Header mapping: {} columns, {} known fields, {} passed through",
                total, mapped, passed_through
            );
            self.header = Some(schema);
            return;
        };

        if row.len() != schema.len() {
            self.stats.ragged_rows += 1;
            debug!(
                "Line {} has {} cells, header has {}",
                self.stats.lines_seen,
                row.len(),
                schema.len()
            );
        }

        match build_record(schema, &row) {
            Some(record) => {
                self.records.push(record);
                self.stats.records_built += 1;
            }
            None => {
                self.stats.blank_rows_rejected += 1;
                debug!("Line {} rejected: all cells blank", self.stats.lines_seen);
            }
        }
    }

    fn finish(mut self, assembler: StreamAssembler) -> ParseResult {
        self.stats.bytes_consumed = assembler.bytes_consumed();
        if let Some(last_line) = assembler.finish() {
            self.accept_line(&last_line);
        }

        info!(
            "Ingested {} records from {} lines ({} blank rows rejected, {} ragged)",
            self.stats.records_built,
            self.stats.lines_seen,
            self.stats.blank_rows_rejected,
            self.stats.ragged_rows
        );

        ParseResult {
            records: RecordSet::new(self.records),
            header: self.header,
            stats: self.stats,
        }
    }
}
