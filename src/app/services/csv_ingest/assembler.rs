//! Line assembly over an incrementally delivered stream
//!
//! Chunks arrive in order and may cut a line, or a UTF-8 sequence, anywhere.
//! The assembler keeps one pending partial line and hands back every line
//! that is known to be complete.

use regex::Regex;
use std::sync::LazyLock;

static LINE_TERMINATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n").expect("line terminator pattern is valid"));

/// Buffers partial lines (and partial UTF-8 sequences) across chunk boundaries
#[derive(Debug, Default)]
pub struct StreamAssembler {
    /// Text after the last seen terminator
    pending_line: String,

    /// Trailing bytes of an incomplete UTF-8 sequence
    pending_bytes: Vec<u8>,

    bytes_consumed: usize,
    lines_emitted: usize,
}

impl StreamAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a raw byte chunk and return the lines it completed
    pub fn push_bytes(&mut self, chunk: &[u8]) -> Vec<String> {
        self.bytes_consumed += chunk.len();
        let text = self.decode(chunk);
        self.push_decoded(&text)
    }

    /// Accept an already-decoded text chunk and return the lines it completed
    pub fn push_str(&mut self, chunk: &str) -> Vec<String> {
        self.bytes_consumed += chunk.len();
        self.push_decoded(chunk)
    }

    /// Signal end of input, returning the withheld final line if any.
    ///
    /// Only call this after a clean end of stream; a failed stream is
    /// abandoned by dropping the assembler.
    pub fn finish(mut self) -> Option<String> {
        if !self.pending_bytes.is_empty() {
            self.pending_line.push(char::REPLACEMENT_CHARACTER);
            self.pending_bytes.clear();
        }

        if self.pending_line.is_empty() {
            None
        } else {
            self.lines_emitted += 1;
            Some(self.pending_line)
        }
    }

    pub fn bytes_consumed(&self) -> usize {
        self.bytes_consumed
    }

    pub fn lines_emitted(&self) -> usize {
        self.lines_emitted
    }

    fn push_decoded(&mut self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        self.pending_line.push_str(text);

        let mut segments: Vec<String> = LINE_TERMINATOR
            .split(&self.pending_line)
            .map(str::to_string)
            .collect();

        // split always yields at least one segment; the last may be incomplete
        self.pending_line = segments.pop().unwrap_or_default();
        self.lines_emitted += segments.len();
        segments
    }

    /// Decode bytes as UTF-8, holding back an incomplete trailing sequence
    fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending_bytes);
        bytes.extend_from_slice(chunk);

        let mut text = String::with_capacity(bytes.len());
        let mut start = 0;
        loop {
            match std::str::from_utf8(&bytes[start..]) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(err) => {
                    let valid_end = start + err.valid_up_to();
                    text.push_str(&String::from_utf8_lossy(&bytes[start..valid_end]));
                    match err.error_len() {
                        Some(invalid_len) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            start = valid_end + invalid_len;
                        }
                        None => {
                            self.pending_bytes = bytes[valid_end..].to_vec();
                            break;
                        }
                    }
                }
            }
        }
        text
    }
}
