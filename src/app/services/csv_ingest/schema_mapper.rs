//! Header normalization and canonical key mapping
//!
//! Spreadsheet headers are typed by humans; casing, stray quotes and padding
//! vary between exports. Headers are normalized before lookup and anything
//! not in the table passes through under its normalized text.

use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

use super::tokenizer::RawRow;
use crate::app::models::{CanonicalKey, FieldKey};
use crate::constants::HEADER_ALIASES;

static HEADER_TABLE: LazyLock<HashMap<&'static str, FieldKey>> =
    LazyLock::new(|| HEADER_ALIASES.iter().copied().collect());

/// Strip `'` and `"`, trim, lowercase
pub fn normalize_header(raw: &str) -> String {
    strip_quotes(raw).trim().to_lowercase()
}

/// Strip `'` and `"`, then trim. Used for data cells.
pub fn normalize_value(raw: &str) -> String {
    strip_quotes(raw).trim().to_string()
}

fn strip_quotes(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '\'' | '"')).collect()
}

/// Map one raw header cell to its canonical key. Total and deterministic.
///
/// Headers outside the alias table pass through, except that a header
/// spelling a field name (`Name`, `Wifi`, `mapurl`) lands on that field.
pub fn map_header(raw: &str) -> CanonicalKey {
    let normalized = normalize_header(raw);
    match HEADER_TABLE.get(normalized.as_str()) {
        Some(&key) => CanonicalKey::Field(key),
        None => CanonicalKey::from_normalized(normalized),
    }
}

/// Positional schema derived from a payload's header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSchema {
    /// Raw header cells as they appeared in the payload
    pub raw_headers: Vec<String>,

    /// Canonical key per column; `None` for blank header cells
    pub columns: Vec<Option<CanonicalKey>>,
}

impl HeaderSchema {
    /// Analyze a header row. Blank header cells yield unkeyed columns.
    pub fn from_header_row(row: &RawRow) -> Self {
        let columns: Vec<Option<CanonicalKey>> = row
            .cells
            .iter()
            .map(|cell| {
                if normalize_header(cell).is_empty() {
                    None
                } else {
                    Some(map_header(cell))
                }
            })
            .collect();

        for key in columns.iter().flatten() {
            if let CanonicalKey::Other(name) = key {
                debug!("Passing through unmapped header '{}'", name);
            }
        }

        Self {
            raw_headers: row.cells.clone(),
            columns,
        }
    }

    /// Canonical key of a column, if the column has a non-blank header
    pub fn key_at(&self, index: usize) -> Option<&CanonicalKey> {
        self.columns.get(index).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn has_field(&self, key: FieldKey) -> bool {
        self.columns
            .iter()
            .flatten()
            .any(|column| *column == CanonicalKey::Field(key))
    }

    /// Column counts: (total, mapped to known fields, passed through)
    pub fn stats(&self) -> (usize, usize, usize) {
        let mapped = self
            .columns
            .iter()
            .flatten()
            .filter(|key| matches!(key, CanonicalKey::Field(_)))
            .count();
        let passed_through = self
            .columns
            .iter()
            .flatten()
            .filter(|key| matches!(key, CanonicalKey::Other(_)))
            .count();
        (self.columns.len(), mapped, passed_through)
    }
}
