//! Single-line CSV tokenization
//!
//! Splits one logical line (terminator already removed) into trimmed cells,
//! honouring double-quote quoting with the `""` escape.

/// Cells of one parsed CSV line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// Trimmed cell values, in column order
    pub cells: Vec<String>,

    /// A quote was opened and never closed before the end of the line
    pub unterminated_quote: bool,
}

impl RawRow {
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when every cell is empty after trimming
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.trim().is_empty())
    }
}

/// Tokenize one line into a [`RawRow`].
///
/// A trailing comma always yields a final empty cell. An unterminated quote
/// is not recovered: the rest of the line, commas included, becomes the last
/// cell and the row is flagged.
pub fn tokenize_row(line: &str) -> RawRow {
    let mut cells = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                cells.push(field.trim().to_string());
                field.clear();
            }
            _ => field.push(ch),
        }
    }
    cells.push(field.trim().to_string());

    RawRow {
        cells,
        unterminated_quote: in_quotes,
    }
}
