//! Record construction from header and data rows

use super::schema_mapper::{HeaderSchema, normalize_value};
use super::tokenizer::RawRow;
use crate::app::models::Record;

/// Build one sparse [`Record`] from a data row.
///
/// Returns `None` for a row whose cells are all blank. Columns with a blank
/// header or a blank value contribute no key. Ragged rows are tolerated: only
/// indices present in both rows are considered.
pub fn build_record(schema: &HeaderSchema, row: &RawRow) -> Option<Record> {
    if row.is_blank() {
        return None;
    }

    let record = row
        .cells
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| {
            let key = schema.key_at(index)?;
            let value = normalize_value(cell);
            (!value.is_empty()).then(|| (key.clone(), value))
        })
        .collect();

    Some(record)
}
