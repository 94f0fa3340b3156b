//! Value normalization: decode raw byte values into text.
//!
//! dBase character fields come out of the reader as [`Value::Bytes`] because
//! the file carries no reliable encoding marker. Spreadsheet writers only
//! accept text, so every byte-carrying column is decoded here with a fixed
//! Latin-1 fallback before writing. Legacy regional encodings are single-byte
//! supersets of ASCII, which makes Latin-1 a readable default even when the
//! real code page differs.

use crate::types::{Table, Value};

/// Decode bytes as ISO-8859-1 (Latin-1).
///
/// Every byte maps to exactly one code point, so decoding is total and never
/// loses data.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Decode every byte-carrying column of `table` to text.
///
/// Columns without any [`Value::Bytes`] cell pass through untouched; the
/// schema and row order are preserved.
pub fn normalize(mut table: Table) -> Table {
    let byte_columns: Vec<usize> = (0..table.column_count())
        .filter(|&col| table.rows.iter().any(|row| row[col].is_bytes()))
        .collect();

    if byte_columns.is_empty() {
        return table;
    }

    for row in &mut table.rows {
        for &col in &byte_columns {
            if let Value::Bytes(bytes) = &row[col] {
                row[col] = Value::Text(decode_latin1(bytes));
            }
        }
    }
    table
}
