//! CSV output engine.
//!
//! The plain-text fallback when no workbook engine is compiled in. Output is
//! deterministic: the same table always serializes to the same bytes.

use std::path::Path;

use crate::error::{ConvertError, ConvertResult};
use crate::types::{Table, Value};

/// Serialize a normalized [`Table`] as a CSV file at `path`.
pub fn write_csv(table: &Table, path: &Path) -> ConvertResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.schema.field_names())?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(row.len());
        for (value, field) in row.iter().zip(&table.schema.fields) {
            record.push(cell_text(value, &field.name)?);
        }
        writer.write_record(&record)?;
    }

    writer.flush().map_err(ConvertError::Write)?;
    Ok(())
}

fn cell_text(value: &Value, column: &str) -> ConvertResult<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Text(s) => Ok(s.clone()),
        Value::Integer(v) => Ok(v.to_string()),
        Value::Float(v) => Ok(v.to_string()),
        Value::Bool(v) => Ok(v.to_string()),
        Value::Date(d) => Ok(d.to_string()),
        Value::Bytes(_) => Err(ConvertError::RawBytes {
            column: column.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Date, Field, FieldType, Schema};

    #[test]
    fn cell_text_renders_scalars() {
        assert_eq!(cell_text(&Value::Null, "c").unwrap(), "");
        assert_eq!(cell_text(&Value::Integer(42), "c").unwrap(), "42");
        assert_eq!(cell_text(&Value::Bool(true), "c").unwrap(), "true");
        assert_eq!(
            cell_text(
                &Value::Date(Date {
                    year: 1999,
                    month: 1,
                    day: 2
                }),
                "c"
            )
            .unwrap(),
            "1999-01-02"
        );
    }

    #[test]
    fn raw_bytes_are_rejected() {
        let err = cell_text(&Value::Bytes(vec![0xE9]), "city").unwrap_err();
        assert!(err.to_string().contains("city"));
    }

    #[test]
    fn header_only_file_for_empty_table() {
        let table = Table::new(
            Schema::new(vec![
                Field::new("a", FieldType::Character, 4),
                Field::new("b", FieldType::Numeric, 4),
            ]),
            vec![],
        );
        let path = std::env::temp_dir().join(format!(
            "dbf-export-csv-empty-{}.csv",
            std::process::id()
        ));
        write_csv(&table, &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "a,b\n");
        let _ = std::fs::remove_file(&path);
    }
}
