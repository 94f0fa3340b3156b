#![cfg(feature = "xlsx")]

//! XLSX output engine, backed by `rust_xlsxwriter`.

use std::path::Path;

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook};

use crate::error::{ConvertError, ConvertResult};
use crate::types::{Table, Value};

/// Serialize a normalized [`Table`] as a single-sheet XLSX workbook at `path`.
///
/// Row 0 is the header; data rows follow in source order. `Null` cells are
/// left blank. The workbook's creation datetime is pinned to a fixed value so
/// converting the same source twice produces byte-for-byte identical output.
pub fn write_xlsx(table: &Table, path: &Path) -> ConvertResult<()> {
    let mut workbook = Workbook::new();
    let properties =
        DocProperties::new().set_creation_datetime(&ExcelDateTime::from_ymd(2000, 1, 1)?);
    workbook.set_properties(&properties);
    let worksheet = workbook.add_worksheet();

    for (col_idx, name) in table.schema.field_names().enumerate() {
        worksheet.write_string(0, col_num(col_idx)?, name)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = row_num(row_idx + 1)?;
        for (col_idx, value) in row.iter().enumerate() {
            let col = col_num(col_idx)?;
            match value {
                Value::Null => {}
                Value::Text(s) => {
                    worksheet.write_string(row_num, col, s.as_str())?;
                }
                Value::Integer(v) => {
                    worksheet.write_number(row_num, col, *v as f64)?;
                }
                Value::Float(v) => {
                    worksheet.write_number(row_num, col, *v)?;
                }
                Value::Bool(v) => {
                    worksheet.write_boolean(row_num, col, *v)?;
                }
                Value::Date(d) => {
                    let iso = d.to_string();
                    worksheet.write_string(row_num, col, iso.as_str())?;
                }
                Value::Bytes(_) => {
                    return Err(ConvertError::RawBytes {
                        column: table.schema.fields[col_idx].name.clone(),
                    });
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn row_num(idx: usize) -> ConvertResult<u32> {
    u32::try_from(idx).map_err(|_| ConvertError::SheetLimit {
        message: format!("row index {idx} exceeds the worksheet row limit"),
    })
}

fn col_num(idx: usize) -> ConvertResult<u16> {
    u16::try_from(idx).map_err(|_| ConvertError::SheetLimit {
        message: format!("column index {idx} exceeds the worksheet column limit"),
    })
}
