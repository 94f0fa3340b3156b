//! dBase table reader.
//!
//! Parses the classic dBase III/IV layout: a 32-byte file header, an array of
//! 32-byte field descriptors terminated by `0x0D`, then fixed-width records
//! (one leading deletion-flag byte each). Character fields are returned as
//! [`Value::Bytes`] — decoding happens later in [`crate::normalize`].
//!
//! Reading is feature-gated behind `dbf` (on by default); without it every
//! call fails with [`ConvertError::MissingDependency`].

use std::path::Path;

use crate::error::{ConvertError, ConvertResult};
use crate::types::Table;

/// Read a `.dbf` file into an in-memory [`Table`].
///
/// Rules:
///
/// - A file with zero records still yields the schema from its field
///   descriptors, so a header-only spreadsheet can be written.
/// - Records flagged as deleted (`0x2A`) are skipped.
/// - A missing or unreadable file is a [`ConvertError::Read`]; a file that
///   does not parse as a dBase table is a [`ConvertError::Corrupt`].
pub fn read_table(path: impl AsRef<Path>) -> ConvertResult<Table> {
    let path = path.as_ref();
    // Avoid unused warnings when the feature is off.
    let _ = path;

    #[cfg(feature = "dbf")]
    {
        let bytes = std::fs::read(path).map_err(ConvertError::Read)?;
        parse_table(&bytes)
    }

    #[cfg(not(feature = "dbf"))]
    {
        Err(ConvertError::MissingDependency(
            "dbf table reader (enable cargo feature 'dbf')",
        ))
    }
}

#[cfg(feature = "dbf")]
mod parse {
    use crate::error::{ConvertError, ConvertResult};
    use crate::normalize::decode_latin1;
    use crate::types::{Date, Field, FieldType, Schema, Table, Value};

    const HEADER_LEN: usize = 32;
    const DESCRIPTOR_LEN: usize = 32;
    const DESCRIPTOR_TERMINATOR: u8 = 0x0D;
    const RECORD_DELETED: u8 = 0x2A;

    pub(super) fn parse_table(bytes: &[u8]) -> ConvertResult<Table> {
        if bytes.len() < HEADER_LEN {
            return Err(corrupt("file shorter than the 32-byte header"));
        }

        let record_count = le_u32(bytes, 4) as usize;
        let data_offset = le_u16(bytes, 8) as usize;
        let record_len = le_u16(bytes, 10) as usize;
        if record_len == 0 {
            return Err(corrupt("record length is zero"));
        }

        let schema = parse_schema(bytes)?;
        let declared_len: usize = 1 + schema.fields.iter().map(|f| f.length as usize).sum::<usize>();
        if declared_len != record_len {
            return Err(corrupt(&format!(
                "field widths sum to {declared_len} but the header declares {record_len}"
            )));
        }

        let mut rows = Vec::new();
        let mut offset = data_offset;
        for _ in 0..record_count {
            if offset + record_len > bytes.len() {
                return Err(corrupt("record data is truncated"));
            }
            let record = &bytes[offset..offset + record_len];
            offset += record_len;
            if record[0] == RECORD_DELETED {
                continue;
            }

            let mut row = Vec::with_capacity(schema.fields.len());
            let mut field_offset = 1;
            for field in &schema.fields {
                let width = field.length as usize;
                row.push(decode_field(field, &record[field_offset..field_offset + width]));
                field_offset += width;
            }
            rows.push(row);
        }

        Ok(Table::new(schema, rows))
    }

    fn parse_schema(bytes: &[u8]) -> ConvertResult<Schema> {
        let mut fields = Vec::new();
        let mut pos = HEADER_LEN;
        loop {
            if pos >= bytes.len() {
                return Err(corrupt("field descriptor array is unterminated"));
            }
            if bytes[pos] == DESCRIPTOR_TERMINATOR {
                break;
            }
            if pos + DESCRIPTOR_LEN > bytes.len() {
                return Err(corrupt("field descriptor is truncated"));
            }

            let descriptor = &bytes[pos..pos + DESCRIPTOR_LEN];
            let name_bytes = descriptor[..11]
                .split(|&b| b == 0)
                .next()
                .unwrap_or(&[]);
            let name = decode_latin1(name_bytes).trim().to_string();
            if name.is_empty() {
                return Err(corrupt("field descriptor has an empty name"));
            }

            fields.push(Field {
                name,
                field_type: FieldType::from_tag(descriptor[11]),
                length: descriptor[16],
                decimal_count: descriptor[17],
            });
            pos += DESCRIPTOR_LEN;
        }
        Ok(Schema::new(fields))
    }

    fn decode_field(field: &Field, raw: &[u8]) -> Value {
        match field.field_type {
            FieldType::Character => {
                let trimmed = trim_trailing(raw);
                Value::Bytes(trimmed.to_vec())
            }
            FieldType::Numeric | FieldType::Float => decode_numeric(field, raw),
            FieldType::Logical => match raw.first() {
                Some(b'T' | b't' | b'Y' | b'y') => Value::Bool(true),
                Some(b'F' | b'f' | b'N' | b'n') => Value::Bool(false),
                _ => Value::Null,
            },
            FieldType::Date => decode_date(raw),
            FieldType::Unknown(_) => Value::Bytes(raw.to_vec()),
        }
    }

    /// Numeric fields are ASCII digits padded with spaces; `*` fill marks an
    /// uninitialized value. Anything unparseable degrades to `Null` rather
    /// than failing the whole file.
    fn decode_numeric(field: &Field, raw: &[u8]) -> Value {
        let text = decode_latin1(raw);
        let trimmed = text.trim_matches([' ', '\0', '*']);
        if trimmed.is_empty() {
            return Value::Null;
        }

        if field.decimal_count == 0 {
            if let Ok(v) = trimmed.parse::<i64>() {
                return Value::Integer(v);
            }
        }
        match trimmed.parse::<f64>() {
            Ok(v) => Value::Float(v),
            Err(_) => Value::Null,
        }
    }

    fn decode_date(raw: &[u8]) -> Value {
        if raw.len() != 8 || !raw.iter().all(u8::is_ascii_digit) {
            return Value::Null;
        }
        let digits = |r: &[u8]| -> u32 {
            r.iter().fold(0u32, |acc, &b| acc * 10 + u32::from(b - b'0'))
        };
        let year = digits(&raw[..4]) as u16;
        let month = digits(&raw[4..6]) as u8;
        let day = digits(&raw[6..8]) as u8;
        if year == 0 || month == 0 || month > 12 || day == 0 || day > 31 {
            return Value::Null;
        }
        Value::Date(Date { year, month, day })
    }

    fn trim_trailing(raw: &[u8]) -> &[u8] {
        let end = raw
            .iter()
            .rposition(|&b| b != b' ' && b != 0)
            .map_or(0, |i| i + 1);
        &raw[..end]
    }

    fn le_u16(bytes: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([bytes[at], bytes[at + 1]])
    }

    fn le_u32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    fn corrupt(message: &str) -> ConvertError {
        ConvertError::Corrupt {
            message: message.to_string(),
        }
    }
}

#[cfg(feature = "dbf")]
use parse::parse_table;

#[cfg(all(test, feature = "dbf"))]
mod tests {
    use super::parse_table;
    use crate::error::{ConvertError, ErrorKind};
    use crate::types::{FieldType, Value};

    /// Build a minimal dBase III file in memory.
    ///
    /// `fields` are `(name, type tag, width)`; each record is a deletion flag
    /// plus per-field values padded to the declared width with spaces.
    fn dbf_bytes(fields: &[(&str, u8, u8)], records: &[(bool, Vec<&[u8]>)]) -> Vec<u8> {
        let header_len = 32 + 32 * fields.len() + 1;
        let record_len: usize = 1 + fields.iter().map(|f| f.2 as usize).sum::<usize>();

        let mut out = vec![0x03, 26, 8, 25];
        out.extend_from_slice(&(records.len() as u32).to_le_bytes());
        out.extend_from_slice(&(header_len as u16).to_le_bytes());
        out.extend_from_slice(&(record_len as u16).to_le_bytes());
        out.extend_from_slice(&[0u8; 20]);

        for (name, tag, width) in fields {
            let mut name_bytes = name.as_bytes().to_vec();
            name_bytes.resize(11, 0);
            out.extend_from_slice(&name_bytes);
            out.push(*tag);
            out.extend_from_slice(&[0u8; 4]);
            out.push(*width);
            out.push(0);
            out.extend_from_slice(&[0u8; 14]);
        }
        out.push(0x0D);

        for (deleted, values) in records {
            out.push(if *deleted { 0x2A } else { 0x20 });
            for ((_, _, width), value) in fields.iter().zip(values) {
                let mut cell = value.to_vec();
                cell.resize(*width as usize, b' ');
                out.extend_from_slice(&cell);
            }
        }
        out.push(0x1A);
        out
    }

    fn people_fields() -> Vec<(&'static str, u8, u8)> {
        vec![
            ("NAME", b'C', 8),
            ("AGE", b'N', 3),
            ("ACTIVE", b'L', 1),
            ("BORN", b'D', 8),
        ]
    }

    #[test]
    fn parses_rows_in_source_order() {
        let bytes = dbf_bytes(
            &people_fields(),
            &[
                (false, vec![b"Ada", b" 36", b"T", b"18151210"]),
                (false, vec![b"Grace", b" 85", b"F", b"19061209"]),
            ],
        );

        let table = parse_table(&bytes).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 4);
        let names: Vec<&str> = table.schema.field_names().collect();
        assert_eq!(names, ["NAME", "AGE", "ACTIVE", "BORN"]);

        assert_eq!(table.rows[0][0], Value::Bytes(b"Ada".to_vec()));
        assert_eq!(table.rows[0][1], Value::Integer(36));
        assert_eq!(table.rows[0][2], Value::Bool(true));
        assert_eq!(table.rows[1][2], Value::Bool(false));
        match &table.rows[1][3] {
            Value::Date(d) => assert_eq!(d.to_string(), "1906-12-09"),
            other => panic!("expected date, got {other:?}"),
        }
    }

    #[test]
    fn zero_records_keeps_declared_schema() {
        let bytes = dbf_bytes(&people_fields(), &[]);
        let table = parse_table(&bytes).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.schema.fields[0].field_type, FieldType::Character);
    }

    #[test]
    fn deleted_records_are_skipped() {
        let bytes = dbf_bytes(
            &people_fields(),
            &[
                (false, vec![b"Ada", b" 36", b"T", b"18151210"]),
                (true, vec![b"Ghost", b"  1", b"F", b"19000101"]),
                (false, vec![b"Grace", b" 85", b"F", b"19061209"]),
            ],
        );
        let table = parse_table(&bytes).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[1][0], Value::Bytes(b"Grace".to_vec()));
    }

    #[test]
    fn numeric_with_decimals_parses_as_float() {
        let mut fields = vec![("PRICE", b'N', 7)];
        let mut bytes = dbf_bytes(&fields, &[(false, vec![b"  12.50"])]);
        // Patch the decimal count byte of the single descriptor.
        bytes[32 + 17] = 2;
        let table = parse_table(&bytes).unwrap();
        assert_eq!(table.rows[0][0], Value::Float(12.5));

        // And without decimals the same digits stay integral.
        fields[0].0 = "COUNT";
        let bytes = dbf_bytes(&fields, &[(false, vec![b"     12"])]);
        let table = parse_table(&bytes).unwrap();
        assert_eq!(table.rows[0][0], Value::Integer(12));
    }

    #[test]
    fn blank_cells_become_null() {
        let bytes = dbf_bytes(
            &people_fields(),
            &[(false, vec![b"", b"", b"?", b""])],
        );
        let table = parse_table(&bytes).unwrap();
        assert_eq!(table.rows[0][0], Value::Bytes(Vec::new()));
        assert_eq!(table.rows[0][1], Value::Null);
        assert_eq!(table.rows[0][2], Value::Null);
        assert_eq!(table.rows[0][3], Value::Null);
    }

    #[test]
    fn high_bytes_survive_as_raw_bytes() {
        let bytes = dbf_bytes(
            &[("CITY", b'C', 8)],
            &[(false, vec![&[b'L', b'e', b'\xF3', b'n']])],
        );
        let table = parse_table(&bytes).unwrap();
        assert_eq!(table.rows[0][0], Value::Bytes(vec![b'L', b'e', 0xF3, b'n']));
    }

    #[test]
    fn short_file_is_corrupt() {
        let err = parse_table(&[0x03, 0x00]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Read);
        assert!(matches!(err, ConvertError::Corrupt { .. }));
    }

    #[test]
    fn truncated_record_data_is_corrupt() {
        let mut bytes = dbf_bytes(
            &people_fields(),
            &[(false, vec![b"Ada", b" 36", b"T", b"18151210"])],
        );
        bytes.truncate(bytes.len() - 10);
        let err = parse_table(&bytes).unwrap_err();
        assert!(matches!(err, ConvertError::Corrupt { .. }));
    }

    #[test]
    fn mismatched_record_length_is_corrupt() {
        let mut bytes = dbf_bytes(&people_fields(), &[]);
        // Declare a record length that disagrees with the field widths.
        bytes[10] = 99;
        bytes[11] = 0;
        let err = parse_table(&bytes).unwrap_err();
        assert!(matches!(err, ConvertError::Corrupt { .. }));
    }
}
