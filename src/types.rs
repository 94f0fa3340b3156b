//! Core data model types for conversion.
//!
//! A `.dbf` file is read into an in-memory [`Table`]: a [`Schema`] (the
//! declared columns, in file order) plus row-major [`Value`] storage. The
//! schema is kept even for zero-record files so writers can still emit a
//! header row.

use std::fmt;

/// dBase field type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// `C` — fixed-width character data (raw bytes until normalized).
    Character,
    /// `N` — numeric, stored as ASCII digits.
    Numeric,
    /// `F` — floating point, stored as ASCII digits.
    Float,
    /// `L` — logical (`T`/`F`/`?`).
    Logical,
    /// `D` — date, stored as ASCII `YYYYMMDD`.
    Date,
    /// Any tag this crate does not interpret; values pass through as bytes.
    Unknown(u8),
}

impl FieldType {
    /// Map a raw descriptor tag to a field type.
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            b'C' => Self::Character,
            b'N' => Self::Numeric,
            b'F' => Self::Float,
            b'L' => Self::Logical,
            b'D' => Self::Date,
            other => Self::Unknown(other),
        }
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field type tag from the descriptor.
    pub field_type: FieldType,
    /// Fixed width of the field in bytes.
    pub length: u8,
    /// Declared decimal count; `0` numeric fields parse as integers.
    pub decimal_count: u8,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, field_type: FieldType, length: u8) -> Self {
        Self {
            name: name.into(),
            field_type,
            length,
            decimal_count: 0,
        }
    }
}

/// The declared columns of a table, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

/// A calendar date as stored in a dBase `D` field.
///
/// Kept as plain numbers; `Display` renders ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// A single scalar value in a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// Undecoded bytes from the source file (character fields, unknown tags).
    Bytes(Vec<u8>),
    /// Decoded text.
    Text(String),
    /// Integer (numeric field with zero decimals).
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean from a logical field.
    Bool(bool),
    /// Calendar date.
    Date(Date),
}

impl Value {
    /// Whether this value is still an undecoded byte sequence.
    pub fn is_bytes(&self) -> bool {
        matches!(self, Self::Bytes(_))
    }
}

/// In-memory table read from one source file.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`]
/// fields; every row has exactly `schema.fields.len()` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of data rows (the header is not a row).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of declared columns.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }
}
