//! Spreadsheet writers.
//!
//! [`write_table`] serializes a normalized [`Table`] with the engine chosen
//! by [`crate::engine::select_engine`]: header row from the schema, then one
//! output row per record, source column order preserved. Writers reject
//! [`crate::types::Value::Bytes`] cells — normalization must run first.

pub mod csv;
#[cfg(feature = "xlsx")]
pub mod xlsx;

use std::path::Path;

use crate::engine::{EngineKind, SelectedEngine};
use crate::error::ConvertResult;
use crate::types::Table;

/// Write `table` to `path` with the chosen engine.
///
/// An engine that was selected but is not compiled into this build fails with
/// [`ConvertError::MissingDependency`] (the availability check and the write
/// are separate steps, and only the write is authoritative).
pub fn write_table(table: &Table, engine: &SelectedEngine, path: &Path) -> ConvertResult<()> {
    match engine.kind {
        EngineKind::Xlsx => {
            // Avoid unused warnings when the feature is off.
            let _ = (table, path);

            #[cfg(feature = "xlsx")]
            {
                xlsx::write_xlsx(table, path)
            }

            #[cfg(not(feature = "xlsx"))]
            {
                Err(crate::error::ConvertError::MissingDependency(
                    "xlsx output engine (enable cargo feature 'xlsx')",
                ))
            }
        }
        EngineKind::Csv => csv::write_csv(table, path),
    }
}
