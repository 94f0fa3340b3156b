//! Output engine selection.
//!
//! Which engines exist in a given build is a deployment property, not an
//! input property: [`EngineAvailability::detect`] probes the compiled-in
//! capabilities once, and the report is passed explicitly into the selector
//! and the orchestrator so tests can inject fake availability.
//!
//! The preference order is fixed: `xlsx` first, then the plain-text `csv`
//! fallback. If nothing is available, selection fails with a single
//! [`ConvertError::MissingDependency`] instead of letting a writer crash
//! later.

use std::fmt;

use serde::Serialize;

use crate::error::{ConvertError, ConvertResult};

/// A pluggable serialization backend for one spreadsheet file variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Office Open XML workbook via `rust_xlsxwriter`.
    Xlsx,
    /// Comma-separated values via the `csv` crate.
    Csv,
}

impl EngineKind {
    /// Output file extension for this engine.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Capability report for the current build, computed once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineAvailability {
    /// dBase table-reading capability (cargo feature `dbf`).
    pub dbf: bool,
    /// XLSX output engine (cargo feature `xlsx`).
    pub xlsx: bool,
    /// CSV fallback engine; always compiled in.
    pub csv: bool,
}

impl EngineAvailability {
    /// Probe the compiled-in capabilities.
    pub fn detect() -> Self {
        Self {
            dbf: cfg!(feature = "dbf"),
            xlsx: cfg!(feature = "xlsx"),
            csv: true,
        }
    }
}

impl Default for EngineAvailability {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for EngineAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn status(present: bool) -> &'static str {
            if present { "available" } else { "missing" }
        }
        write!(
            f,
            "dbf reader: {}\nxlsx engine: {}\ncsv engine: {}",
            status(self.dbf),
            status(self.xlsx),
            status(self.csv)
        )
    }
}

/// The chosen output engine plus the file extension it implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectedEngine {
    /// Engine backend.
    pub kind: EngineKind,
    /// Output extension, without the leading dot.
    pub extension: &'static str,
}

/// Pick the output engine for this run.
///
/// Deterministic: the same availability always yields the same choice.
pub fn select_engine(availability: &EngineAvailability) -> ConvertResult<SelectedEngine> {
    let kind = if availability.xlsx {
        EngineKind::Xlsx
    } else if availability.csv {
        EngineKind::Csv
    } else {
        return Err(ConvertError::MissingDependency(
            "no spreadsheet output engine is available",
        ));
    };
    Ok(SelectedEngine {
        kind,
        extension: kind.extension(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn prefers_xlsx_when_available() {
        let availability = EngineAvailability {
            dbf: true,
            xlsx: true,
            csv: true,
        };
        let engine = select_engine(&availability).unwrap();
        assert_eq!(engine.kind, EngineKind::Xlsx);
        assert_eq!(engine.extension, "xlsx");
    }

    #[test]
    fn falls_back_to_csv() {
        let availability = EngineAvailability {
            dbf: true,
            xlsx: false,
            csv: true,
        };
        let engine = select_engine(&availability).unwrap();
        assert_eq!(engine.kind, EngineKind::Csv);
        assert_eq!(engine.extension, "csv");
    }

    #[test]
    fn nothing_available_is_a_missing_dependency() {
        let availability = EngineAvailability {
            dbf: true,
            xlsx: false,
            csv: false,
        };
        let err = select_engine(&availability).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingDependency);
    }

    #[test]
    fn selection_is_deterministic() {
        let availability = EngineAvailability::detect();
        assert_eq!(
            select_engine(&availability).unwrap(),
            select_engine(&availability).unwrap()
        );
    }
}
