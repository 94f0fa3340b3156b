use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Convenience result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Error type returned across the conversion pipeline.
///
/// This is a single error enum shared by the reader, the writers and the
/// orchestrator. [`ConvertError::kind`] collapses the variants into the four
/// reporting categories callers care about.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A required capability (reader or output engine) is not compiled in.
    #[error("missing dependency: {0}")]
    MissingDependency(&'static str),

    /// The input path does not look like a convertible source file.
    #[error("unsupported input {path:?}: {message}")]
    UnsupportedInput { path: PathBuf, message: String },

    /// Underlying I/O error while reading the source file.
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),

    /// The source file does not parse as a dBase table.
    #[error("corrupt dbf file: {message}")]
    Corrupt { message: String },

    /// Underlying I/O error while writing the output file.
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),

    #[cfg(feature = "xlsx")]
    /// XLSX serialization error (feature-gated behind `xlsx`).
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// CSV serialization error.
    #[error("csv write error: {0}")]
    Csv(#[from] csv::Error),

    /// A raw byte value reached a writer. Writers only accept normalized
    /// tables; run [`crate::normalize::normalize`] first.
    #[error("column '{column}' still holds raw bytes; normalize the table before writing")]
    RawBytes { column: String },

    /// The table exceeds a hard worksheet limit of the chosen engine.
    #[error("worksheet limit exceeded: {message}")]
    SheetLimit { message: String },
}

/// Reporting category of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required capability is absent from the build/environment.
    MissingDependency,
    /// The source file is missing, unreadable or corrupt.
    Read,
    /// The path does not match the expected source type.
    UnsupportedInput,
    /// The destination is not writable or serialization failed.
    Write,
}

impl ConvertError {
    /// Classify this error into one of the four reporting categories.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingDependency(_) => ErrorKind::MissingDependency,
            Self::UnsupportedInput { .. } => ErrorKind::UnsupportedInput,
            Self::Read(_) | Self::Corrupt { .. } => ErrorKind::Read,
            #[cfg(feature = "xlsx")]
            Self::Xlsx(_) => ErrorKind::Write,
            Self::Write(_) | Self::Csv(_) | Self::RawBytes { .. } | Self::SheetLimit { .. } => {
                ErrorKind::Write
            }
        }
    }
}
