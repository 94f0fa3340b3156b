//! Conversion orchestrator.
//!
//! [`convert_file`] drives Reader → Normalizer → Engine Selector → Writer for
//! one input; [`convert_batch`] maps a list of inputs to one
//! [`ConversionResult`] each, never aborting the remaining batch because one
//! file failed. Processing is strictly sequential on the caller's thread and
//! no file is retried.

pub mod observability;
pub mod paths;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::engine::{select_engine, EngineAvailability};
use crate::error::{ConvertError, ConvertResult, ErrorKind};
use crate::normalize::normalize;
use crate::reader::read_table;
use crate::writer::write_table;

pub use observability::{
    severity_for_error, CompositeObserver, ConversionContext, ConversionObserver, ConversionStats,
    FileObserver, Severity, StdErrObserver,
};

/// Options controlling conversion behavior.
///
/// Use [`Default`] for common cases: detected availability, output next to
/// the input, no observer.
#[derive(Clone)]
pub struct ConversionOptions {
    /// Capability report; inject a fake one in tests.
    pub availability: EngineAvailability,
    /// Where to place outputs; `None` means next to each input.
    pub output_dir: Option<PathBuf>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ConversionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for ConversionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionOptions")
            .field("availability", &self.availability)
            .field("output_dir", &self.output_dir)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            availability: EngineAvailability::detect(),
            output_dir: None,
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Outcome of converting one input path.
#[derive(Debug)]
pub struct ConversionResult {
    /// The cleaned input path this result refers to.
    pub input: PathBuf,
    /// The produced output path, or the error that stopped this file.
    pub outcome: Result<PathBuf, ConvertError>,
}

impl ConversionResult {
    /// Whether this file converted.
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The produced output path, if any.
    pub fn output(&self) -> Option<&Path> {
        self.outcome.as_ref().ok().map(PathBuf::as_path)
    }
}

/// Serializable batch-level status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Count of files converted.
    pub converted: usize,
    /// Count of files that failed.
    pub failed: usize,
    /// Short description of each failure.
    pub failures: Vec<FailureSummary>,
}

/// One failed file in a [`BatchSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureSummary {
    /// The input path that failed.
    pub input: PathBuf,
    /// Reporting category of the error.
    pub kind: ErrorKind,
    /// Short human-readable message.
    pub message: String,
}

impl BatchSummary {
    /// Aggregate per-file results into counts and failure messages.
    pub fn from_results(results: &[ConversionResult]) -> Self {
        let mut summary = Self {
            converted: 0,
            failed: 0,
            failures: Vec::new(),
        };
        for result in results {
            match &result.outcome {
                Ok(_) => summary.converted += 1,
                Err(error) => {
                    summary.failed += 1;
                    summary.failures.push(FailureSummary {
                        input: result.input.clone(),
                        kind: error.kind(),
                        message: error.to_string(),
                    });
                }
            }
        }
        summary
    }
}

/// Convert one `.dbf` file, returning the produced output path.
///
/// The input path is cleaned of drop artifacts first; then it must carry the
/// `.dbf` extension ([`ConvertError::UnsupportedInput`] otherwise) and exist
/// ([`ConvertError::Read`] otherwise).
pub fn convert_file(path: impl AsRef<Path>, options: &ConversionOptions) -> ConvertResult<PathBuf> {
    convert_file_inner(path.as_ref(), options).map(|(output, _rows)| output)
}

fn convert_file_inner(
    path: &Path,
    options: &ConversionOptions,
) -> ConvertResult<(PathBuf, usize)> {
    let input = paths::clean_dropped_path(path);

    if !paths::has_source_extension(&input) {
        return Err(ConvertError::UnsupportedInput {
            path: input,
            message: format!("expected a .{} file", paths::SOURCE_EXTENSION),
        });
    }
    if !options.availability.dbf {
        return Err(ConvertError::MissingDependency(
            "dbf table reader (enable cargo feature 'dbf')",
        ));
    }
    if !input.is_file() {
        return Err(ConvertError::Read(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("no such file: {}", input.display()),
        )));
    }

    let engine = select_engine(&options.availability)?;
    let table = normalize(read_table(&input)?);
    let rows = table.row_count();

    let output = paths::output_path_for(&input, options.output_dir.as_deref(), engine.extension);
    write_table(&table, &engine, &output)?;
    Ok((output, rows))
}

/// Convert a batch of inputs, one [`ConversionResult`] per input.
///
/// Every per-file error is caught here; a corrupt file in the middle of the
/// batch does not stop the files after it. When an observer is configured,
/// each outcome is reported as it happens.
pub fn convert_batch<P: AsRef<Path>>(
    inputs: &[P],
    options: &ConversionOptions,
) -> Vec<ConversionResult> {
    inputs
        .iter()
        .map(|path| {
            let input = paths::clean_dropped_path(path.as_ref());
            let outcome = convert_file_inner(path.as_ref(), options);

            if let Some(observer) = options.observer.as_ref() {
                let ctx = ConversionContext {
                    input: input.clone(),
                };
                match &outcome {
                    Ok((output, rows)) => observer.on_success(
                        &ctx,
                        &ConversionStats {
                            rows: *rows,
                            output: output.clone(),
                        },
                    ),
                    Err(error) => {
                        let severity = severity_for_error(error);
                        observer.on_failure(&ctx, severity, error);
                        if severity >= options.alert_at_or_above {
                            observer.on_alert(&ctx, severity, error);
                        }
                    }
                }
            }

            ConversionResult {
                input,
                outcome: outcome.map(|(output, _rows)| output),
            }
        })
        .collect()
}
