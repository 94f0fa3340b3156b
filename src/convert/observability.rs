//! Conversion outcome reporting.
//!
//! Per-file successes and failures are reported to an optional
//! [`ConversionObserver`]; the orchestrator itself never prints. Full
//! diagnostic detail goes to the observer, the batch result only carries the
//! short per-file message.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ConvertError;

/// Severity classification used for observer callbacks and alert thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal, typically a user mistake).
    Warning,
    /// Error-level event (the conversion failed).
    Error,
    /// Critical error (I/O or other infrastructure failures).
    Critical,
}

/// Context about one conversion attempt.
#[derive(Debug, Clone)]
pub struct ConversionContext {
    /// The cleaned input path.
    pub input: PathBuf,
}

/// Stats reported on a successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    /// Number of data rows written.
    pub rows: usize,
    /// The produced output path.
    pub output: PathBuf,
}

/// Observer interface for conversion outcomes.
///
/// Implementors can record logs, update a UI status line, or trigger alerts.
pub trait ConversionObserver: Send + Sync {
    /// Called when one file converts successfully.
    fn on_success(&self, _ctx: &ConversionContext, _stats: &ConversionStats) {}

    /// Called when one file fails to convert.
    fn on_failure(&self, _ctx: &ConversionContext, _severity: Severity, _error: &ConvertError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ConversionContext, severity: Severity, error: &ConvertError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Classify an error for observer reporting.
///
/// I/O-rooted failures are infrastructure problems and rank `Critical`;
/// a path that merely is not a `.dbf` file is only a `Warning`.
pub fn severity_for_error(error: &ConvertError) -> Severity {
    match error {
        ConvertError::Read(_) | ConvertError::Write(_) => Severity::Critical,
        ConvertError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        ConvertError::UnsupportedInput { .. } => Severity::Warning,
        _ => Severity::Error,
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ConversionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ConversionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ConversionObserver for CompositeObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: &ConversionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: Severity, error: &ConvertError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: Severity, error: &ConvertError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs conversion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ConversionObserver for StdErrObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: &ConversionStats) {
        eprintln!(
            "[convert][ok] input={} rows={} output={}",
            ctx.input.display(),
            stats.rows,
            stats.output.display()
        );
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: Severity, error: &ConvertError) {
        eprintln!(
            "[convert][{severity:?}] input={} err={error}",
            ctx.input.display()
        );
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: Severity, error: &ConvertError) {
        eprintln!(
            "[ALERT][convert][{severity:?}] input={} err={error}",
            ctx.input.display()
        );
    }
}

/// Appends conversion events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are
    /// ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ConversionObserver for FileObserver {
    fn on_success(&self, ctx: &ConversionContext, stats: &ConversionStats) {
        self.append_line(&format!(
            "{} ok input={} rows={} output={}",
            unix_ts(),
            ctx.input.display(),
            stats.rows,
            stats.output.display()
        ));
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: Severity, error: &ConvertError) {
        self.append_line(&format!(
            "{} fail severity={severity:?} input={} err={error}",
            unix_ts(),
            ctx.input.display()
        ));
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: Severity, error: &ConvertError) {
        self.append_line(&format!(
            "{} ALERT severity={severity:?} input={} err={error}",
            unix_ts(),
            ctx.input.display()
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
