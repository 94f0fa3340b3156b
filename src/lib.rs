//! `dbf-export` converts legacy dBase (`.dbf`) tables into spreadsheet files
//! placed alongside the originals (or in a directory of your choosing).
//!
//! The pipeline is: read the table into an in-memory [`types::Table`],
//! normalize raw byte values to text ([`normalize`]), pick an output engine
//! from the compiled-in capabilities ([`engine`]), and serialize
//! ([`writer`]). The orchestrator ([`convert`]) runs that pipeline per file
//! and collects per-file results without aborting a batch on the first
//! failure — drop a dozen files, get a dozen results.
//!
//! ## Engines
//!
//! - **xlsx** (cargo feature `xlsx`, on by default): workbook output via
//!   `rust_xlsxwriter`.
//! - **csv** (always available): plain-text fallback.
//!
//! Selection prefers `xlsx` and falls back deterministically; with no engine
//! at all the pipeline fails with a single
//! [`error::ConvertError::MissingDependency`]. The `.dbf` reader itself is
//! gated behind the `dbf` feature (also on by default).
//!
//! ## Quick example: convert a batch
//!
//! ```no_run
//! use dbf_export::{convert_batch, BatchSummary, ConversionOptions};
//!
//! let inputs = ["/data/clients.dbf", "{/data/year end.dbf}"];
//! let results = convert_batch(&inputs, &ConversionOptions::default());
//!
//! let summary = BatchSummary::from_results(&results);
//! println!("converted={} failed={}", summary.converted, summary.failed);
//! for failure in &summary.failures {
//!     eprintln!("{}: {}", failure.input.display(), failure.message);
//! }
//! ```
//!
//! ## Quick example: one file, injected availability
//!
//! ```no_run
//! use dbf_export::{convert_file, ConversionOptions, EngineAvailability};
//!
//! # fn main() -> Result<(), dbf_export::ConvertError> {
//! // Force the csv fallback even when the xlsx engine is compiled in.
//! let options = ConversionOptions {
//!     availability: EngineAvailability { dbf: true, xlsx: false, csv: true },
//!     ..Default::default()
//! };
//! let output = convert_file("/data/clients.dbf", &options)?;
//! println!("wrote {}", output.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Observability
//!
//! Outcomes can be reported to a [`convert::ConversionObserver`]
//! (stderr, append-only file, or your own implementation):
//!
//! ```no_run
//! use std::sync::Arc;
//! use dbf_export::convert::{Severity, StdErrObserver};
//! use dbf_export::{convert_batch, ConversionOptions};
//!
//! let options = ConversionOptions {
//!     observer: Some(Arc::new(StdErrObserver)),
//!     alert_at_or_above: Severity::Critical,
//!     ..Default::default()
//! };
//! let _results = convert_batch(&["/data/clients.dbf"], &options);
//! ```
//!
//! ## Modules
//!
//! - [`convert`]: orchestrator, batch results, path utilities, observability
//! - [`reader`]: dBase file parsing
//! - [`normalize`]: byte-to-text value normalization
//! - [`engine`]: capability probing and engine selection
//! - [`writer`]: xlsx/csv serialization
//! - [`types`]: schema + in-memory table types
//! - [`error`]: error types used across the pipeline

pub mod convert;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod reader;
pub mod types;
pub mod writer;

pub use convert::{
    convert_batch, convert_file, BatchSummary, ConversionOptions, ConversionResult, FailureSummary,
};
pub use engine::{select_engine, EngineAvailability, EngineKind, SelectedEngine};
pub use error::{ConvertError, ConvertResult, ErrorKind};
