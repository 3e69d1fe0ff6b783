//! Error types for listview.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions into the top-level [`AppError`].
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned by the binary's main logic
//!   - [`ConfigError`] - Config file and screen definition failures
//!   - [`InputError`] - Record file loading failures (missing file, IO, bad JSON)
//!   - [`StateError`] - Host asked for a filter, value or sort key the screen does not declare
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - `serde_json::Error` - The computed view could not be serialized
//!
//! [`RecordError`] is deliberately absent from `AppError`: a malformed element in a
//! record export is logged and skipped, the remaining records still load.
//!
//! The engine itself (filtering, sorting, paging, windowing) has no error paths.
//! Missing fields and out-of-range page numbers are absorbed, never reported.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
///
/// # Examples
///
/// ```no_run
/// use listview::model::error::{AppError, InputError};
///
/// fn run() -> Result<(), AppError> {
///     // InputError converts to AppError via From
///     let _records = load()?;
///     Ok(())
/// }
/// # fn load() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or a screen definition is invalid.
    ///
    /// Fatal: the host cannot build a list screen without a valid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The record collection could not be read.
    #[error("Failed to read records: {0}")]
    Input(#[from] InputError),

    /// A state transition was rejected (unknown filter, value or sort key).
    #[error("Invalid list state: {0}")]
    State(#[from] StateError),

    /// Tracing could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The view could not be serialized for output.
    #[error("Failed to write view: {0}")]
    Output(#[from] serde_json::Error),
}

/// Errors encountered when loading a record collection from disk.
///
/// The engine never fetches data itself. These errors belong to the CLI adapter,
/// which reads an exported JSON array standing in for the fetched collection.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified record file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use listview::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.json"),
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.json"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// No file given and stdin is a terminal.
    #[error("No input source: provide a records file path or pipe a JSON array to stdin")]
    NoInput,

    /// The file is not syntactically valid JSON.
    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser error message.
        message: String,
    },

    /// The file is valid JSON but its top level is not an array of records.
    #[error("Expected a JSON array of records in {path}, found {found}")]
    NotAnArray {
        /// File with the unexpected shape.
        path: PathBuf,
        /// JSON type found at the top level (e.g. "object").
        found: &'static str,
    },

    /// Generic I/O error reading the file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single element of a record export could not be turned into a record.
///
/// Non-fatal: the element is skipped and the error is logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The element is not a JSON object.
    #[error("Record {index}: expected an object, found {found}")]
    NotAnObject {
        /// Zero-based position of the element in the export.
        index: usize,
        /// JSON type found instead.
        found: &'static str,
    },

    /// The element has no usable fields at all.
    #[error("Record {index}: object has no fields")]
    Empty {
        /// Zero-based position of the element in the export.
        index: usize,
    },
}

/// A state transition requested by the host was rejected.
///
/// The state is left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// The screen declares no filter with this name.
    #[error("Unknown filter: {name}")]
    UnknownFilter {
        /// Requested filter name.
        name: String,
    },

    /// The value is not among the filter's allowed values.
    #[error("Value {value:?} is not allowed for filter {filter} (allowed: all, {allowed})")]
    DisallowedValue {
        /// Filter being set.
        filter: String,
        /// Rejected value.
        value: String,
        /// Comma-separated allowed values.
        allowed: String,
    },

    /// The screen registers no comparator under this key.
    #[error("Unknown sort key: {key}")]
    UnknownSortKey {
        /// Requested sort key.
        key: String,
    },

    /// Page size must be at least 1.
    #[error("Page size must be a positive integer")]
    InvalidPageSize,
}
