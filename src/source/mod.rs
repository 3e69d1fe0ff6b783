//! Record input sources.
//!
//! The engine works on an already materialized collection. This module is the
//! impure shell that produces one from a JSON export: a file, or a JSON array
//! piped to stdin.

use crate::integration::process_records;
use crate::model::error::InputError;
use crate::model::record::json_type_name;
use crate::model::{DynamicRecord, RecordError, RecordSet};
use serde_json::Value;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Path shown in errors for data read from stdin.
pub const STDIN_LABEL: &str = "<stdin>";

/// Where records come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// JSON array file.
    File(PathBuf),
    /// JSON array piped to stdin.
    Stdin,
}

/// Records read from a source plus the elements that were skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedRecords {
    /// Usable records, in export order.
    pub records: Vec<DynamicRecord>,
    /// Elements that could not be turned into records.
    pub skipped: Vec<RecordError>,
}

impl LoadedRecords {
    /// Share the records as an engine input.
    pub fn into_record_set(self) -> RecordSet<DynamicRecord> {
        self.records.into()
    }
}

impl RecordSource {
    /// Path used in error messages.
    pub fn label(&self) -> PathBuf {
        match self {
            RecordSource::File(path) => path.clone(),
            RecordSource::Stdin => PathBuf::from(STDIN_LABEL),
        }
    }

    /// Read and parse every record.
    ///
    /// # Errors
    ///
    /// Returns `InputError` if the data cannot be read, is not JSON, or is not
    /// an array. Individual malformed elements are skipped, not errors.
    pub fn read(&self) -> Result<LoadedRecords, InputError> {
        match self {
            RecordSource::File(path) => load_records(path),
            RecordSource::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                parse_records(&text, &self.label())
            }
        }
    }
}

/// Pick the record source.
///
/// # Logic:
/// 1. `-` reads stdin
/// 2. any other path must exist
/// 3. no path: stdin if it is piped, else [`InputError::NoInput`]
///
/// # Errors
///
/// Returns `InputError::FileNotFound` for a missing file and
/// `InputError::NoInput` when there is nothing to read.
pub fn detect_record_source(file: Option<PathBuf>) -> Result<RecordSource, InputError> {
    match file {
        Some(path) if path.as_os_str() == "-" => Ok(RecordSource::Stdin),
        Some(path) if !path.exists() => Err(InputError::FileNotFound { path }),
        Some(path) => Ok(RecordSource::File(path)),
        None if std::io::stdin().is_terminal() => Err(InputError::NoInput),
        None => Ok(RecordSource::Stdin),
    }
}

/// Load a JSON array of records from `path`.
///
/// # Errors
///
/// `InputError::FileNotFound`, `InputError::Io`, `InputError::InvalidJson`
/// or `InputError::NotAnArray`.
pub fn load_records(path: impl AsRef<Path>) -> Result<LoadedRecords, InputError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(InputError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let text = std::fs::read_to_string(path)?;
    parse_records(&text, path)
}

/// Parse a JSON array of records. `origin` only labels errors.
///
/// # Errors
///
/// `InputError::InvalidJson` or `InputError::NotAnArray`.
pub fn parse_records(text: &str, origin: &Path) -> Result<LoadedRecords, InputError> {
    let value: Value = serde_json::from_str(text).map_err(|e| InputError::InvalidJson {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(InputError::NotAnArray {
                path: origin.to_path_buf(),
                found: json_type_name(&other),
            })
        }
    };

    let (records, skipped) = process_records(items);
    if !skipped.is_empty() {
        warn!(
            path = %origin.display(),
            skipped = skipped.len(),
            "some records could not be loaded"
        );
    }
    info!(path = %origin.display(), records = records.len(), "records loaded");
    Ok(LoadedRecords { records, skipped })
}
