//! Error types for the query pipeline, the loaders and the settings file.

use std::fmt;
use std::path::PathBuf;

use crate::data::model::Column;

/// Result type alias for dashboard-level operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to turn an external file into a [`Dataset`](crate::data::model::Dataset).
///
/// A load error never leaves a partial dataset behind; the caller may retry.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source file does not exist.
    #[error("data source {path:?} does not exist")]
    NotFound { path: PathBuf },

    /// I/O failure while reading the source.
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension maps to no known reader.
    #[error("unsupported file extension '.{extension}' for {path:?}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("CSV error in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("spreadsheet error in {path:?}: {source}")]
    Spreadsheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("parquet error in {path:?}: {source}")]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("arrow error in {path:?}: {source}")]
    Arrow {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },

    #[error("JSON error in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The file parsed but its shape is unusable (duplicate headers, no sheets, ...).
    #[error("malformed data in {path:?}: {message}")]
    Malformed { path: PathBuf, message: String },
}

impl LoadError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LoadError::Malformed {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// An operation referenced a column that is unknown, absent, or of the wrong type.
///
/// This is a configuration error, not something an end user can fix by
/// picking another filter value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    /// The name is not part of the schema.
    #[error("unknown column '{name}'")]
    Unknown { name: String },

    /// The column is part of the schema but the dataset does not carry it.
    #[error("column '{column}' is not present in the dataset")]
    Absent { column: Column },

    /// A numeric operation met a text value.
    #[error("column '{column}' is not numeric (row {row} holds '{value}')")]
    NotNumeric {
        column: Column,
        row: usize,
        value: String,
    },
}

/// A value that could not be parsed during numeric coercion and became missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionWarning {
    pub column: Column,
    /// Row position within the coerced dataset.
    pub row: usize,
    pub raw: String,
}

impl fmt::Display for CoercionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}: '{}' in column '{}' is not a number",
            self.row, self.raw, self.column
        )
    }
}

/// Errors raised while reading or validating a settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings: {message}")]
    Invalid { message: String },
}

/// Anything a single dashboard interaction can fail with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Column(#[from] ColumnError),
}
