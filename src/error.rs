use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while reading the survey table.
///
/// Loading is the only fallible stage: once a [`SurveyTable`] exists, the
/// filter / aggregate / present pipeline is total.
///
/// [`SurveyTable`]: crate::data::model::SurveyTable
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    /// A columnar source stores a required column with an unusable type.
    #[error("Column '{column}' has unsupported type {found}")]
    ColumnType { column: String, found: String },

    /// `row` is 1-based and counts data rows only (the header is not a row).
    #[error("Row {row}: Value '{value}' is not a number")]
    InvalidValue { row: usize, value: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}
