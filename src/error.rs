use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON cache error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration source error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Image rendering error: {0}")]
    Image(#[from] image::ImageError),

    #[error("A result file for this dataset already exists: {}. Move or rename it before proceeding", path.display())]
    ResultExists { path: PathBuf },

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Wrong number of rows in {}: {remaining} rows remain after year {year}, not a multiple of {rows_per_year}", file.display())]
    RowCountMismatch {
        file: PathBuf,
        year: String,
        remaining: usize,
        rows_per_year: usize,
    },

    #[error("Year {year} in {} has {found} rows, expected {expected}", file.display())]
    ShortYearBlock {
        file: PathBuf,
        year: String,
        found: usize,
        expected: usize,
    },

    #[error("{count} rows in {} do not belong to any year", file.display())]
    OrphanRows { file: PathBuf, count: usize },

    #[error("Year {year} appears more than once in {}", file.display())]
    DuplicateYear { file: PathBuf, year: String },

    #[error("Invalid cell value '{value}' at {}:{line}", file.display())]
    InvalidCell {
        file: PathBuf,
        line: usize,
        value: String,
    },

    #[error("Datasets not mergeable: {0}")]
    DatasetMismatch(String),

    #[error("Year {year} not found in {dataset} dataset")]
    YearNotFound { dataset: String, year: String },

    #[error("Not enough values for the requested years in {dataset} dataset: need {needed}, {available} available")]
    ValueUnderflow {
        dataset: String,
        needed: usize,
        available: usize,
    },

    #[error("Data type not supported: '{0}' (expected 'temp' or 'prec')")]
    UnsupportedCategory(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
