use std::path::PathBuf;

/// Errors produced by the distribution analyzer and its loaders
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The input resource does not exist. Callers usually recover by
    /// continuing without the dataset.
    #[error("data file {} does not exist", .0.display())]
    DataSourceNotFound(PathBuf),

    #[error("field '{field}' does not exist (available: {})", .available.join(", "))]
    InvalidField {
        field: String,
        available: Vec<String>,
    },

    #[error("dataset has no records")]
    EmptyDataset,

    /// Arithmetic precondition violated, e.g. a zero-variance vector
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("paired vectors differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("unknown label '{value}' at row {row}")]
    UnknownLabel { value: String, row: usize },

    #[error("invalid category set: {0}")]
    InvalidCategorySet(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for AnalysisError {
    fn from(err: csv::Error) -> Self {
        if !err.is_io_error() {
            return AnalysisError::Parse(err.to_string());
        }
        match err.into_kind() {
            csv::ErrorKind::Io(e) => AnalysisError::Io(e),
            other => AnalysisError::Parse(format!("{other:?}")),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            AnalysisError::Io(err.into())
        } else {
            AnalysisError::Parse(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
