use std::io;

/// Result type alias for loading and startup
pub type Result<T> = std::result::Result<T, ViewError>;

/// Errors that abort loading or startup. Everything after a successful load
/// is reported through status values instead.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row length differs from the first row with strict columns enabled
    #[error("row {row} has {found} columns, expected {expected}")]
    StrictColumns {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("no data found")]
    EmptyInput,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid theme: {0}")]
    Theme(String),
}
