use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("file did not contain a header row")]
    EmptyHeader,

    #[error("missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("data row {line_index} invalid: {message}")]
    DataRow { line_index: u64, message: String },

    #[error("failed to build play-by-play frame: {0}")]
    Polars(#[from] PolarsError),
}
