// crates/drivelog-core/src/error.rs

use drivelog_parser::ParserError;
use thiserror::Error;

use crate::case_id::CaseIdError;
use crate::event_log::AssemblyError;
use crate::temporal::TemporalError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{path} could not be parsed: {source}")]
    Parse {
        path: String,
        #[source]
        source: ParserError,
    },

    #[error("{path} is not valid UTF-8")]
    Encoding { path: String },

    #[error("input is missing columns required by the pipeline: {}", .missing.join(", "))]
    MissingInputColumns { missing: Vec<&'static str> },

    #[error(transparent)]
    CaseId(#[from] CaseIdError),

    #[error(transparent)]
    Temporal(#[from] TemporalError),

    #[error(transparent)]
    Assembly(#[from] AssemblyError),

    #[error("Event log validation failed: {0}")]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
