use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::ingestion::compute_hash;
use crate::pipelines::PipelineSummary;
use crate::validation::ValidationReport;

/// Where the event log landed and what exactly was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputArtifacts {
    pub path: PathBuf,
    pub row_count: usize,
    pub content_hash: String,
}

#[derive(Debug, Serialize)]
struct RunSummary<'a> {
    pipeline: &'a PipelineSummary,
    validation: &'a ValidationReport,
    output: Option<&'a OutputArtifacts>,
}

/// Serializes the log as comma-separated text with a header row.
pub fn event_log_csv_bytes(df: &mut DataFrame) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    CsvWriter::new(&mut buffer).include_header(true).finish(df)?;
    Ok(buffer)
}

/// Writes the event log to `path`, creating parent directories. Identical frames produce
/// identical bytes, so `content_hash` is stable across reruns.
pub fn write_event_log_csv(df: &mut DataFrame, path: &Path) -> Result<OutputArtifacts> {
    let bytes = event_log_csv_bytes(df)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, &bytes)?;

    let artifacts = OutputArtifacts {
        path: path.to_path_buf(),
        row_count: df.height(),
        content_hash: compute_hash(&bytes),
    };
    info!(
        path = %artifacts.path.display(),
        rows = artifacts.row_count,
        hash = %artifacts.content_hash,
        "wrote event log"
    );

    Ok(artifacts)
}

/// Writes a pretty-printed JSON record of the run next to (or instead of) the log.
pub fn write_run_summary(
    summary: &PipelineSummary,
    report: &ValidationReport,
    output: Option<&OutputArtifacts>,
    path: &Path,
) -> Result<()> {
    let record = RunSummary {
        pipeline: summary,
        validation: report,
        output,
    };
    let json = serde_json::to_vec_pretty(&record)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)?;
    info!(path = %path.display(), "wrote run summary");
    Ok(())
}
