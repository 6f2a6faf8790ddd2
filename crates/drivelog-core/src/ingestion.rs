use std::collections::HashSet;

use blake3::Hasher;
use drivelog_parser::{parse_play_by_play, stack_play_by_play, ParsedPlayByPlay};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{PipelineError, Result};

#[derive(Debug)]
pub struct FileInput<'a> {
    pub path: &'a str,
    pub contents: &'a [u8],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Duplicate,
    Parsed,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub hash: String,
    pub status: FileStatus,
    pub rows: usize,
    pub unrecognized_indicators: usize,
}

#[derive(Debug)]
pub struct IngestionBatch {
    pub plays: DataFrame,
    pub reports: Vec<FileReport>,
}

impl IngestionBatch {
    pub fn parsed_files(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.status == FileStatus::Parsed)
            .count()
    }
}

/// Parses every input and stacks them into one play relation.
///
/// Inputs whose content hash was already seen in this batch are skipped so that a file
/// matched twice does not duplicate its plays. Any parse failure aborts the whole batch.
pub fn ingest_files(inputs: &[FileInput<'_>]) -> Result<IngestionBatch> {
    let mut seen_hashes: HashSet<String> = HashSet::new();
    let mut parsed_files: Vec<ParsedPlayByPlay> = Vec::new();
    let mut reports = Vec::with_capacity(inputs.len());

    for input in inputs {
        let hash = compute_hash(input.contents);
        if !seen_hashes.insert(hash.clone()) {
            warn!(path = input.path, hash = %hash, "skipping duplicate input");
            reports.push(FileReport {
                path: input.path.to_string(),
                hash,
                status: FileStatus::Duplicate,
                rows: 0,
                unrecognized_indicators: 0,
            });
            continue;
        }

        let content = std::str::from_utf8(input.contents).map_err(|_| PipelineError::Encoding {
            path: input.path.to_string(),
        })?;
        let parsed = parse_play_by_play(content).map_err(|source| PipelineError::Parse {
            path: input.path.to_string(),
            source,
        })?;

        if parsed.summary.unrecognized_indicators > 0 {
            warn!(
                path = input.path,
                cells = parsed.summary.unrecognized_indicators,
                "indicator values outside 0/1 were read as 0"
            );
        }
        info!(path = input.path, rows = parsed.summary.rows, "parsed play-by-play file");

        reports.push(FileReport {
            path: input.path.to_string(),
            hash,
            status: FileStatus::Parsed,
            rows: parsed.summary.rows,
            unrecognized_indicators: parsed.summary.unrecognized_indicators,
        });
        parsed_files.push(parsed);
    }

    let refs: Vec<&ParsedPlayByPlay> = parsed_files.iter().collect();
    let plays = stack_play_by_play(&refs).map_err(|source| PipelineError::Parse {
        path: "<stacked inputs>".to_string(),
        source,
    })?;

    Ok(IngestionBatch { plays, reports })
}

pub fn compute_hash(contents: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents);
    let hash = hasher.finalize();
    hash.to_hex().to_string()
}
