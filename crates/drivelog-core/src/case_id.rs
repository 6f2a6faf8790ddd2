use polars::prelude::*;
use thiserror::Error;

pub const CASE_ID_COLUMN: &str = "case_id";
pub const CASE_ID_SEPARATOR: char = '_';

#[derive(Debug, Error)]
pub enum CaseIdError {
    #[error("polars operation failed: {0}")]
    Polars(#[from] PolarsError),
    #[error("case_id has already been assigned")]
    AlreadyAssigned,
    #[error("row {row} has no game_id/drive to derive a case_id from")]
    MissingKey { row: usize },
}

/// `{game_id}_{drive}`, both parts verbatim.
pub fn case_id(game_id: &str, drive: &str) -> String {
    format!("{game_id}{CASE_ID_SEPARATOR}{drive}")
}

/// Appends the `case_id` column. Must run after scope filtering so identifiers only
/// exist for in-scope possessions.
pub fn assign_case_ids(df: &DataFrame) -> Result<DataFrame, CaseIdError> {
    if df.column(CASE_ID_COLUMN).is_ok() {
        return Err(CaseIdError::AlreadyAssigned);
    }

    let game_ids = df.column("game_id")?.str()?;
    let drives = df.column("drive")?.str()?;

    let mut case_ids = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        match (game_ids.get(idx), drives.get(idx)) {
            (Some(game_id), Some(drive)) => case_ids.push(case_id(game_id, drive)),
            _ => return Err(CaseIdError::MissingKey { row: idx }),
        }
    }

    let case_ids: Vec<&str> = case_ids.iter().map(String::as_str).collect();
    let mut output = df.clone();
    output.hstack_mut(&[Series::new(CASE_ID_COLUMN.into(), case_ids).into()])?;

    Ok(output)
}
