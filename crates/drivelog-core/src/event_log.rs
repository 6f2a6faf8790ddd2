use polars::prelude::*;
use thiserror::Error;

use crate::columns;

/// The process-mining triple every consumer keys on.
pub const CORE_COLUMNS: [&str; 3] = ["case_id", "activity_name", "transformed_time"];

/// Output column contract: core triple, play context, possession outcome, personnel.
pub const EVENT_LOG_COLUMNS: [&str; 29] = [
    "case_id",
    "activity_name",
    "transformed_time",
    "game_id",
    "drive",
    "play_type",
    "time",
    "pass_length",
    "pass_location",
    "run_location",
    "run_gap",
    "field_goal_result",
    "extra_point_result",
    "two_point_conv_result",
    "touchdown",
    "interception",
    "fumble",
    "desc",
    "down",
    "yards_gained",
    "quarter_seconds_remaining",
    "posteam",
    "drive_touchdown",
    "drive_field_goal",
    "drive_any_score",
    "drive_turnover",
    "passer",
    "receiver",
    "runner",
];

#[derive(Debug, Error)]
pub enum AssemblyError {
    #[error("polars operation failed: {0}")]
    Polars(#[from] PolarsError),
    #[error("cannot assemble event log, missing columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },
}

/// Projects enriched plays onto `EVENT_LOG_COLUMNS`, in that order. No values change.
pub fn assemble_event_log(df: &DataFrame) -> Result<DataFrame, AssemblyError> {
    let missing = columns::missing_columns(df, &EVENT_LOG_COLUMNS);
    if !missing.is_empty() {
        return Err(AssemblyError::MissingColumns { missing });
    }
    Ok(df.select(EVENT_LOG_COLUMNS)?)
}
