use std::collections::{BTreeSet, HashMap};

use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::activity::ACTIVITY_COLUMN;
use crate::case_id::CASE_ID_COLUMN;
use crate::columns;
use crate::event_log::CORE_COLUMNS;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("polars operation failed: {0}")]
    Polars(#[from] PolarsError),
    #[error("event log is missing core columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },
    #[error("event log is empty")]
    Empty,
    #[error("column '{column}' has {count} null values")]
    NullValues { column: &'static str, count: usize },
    #[error("event log should only contain plays by {expected}, found: {}", .found.join(", "))]
    UnexpectedTeams { expected: String, found: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityCount {
    pub activity: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub events: usize,
    pub cases: usize,
    pub activity_types: usize,
    /// Descending by count, ties broken by label.
    pub activity_counts: Vec<ActivityCount>,
}

impl ValidationReport {
    pub fn top_activities(&self, n: usize) -> &[ActivityCount] {
        let end = n.min(self.activity_counts.len());
        &self.activity_counts[..end]
    }
}

/// Checks the finished log and summarizes it.
pub fn validate_event_log(df: &DataFrame, team: &str) -> Result<ValidationReport, ValidationError> {
    let missing = columns::missing_columns(df, &CORE_COLUMNS);
    if !missing.is_empty() {
        return Err(ValidationError::MissingColumns { missing });
    }
    if df.height() == 0 {
        return Err(ValidationError::Empty);
    }

    let case_ids = df.column(CASE_ID_COLUMN)?.str()?;
    let activities = df.column(ACTIVITY_COLUMN)?.str()?;
    for (column, values) in [(CASE_ID_COLUMN, case_ids), (ACTIVITY_COLUMN, activities)] {
        let count = values.null_count();
        if count > 0 {
            return Err(ValidationError::NullValues { column, count });
        }
    }

    if df.column("posteam").is_ok() {
        let teams = df.column("posteam")?.str()?;
        let found: BTreeSet<String> = teams
            .into_iter()
            .flatten()
            .filter(|value| *value != team)
            .map(str::to_string)
            .collect();
        if !found.is_empty() {
            return Err(ValidationError::UnexpectedTeams {
                expected: team.to_string(),
                found: found.into_iter().collect(),
            });
        }
    }

    let cases: BTreeSet<&str> = case_ids.into_iter().flatten().collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for activity in activities.into_iter().flatten() {
        *counts.entry(activity).or_insert(0) += 1;
    }

    let mut activity_counts: Vec<ActivityCount> = counts
        .into_iter()
        .map(|(activity, count)| ActivityCount {
            activity: activity.to_string(),
            count,
        })
        .collect();
    activity_counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.activity.cmp(&b.activity)));

    let report = ValidationReport {
        events: df.height(),
        cases: cases.len(),
        activity_types: activity_counts.len(),
        activity_counts,
    };
    info!(
        events = report.events,
        cases = report.cases,
        activity_types = report.activity_types,
        "event log validated"
    );

    Ok(report)
}
