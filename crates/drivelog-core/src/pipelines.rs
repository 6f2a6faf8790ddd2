use std::collections::HashSet;

use anyhow::Context;
use once_cell::sync::Lazy;
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::info;

use crate::{
    activity::{self, ACTIVITY_COLUMN},
    case_id::{self, CASE_ID_COLUMN},
    columns,
    error::{PipelineError, Result},
    event_log, outcomes, scope,
    temporal::{self, PeriodMode, TemporalConfig, PERIOD_COLUMN, TRANSFORMED_TIME_COLUMN},
};
use drivelog_parser::schema::raw_column_names;

pub const DEFAULT_TEAM: &str = "NE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Possession team code the log is scoped to, matched exactly.
    pub team: String,
    pub temporal: TemporalConfig,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self {
            team: DEFAULT_TEAM.to_string(),
            temporal: TemporalConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineSummary {
    pub pipeline: &'static str,
    pub version: &'static str,
    pub team: String,
    pub period_mode: PeriodMode,
    pub input_rows: usize,
    pub drives_aggregated: usize,
    pub in_scope_rows: usize,
    pub events: usize,
    pub cases: usize,
    pub activities: usize,
    pub null_transformed_times: usize,
}

#[derive(Debug)]
pub struct PipelineBatchOutput {
    pub dataframe: DataFrame,
    pub summary: PipelineSummary,
}

pub trait ProcessingPipeline: Send + Sync {
    fn code_identifier(&self) -> &'static str;
    fn version(&self) -> &'static str;
    fn input_data_format(&self) -> &'static str;
    fn run_batch(
        &self,
        context: &ExecutionContext,
        plays: &DataFrame,
    ) -> anyhow::Result<PipelineBatchOutput>;
}

#[derive(Debug, Clone)]
pub struct ProcessingPipelineDescriptor {
    pub code: &'static str,
    pub version: &'static str,
    pub input_data_format: &'static str,
    pub description: &'static str,
}

const POSSESSION_PIPELINE_CODE: &str = "possession_event_log_v1";
const POSSESSION_PIPELINE_VERSION: &str = "0.1.0";
const PLAY_BY_PLAY_FORMAT: &str = "nflverse_play_by_play_csv_v1";

static PIPELINES: Lazy<Vec<ProcessingPipelineDescriptor>> = Lazy::new(|| {
    vec![ProcessingPipelineDescriptor {
        code: POSSESSION_PIPELINE_CODE,
        version: POSSESSION_PIPELINE_VERSION,
        input_data_format: PLAY_BY_PLAY_FORMAT,
        description: "Drive outcomes + team scope + case ids + activity labels + elapsed time",
    }]
});

pub fn all_pipeline_descriptors() -> &'static [ProcessingPipelineDescriptor] {
    PIPELINES.as_slice()
}

static PIPELINE_IMPLEMENTATIONS: Lazy<Vec<&'static dyn ProcessingPipeline>> =
    Lazy::new(|| vec![&PossessionEventLogPipeline as &dyn ProcessingPipeline]);

pub fn all_pipelines() -> &'static [&'static dyn ProcessingPipeline] {
    PIPELINE_IMPLEMENTATIONS.as_slice()
}

pub fn find_pipeline(code: &str) -> Option<&'static dyn ProcessingPipeline> {
    all_pipelines()
        .iter()
        .copied()
        .find(|pipeline| pipeline.code_identifier() == code)
}

/// One event per in-scope play, one case per possession of the configured team.
pub struct PossessionEventLogPipeline;

impl ProcessingPipeline for PossessionEventLogPipeline {
    fn code_identifier(&self) -> &'static str {
        POSSESSION_PIPELINE_CODE
    }

    fn version(&self) -> &'static str {
        POSSESSION_PIPELINE_VERSION
    }

    fn input_data_format(&self) -> &'static str {
        PLAY_BY_PLAY_FORMAT
    }

    fn run_batch(
        &self,
        context: &ExecutionContext,
        plays: &DataFrame,
    ) -> anyhow::Result<PipelineBatchOutput> {
        build_possession_event_log(context, plays)
            .with_context(|| format!("{POSSESSION_PIPELINE_CODE} failed for team {}", context.team))
    }
}

/// Runs every stage in order over the stacked plays. The input frame is never modified.
pub fn build_possession_event_log(
    context: &ExecutionContext,
    plays: &DataFrame,
) -> Result<PipelineBatchOutput> {
    let mut required = raw_column_names();
    if context.temporal.period_mode == PeriodMode::Folded {
        required.push(PERIOD_COLUMN);
    }
    let missing = columns::missing_columns(plays, &required);
    if !missing.is_empty() {
        return Err(PipelineError::MissingInputColumns { missing });
    }
    context.temporal.validate()?;

    let outcomes = outcomes::compute_drive_outcomes(plays)?;
    info!(drives = outcomes.len(), "aggregated drive outcomes");

    let scoped = scope::attach_drive_outcomes(plays, &outcomes, &context.team)?;
    info!(team = %context.team, rows = scoped.height(), "filtered plays to team possessions");

    let with_cases = case_id::assign_case_ids(&scoped)?;
    let classified = activity::classify_activities(&with_cases)?;
    let timed = temporal::apply_transformed_time(&classified, &context.temporal)?;
    let dataframe = event_log::assemble_event_log(&timed)?;

    let cases: HashSet<&str> = dataframe
        .column(CASE_ID_COLUMN)?
        .str()?
        .into_iter()
        .flatten()
        .collect();
    let activities: HashSet<&str> = dataframe
        .column(ACTIVITY_COLUMN)?
        .str()?
        .into_iter()
        .flatten()
        .collect();
    let null_transformed_times = dataframe.column(TRANSFORMED_TIME_COLUMN)?.null_count();

    let summary = PipelineSummary {
        pipeline: POSSESSION_PIPELINE_CODE,
        version: POSSESSION_PIPELINE_VERSION,
        team: context.team.clone(),
        period_mode: context.temporal.period_mode,
        input_rows: plays.height(),
        drives_aggregated: outcomes.len(),
        in_scope_rows: scoped.height(),
        events: dataframe.height(),
        cases: cases.len(),
        activities: activities.len(),
        null_transformed_times,
    };
    info!(
        events = summary.events,
        cases = summary.cases,
        activities = summary.activities,
        "assembled event log"
    );

    Ok(PipelineBatchOutput { dataframe, summary })
}
