use chrono::{NaiveDate, TimeDelta};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::columns;

pub const TRANSFORMED_TIME_COLUMN: &str = "transformed_time";
pub const PERIOD_COLUMN: &str = "qtr";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DEFAULT_PERIOD_LENGTH_SECONDS: i64 = 900;
pub const DEFAULT_ANCHOR_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2007, 1, 1) {
    Some(date) => date,
    None => panic!("default anchor date is not a calendar date"),
};

#[derive(Debug, Error)]
pub enum TemporalError {
    #[error("polars operation failed: {0}")]
    Polars(#[from] PolarsError),
    #[error("period folding requires the 'qtr' column")]
    MissingPeriodColumn,
    #[error("period length must be positive, got {0} seconds")]
    InvalidPeriodLength(i64),
}

/// How periods are encoded into `transformed_time`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodMode {
    /// Elapsed time within the period only. Plays from different periods with the same
    /// clock value share a timestamp.
    #[default]
    Collapsed,
    /// Offsets each period by `(period - 1) * (period_length + 1)`, ordering a whole game.
    /// The clock takes `period_length + 1` values per period, so each period gets that
    /// many slots and the end of one period sorts before the start of the next.
    Folded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalConfig {
    pub period_length_seconds: i64,
    /// Calendar date the elapsed clock is anchored to; only its constancy matters.
    pub anchor_date: NaiveDate,
    pub period_mode: PeriodMode,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            period_length_seconds: DEFAULT_PERIOD_LENGTH_SECONDS,
            anchor_date: DEFAULT_ANCHOR_DATE,
            period_mode: PeriodMode::Collapsed,
        }
    }
}

impl TemporalConfig {
    pub fn validate(&self) -> Result<(), TemporalError> {
        if self.period_length_seconds <= 0 {
            return Err(TemporalError::InvalidPeriodLength(self.period_length_seconds));
        }
        Ok(())
    }

    /// `(period_length - 1) - remaining`, shifted by whole periods when folding.
    ///
    /// Returns `None` when folding is requested but the period is unknown, or when the
    /// clock values are too large to offset.
    pub fn elapsed_seconds(&self, remaining: i64, period: Option<i64>) -> Option<i64> {
        let within_period = (self.period_length_seconds - 1).checked_sub(remaining)?;
        match self.period_mode {
            PeriodMode::Collapsed => Some(within_period),
            PeriodMode::Folded => {
                let slots = self.period_length_seconds.checked_add(1)?;
                let offset = period?.checked_sub(1)?.checked_mul(slots)?;
                within_period.checked_add(offset)
            }
        }
    }

    pub fn transformed_time(&self, remaining: i64, period: Option<i64>) -> Option<String> {
        let elapsed = self.elapsed_seconds(remaining, period)?;
        format_elapsed(self.anchor_date, elapsed)
    }
}

/// Renders `anchor 00:00:00 + elapsed` as `YYYY-MM-DD HH:MM:SS`. Negative offsets roll
/// into the previous day, which keeps string order equal to elapsed order.
pub fn format_elapsed(anchor: NaiveDate, elapsed: i64) -> Option<String> {
    let midnight = anchor.and_hms_opt(0, 0, 0)?;
    let timestamp = midnight.checked_add_signed(TimeDelta::try_seconds(elapsed)?)?;
    Some(timestamp.format(TIMESTAMP_FORMAT).to_string())
}

/// Appends `transformed_time` derived from `quarter_seconds_remaining` (and `qtr` when
/// folding). Rows without a clock value get a null timestamp.
pub fn apply_transformed_time(
    df: &DataFrame,
    config: &TemporalConfig,
) -> Result<DataFrame, TemporalError> {
    config.validate()?;

    let remaining = columns::integer(df, "quarter_seconds_remaining")?;
    let periods = match config.period_mode {
        PeriodMode::Collapsed => None,
        PeriodMode::Folded => {
            if df.column(PERIOD_COLUMN).is_err() {
                return Err(TemporalError::MissingPeriodColumn);
            }
            Some(columns::integer(df, PERIOD_COLUMN)?)
        }
    };

    let mut times: Vec<Option<String>> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let period = periods.as_ref().and_then(|periods| periods.get(idx));
        let time = remaining
            .get(idx)
            .and_then(|remaining| config.transformed_time(remaining, period));
        times.push(time);
    }

    let missing = times.iter().filter(|time| time.is_none()).count();
    if missing > 0 {
        warn!(rows = missing, "plays without a usable clock have no transformed_time");
    }
    debug!(
        rows = times.len(),
        period_mode = ?config.period_mode,
        "derived transformed_time"
    );

    let times: Vec<Option<&str>> = times.iter().map(|time| time.as_deref()).collect();
    let mut output = df.clone();
    output.hstack_mut(&[Series::new(TRANSFORMED_TIME_COLUMN.into(), times).into()])?;

    Ok(output)
}
