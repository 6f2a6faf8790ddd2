// crates/drivelog/src/config.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use drivelog_core::pipelines::{ExecutionContext, DEFAULT_TEAM};
use drivelog_core::temporal::{PeriodMode, TemporalConfig};
use serde::Deserialize;

pub const DEFAULT_OUTPUT: &str = "outputs/nfl_eventlog.csv";

/// Settings read from a `--config` TOML file. Every field is optional; command-line
/// flags and environment variables take precedence.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub team: Option<String>,
    pub output: Option<PathBuf>,
    pub period_length_seconds: Option<i64>,
    pub anchor_date: Option<NaiveDate>,
    pub fold_periods: Option<bool>,
    pub summary_path: Option<PathBuf>,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{}'", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config TOML from '{}'", path.display()))
    }
}

/// Values given on the command line (or through `DRIVELOG_*` variables).
#[derive(Debug, Default)]
pub struct Overrides {
    pub team: Option<String>,
    pub output: Option<PathBuf>,
    /// `Some` when `--fold-periods` or `--no-fold-periods` was given.
    pub fold_periods: Option<bool>,
    pub summary_path: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedRun {
    pub context: ExecutionContext,
    pub output: PathBuf,
    pub summary_path: Option<PathBuf>,
}

pub fn resolve(file: RunConfig, overrides: Overrides) -> ResolvedRun {
    let defaults = TemporalConfig::default();
    let fold = overrides
        .fold_periods
        .or(file.fold_periods)
        .unwrap_or(false);

    let temporal = TemporalConfig {
        period_length_seconds: file
            .period_length_seconds
            .unwrap_or(defaults.period_length_seconds),
        anchor_date: file.anchor_date.unwrap_or(defaults.anchor_date),
        period_mode: if fold {
            PeriodMode::Folded
        } else {
            PeriodMode::Collapsed
        },
    };

    ResolvedRun {
        context: ExecutionContext {
            team: overrides
                .team
                .or(file.team)
                .unwrap_or_else(|| DEFAULT_TEAM.to_string()),
            temporal,
        },
        output: overrides
            .output
            .or(file.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        summary_path: overrides.summary_path.or(file.summary_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file_or_flags() {
        let run = resolve(RunConfig::default(), Overrides::default());

        assert_eq!(run.context.team, "NE");
        assert_eq!(run.output, PathBuf::from("outputs/nfl_eventlog.csv"));
        assert_eq!(run.context.temporal, TemporalConfig::default());
        assert_eq!(run.summary_path, None);
    }

    #[test]
    fn flags_override_file_values() {
        let file: RunConfig = toml::from_str(
            r#"
                team = "SD"
                output = "out/sd.csv"
                period_length_seconds = 720
                anchor_date = "2020-09-10"
                summary_path = "out/summary.json"
            "#,
        )
        .unwrap();
        let overrides = Overrides {
            team: Some("NYJ".to_string()),
            fold_periods: Some(true),
            ..Overrides::default()
        };

        let run = resolve(file, overrides);
        assert_eq!(run.context.team, "NYJ");
        assert_eq!(run.output, PathBuf::from("out/sd.csv"));
        assert_eq!(run.context.temporal.period_length_seconds, 720);
        assert_eq!(
            run.context.temporal.anchor_date,
            NaiveDate::from_ymd_opt(2020, 9, 10).unwrap()
        );
        assert_eq!(run.context.temporal.period_mode, PeriodMode::Folded);
        assert_eq!(run.summary_path, Some(PathBuf::from("out/summary.json")));
    }

    #[test]
    fn flag_can_turn_off_folding_from_file() {
        let file: RunConfig = toml::from_str("fold_periods = true\n").unwrap();
        let run = resolve(
            file,
            Overrides {
                fold_periods: Some(false),
                ..Overrides::default()
            },
        );
        assert_eq!(run.context.temporal.period_mode, PeriodMode::Collapsed);

        let file: RunConfig = toml::from_str("fold_periods = true\n").unwrap();
        let run = resolve(file, Overrides::default());
        assert_eq!(run.context.temporal.period_mode, PeriodMode::Folded);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drivelog.toml");
        std::fs::write(&path, "teem = \"NE\"\n").unwrap();

        assert!(RunConfig::load(&path).is_err());
    }
}
