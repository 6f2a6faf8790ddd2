use std::collections::HashMap;

use polars::prelude::*;
use tracing::debug;

use crate::columns;

pub const DRIVE_OUTCOME_COLUMNS: [&str; 4] = [
    "drive_touchdown",
    "drive_field_goal",
    "drive_any_score",
    "drive_turnover",
];

const FIELD_GOAL_MADE: &str = "made";

/// Natural key of a possession: the game it belongs to and its drive number, both verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DriveKey {
    pub game_id: String,
    pub drive: String,
}

impl DriveKey {
    pub fn new(game_id: impl Into<String>, drive: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            drive: drive.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveOutcome {
    pub touchdown: bool,
    pub field_goal: bool,
    pub any_score: bool,
    pub turnover: bool,
}

impl DriveOutcome {
    /// Flags in `DRIVE_OUTCOME_COLUMNS` order.
    pub fn as_flags(&self) -> [i32; 4] {
        [
            self.touchdown as i32,
            self.field_goal as i32,
            self.any_score as i32,
            self.turnover as i32,
        ]
    }
}

/// Per-possession outcome lookup, computed once from the full raw relation.
#[derive(Debug, Clone, Default)]
pub struct DriveOutcomes {
    drives: HashMap<DriveKey, DriveOutcome>,
}

impl DriveOutcomes {
    pub fn get(&self, key: &DriveKey) -> Option<&DriveOutcome> {
        self.drives.get(key)
    }

    pub fn len(&self) -> usize {
        self.drives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DriveKey, &DriveOutcome)> {
        self.drives.iter()
    }

    /// Renders the lookup as a relation ordered by (game_id, drive).
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut entries: Vec<(&DriveKey, &DriveOutcome)> = self.drives.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let game_ids: Vec<&str> = entries.iter().map(|(key, _)| key.game_id.as_str()).collect();
        let drives: Vec<&str> = entries.iter().map(|(key, _)| key.drive.as_str()).collect();

        let mut columns: Vec<Column> = vec![
            Series::new("game_id".into(), game_ids).into(),
            Series::new("drive".into(), drives).into(),
        ];
        for (position, name) in DRIVE_OUTCOME_COLUMNS.iter().enumerate() {
            let values: Vec<i32> = entries
                .iter()
                .map(|(_, outcome)| outcome.as_flags()[position])
                .collect();
            columns.push(Series::new((*name).into(), values).into());
        }

        DataFrame::new(columns)
    }
}

/// Reduces every raw play sharing a (game_id, drive) key into one outcome with logical OR.
///
/// Plays without a game or drive value are skipped: they can never be joined back to a
/// possession, so an outcome for them would be unreachable.
pub fn compute_drive_outcomes(df: &DataFrame) -> Result<DriveOutcomes, PolarsError> {
    let game_ids = df.column("game_id")?.str()?;
    let drive_numbers = df.column("drive")?.str()?;
    let field_goal_result = df.column("field_goal_result")?.str()?;
    let touchdown = columns::indicator(df, "touchdown")?;
    let interception = columns::indicator(df, "interception")?;
    let fumble = columns::indicator(df, "fumble")?;

    let mut drives: HashMap<DriveKey, DriveOutcome> = HashMap::new();
    let mut skipped = 0usize;

    for idx in 0..df.height() {
        let (Some(game_id), Some(drive)) = (game_ids.get(idx), drive_numbers.get(idx)) else {
            skipped += 1;
            continue;
        };

        let scored_touchdown = touchdown.get(idx) == Some(1);
        let made_field_goal = field_goal_result.get(idx) == Some(FIELD_GOAL_MADE);
        let turned_over = interception.get(idx) == Some(1) || fumble.get(idx) == Some(1);

        let outcome = drives.entry(DriveKey::new(game_id, drive)).or_default();
        outcome.touchdown |= scored_touchdown;
        outcome.field_goal |= made_field_goal;
        outcome.any_score |= scored_touchdown || made_field_goal;
        outcome.turnover |= turned_over;
    }

    debug!(
        drives = drives.len(),
        skipped_without_key = skipped,
        "aggregated drive outcomes"
    );

    Ok(DriveOutcomes { drives })
}
