use polars::prelude::*;
use tracing::debug;

use crate::outcomes::{DriveKey, DriveOutcomes, DRIVE_OUTCOME_COLUMNS};

/// Keeps the plays run by `team` whose possession has an aggregated outcome, and
/// broadcasts that outcome onto each kept play as four 0/1 columns.
///
/// Input row order is preserved. Possessions with no qualifying play simply vanish.
pub fn attach_drive_outcomes(
    df: &DataFrame,
    outcomes: &DriveOutcomes,
    team: &str,
) -> Result<DataFrame, PolarsError> {
    let game_ids = df.column("game_id")?.str()?;
    let drives = df.column("drive")?.str()?;
    let posteam = df.column("posteam")?.str()?;

    let len = df.height();
    let mut mask = Vec::with_capacity(len);
    let mut flags: [Vec<i32>; 4] = Default::default();

    for idx in 0..len {
        if posteam.get(idx) != Some(team) {
            mask.push(false);
            continue;
        }

        let outcome = match (game_ids.get(idx), drives.get(idx)) {
            (Some(game_id), Some(drive)) => outcomes.get(&DriveKey::new(game_id, drive)),
            _ => None,
        };

        match outcome {
            Some(outcome) => {
                mask.push(true);
                for (values, flag) in flags.iter_mut().zip(outcome.as_flags()) {
                    values.push(flag);
                }
            }
            None => mask.push(false),
        }
    }

    let mask = BooleanChunked::new("in_scope".into(), mask.as_slice());
    let mut output = df.filter(&mask)?;

    let outcome_columns: Vec<Column> = DRIVE_OUTCOME_COLUMNS
        .iter()
        .zip(flags)
        .map(|(name, values)| Series::new((*name).into(), values).into())
        .collect();
    output.hstack_mut(&outcome_columns)?;

    debug!(
        team,
        input_rows = len,
        in_scope_rows = output.height(),
        "restricted plays to team possessions"
    );

    Ok(output)
}
