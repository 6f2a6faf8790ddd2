use drivelog_core::outcomes::{compute_drive_outcomes, DriveKey, DriveOutcome};
use polars::prelude::*;

fn plays() -> DataFrame {
    df!(
        "game_id" => &[Some("g1"), Some("g1"), Some("g1"), Some("g1"), Some("g2"), None],
        "drive" => &[Some("1"), Some("1"), Some("2"), Some("3"), Some("1"), Some("1")],
        "field_goal_result" => &[None, None, Some("made"), Some("missed"), None, Some("made")],
        "touchdown" => &[0i32, 1, 0, 0, 0, 1],
        "interception" => &[0i32, 0, 0, 0, 1, 0],
        "fumble" => &[1i32, 0, 0, 0, 0, 0],
    )
    .unwrap()
}

#[test]
fn outcomes_are_or_reduced_per_drive() {
    let outcomes = compute_drive_outcomes(&plays()).expect("aggregation succeeded");

    assert_eq!(outcomes.len(), 4);
    assert_eq!(
        outcomes.get(&DriveKey::new("g1", "1")),
        Some(&DriveOutcome {
            touchdown: true,
            field_goal: false,
            any_score: true,
            turnover: true,
        })
    );
    assert_eq!(
        outcomes.get(&DriveKey::new("g1", "2")),
        Some(&DriveOutcome {
            touchdown: false,
            field_goal: true,
            any_score: true,
            turnover: false,
        })
    );
    assert_eq!(
        outcomes.get(&DriveKey::new("g1", "3")),
        Some(&DriveOutcome::default())
    );
    assert_eq!(
        outcomes.get(&DriveKey::new("g2", "1")).map(|o| o.turnover),
        Some(true)
    );
}

#[test]
fn plays_without_a_game_are_not_aggregated() {
    let outcomes = compute_drive_outcomes(&plays()).expect("aggregation succeeded");

    assert!(outcomes
        .iter()
        .all(|(key, _)| key.game_id == "g1" || key.game_id == "g2"));
}

#[test]
fn any_score_matches_touchdown_or_field_goal() {
    let outcomes = compute_drive_outcomes(&plays()).expect("aggregation succeeded");

    for (_, outcome) in outcomes.iter() {
        assert_eq!(outcome.any_score, outcome.touchdown || outcome.field_goal);
    }
}

#[test]
fn relation_view_is_sorted_by_key() {
    let outcomes = compute_drive_outcomes(&plays()).expect("aggregation succeeded");
    let df = outcomes.to_dataframe().expect("render succeeded");

    let names: Vec<&str> = df.get_column_names().iter().map(|name| name.as_str()).collect();
    assert_eq!(
        names,
        [
            "game_id",
            "drive",
            "drive_touchdown",
            "drive_field_goal",
            "drive_any_score",
            "drive_turnover"
        ]
    );
    let games: Vec<Option<&str>> = df.column("game_id").unwrap().str().unwrap().into_iter().collect();
    let drives: Vec<Option<&str>> = df.column("drive").unwrap().str().unwrap().into_iter().collect();
    assert_eq!(games, vec![Some("g1"), Some("g1"), Some("g1"), Some("g2")]);
    assert_eq!(drives, vec![Some("1"), Some("2"), Some("3"), Some("1")]);

    let turnover = df.column("drive_turnover").unwrap().i32().unwrap();
    assert_eq!(turnover.get(0), Some(1));
    assert_eq!(turnover.get(1), Some(0));
}

#[test]
fn empty_relation_yields_no_outcomes() {
    let empty = plays().head(Some(0));
    let outcomes = compute_drive_outcomes(&empty).expect("aggregation succeeded");
    assert!(outcomes.is_empty());
}
