use std::fs;

use drivelog_core::outputs::{event_log_csv_bytes, write_event_log_csv, write_run_summary};
use drivelog_core::pipelines::PipelineSummary;
use drivelog_core::temporal::PeriodMode;
use drivelog_core::validation::validate_event_log;
use polars::prelude::*;

fn log() -> DataFrame {
    df!(
        "case_id" => &["g1_1", "g1_1"],
        "activity_name" => &["kickoff", "pass short left"],
        "transformed_time" => &[Some("2006-12-31 23:59:59"), None],
        "down" => &[None, Some(1i64)],
        "posteam" => &["NE", "NE"],
    )
    .unwrap()
}

#[test]
fn csv_has_header_and_empty_nulls() {
    let bytes = event_log_csv_bytes(&mut log()).expect("serialization succeeded");
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "case_id,activity_name,transformed_time,down,posteam");
    assert_eq!(lines[1], "g1_1,kickoff,2006-12-31 23:59:59,,NE");
    assert_eq!(lines[2], "g1_1,pass short left,,1,NE");
}

#[test]
fn write_creates_parent_directory_and_hashes_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outputs").join("nfl_eventlog.csv");

    let first = write_event_log_csv(&mut log(), &path).expect("write succeeded");
    let written = fs::read(&path).unwrap();
    assert_eq!(first.row_count, 2);
    assert_eq!(first.content_hash, blake3::hash(&written).to_hex().to_string());

    let second = write_event_log_csv(&mut log(), &path).expect("rewrite succeeded");
    assert_eq!(first, second);
}

#[test]
fn run_summary_is_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    let report = validate_event_log(&log(), "NE").unwrap();
    let summary = PipelineSummary {
        pipeline: "possession_event_log_v1",
        version: "0.1.0",
        team: "NE".to_string(),
        period_mode: PeriodMode::Collapsed,
        input_rows: 3,
        drives_aggregated: 2,
        in_scope_rows: 2,
        events: 2,
        cases: 1,
        activities: 2,
        null_transformed_times: 1,
    };

    write_run_summary(&summary, &report, None, &path).expect("summary written");

    let value: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(value["pipeline"]["team"], "NE");
    assert_eq!(value["pipeline"]["period_mode"], "collapsed");
    assert_eq!(value["validation"]["cases"], 1);
    assert!(value["output"].is_null());
}
