// crates/drivelog/src/report.rs

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use drivelog_core::ingestion::{FileReport, FileStatus};
use drivelog_core::pipelines::ProcessingPipelineDescriptor;
use drivelog_core::validation::ValidationReport;
use polars::prelude::*;

const SAMPLE_COLUMNS: [&str; 5] = [
    "case_id",
    "activity_name",
    "transformed_time",
    "down",
    "yards_gained",
];

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn render(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(text) => text.to_string(),
        other => other.to_string(),
    }
}

pub fn files_table(reports: &[FileReport]) -> Table {
    let mut table = new_table(&["file", "status", "rows", "unrecognized indicators", "blake3"]);
    for report in reports {
        let status = match report.status {
            FileStatus::Parsed => "parsed",
            FileStatus::Duplicate => "duplicate",
        };
        table.add_row(vec![
            Cell::new(&report.path),
            Cell::new(status),
            Cell::new(report.rows),
            Cell::new(report.unrecognized_indicators),
            Cell::new(&report.hash[..12]),
        ]);
    }
    table
}

/// The first `rows` events, showing the core triple plus down and yardage.
pub fn sample_table(df: &DataFrame, rows: usize) -> Result<Table> {
    let sample = df.select(SAMPLE_COLUMNS)?.head(Some(rows));
    let mut table = new_table(&SAMPLE_COLUMNS);
    let columns = sample.get_columns();
    for idx in 0..sample.height() {
        let mut row = Vec::with_capacity(columns.len());
        for column in columns {
            row.push(render(column.get(idx)?));
        }
        table.add_row(row);
    }
    Ok(table)
}

pub fn distribution_table(report: &ValidationReport, top: usize) -> Table {
    let mut table = new_table(&["activity", "events"]);
    for entry in report.top_activities(top) {
        table.add_row(vec![Cell::new(&entry.activity), Cell::new(entry.count)]);
    }
    table
}

pub fn pipelines_table(descriptors: &[ProcessingPipelineDescriptor]) -> Table {
    let mut table = new_table(&["code", "version", "input format", "description"]);
    for descriptor in descriptors {
        table.add_row(vec![
            descriptor.code,
            descriptor.version,
            descriptor.input_data_format,
            descriptor.description,
        ]);
    }
    table
}

pub fn activities_table(labels: &[String]) -> Table {
    let mut table = new_table(&["#", "activity"]);
    for (idx, label) in labels.iter().enumerate() {
        table.add_row(vec![Cell::new(idx + 1), Cell::new(label)]);
    }
    table
}
