use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord};
use polars::prelude::*;

use crate::common::{BoundColumn, ColumnBuffer};
use crate::errors::ParserError;
use crate::model::{ParseSummary, ParsedPlayByPlay};
use crate::schema::{RawColumn, PERIOD_COLUMN, RAW_COLUMNS};

/// Parses a play-by-play CSV export into a typed frame holding only the columns the
/// event-log pipeline consumes. Extra columns are ignored; a missing required column
/// aborts before any row is read.
pub fn parse_play_by_play(content: &str) -> Result<ParsedPlayByPlay, ParserError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(content.as_bytes());

    let header = reader.headers()?.clone();
    if header.is_empty() {
        return Err(ParserError::EmptyHeader);
    }

    let mut columns = bind_columns(&header)?;
    let has_period_column = columns
        .iter()
        .any(|col| col.raw.name == PERIOD_COLUMN.name);

    let mut rows = 0usize;
    let mut unrecognized_indicators = 0usize;
    let mut record = StringRecord::new();

    while reader.read_record(&mut record)? {
        let line_index = record
            .position()
            .map_or(rows as u64 + 2, |position| position.line());
        for column in columns.iter_mut() {
            let value = record.get(column.index).unwrap_or_default();
            if column.push(value, line_index)? {
                unrecognized_indicators += 1;
            }
        }
        rows += 1;
    }

    let frame_columns: Vec<Column> = columns
        .into_iter()
        .map(|column| column.buffer.into_column(column.raw.name))
        .collect();
    let df = DataFrame::new(frame_columns)?;

    Ok(ParsedPlayByPlay {
        df,
        summary: ParseSummary {
            rows,
            unrecognized_indicators,
            has_period_column,
        },
    })
}

/// Stacks several parsed files into one relation, in the order given.
pub fn stack_play_by_play(files: &[&ParsedPlayByPlay]) -> Result<DataFrame, ParserError> {
    // Files without a period column get a null one when any other file carries it.
    let with_period = files.iter().any(|file| file.summary.has_period_column);

    let mut combined: Option<DataFrame> = None;
    for file in files {
        let mut df = file.df.clone();
        if with_period && !file.summary.has_period_column {
            let nulls =
                Series::full_null(PERIOD_COLUMN.name.into(), df.height(), &DataType::Int64);
            df.hstack_mut(&[nulls.into()])?;
        }
        match combined.as_mut() {
            Some(stacked) => {
                stacked.vstack_mut(&df)?;
            }
            None => combined = Some(df),
        }
    }
    Ok(combined.unwrap_or_default())
}

fn bind_columns(header: &StringRecord) -> Result<Vec<BoundColumn>, ParserError> {
    let positions: HashMap<&str, usize> = header
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim(), idx))
        .collect();

    let missing: Vec<&'static str> = RAW_COLUMNS
        .iter()
        .filter(|col| !positions.contains_key(col.source))
        .map(|col| col.source)
        .collect();
    if !missing.is_empty() {
        return Err(ParserError::MissingColumns { missing });
    }

    let bind = |raw: RawColumn, index: usize| BoundColumn {
        raw,
        index,
        buffer: ColumnBuffer::for_kind(raw.kind, 0),
    };

    let mut columns: Vec<BoundColumn> = RAW_COLUMNS
        .iter()
        .map(|raw| bind(*raw, positions[raw.source]))
        .collect();

    if let Some(&index) = positions.get(PERIOD_COLUMN.source) {
        columns.push(bind(PERIOD_COLUMN, index));
    }

    Ok(columns)
}
