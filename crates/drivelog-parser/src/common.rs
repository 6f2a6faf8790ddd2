use polars::prelude::*;

use crate::errors::ParserError;
use crate::schema::{ColumnKind, RawColumn};

pub(crate) fn is_null_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == "NA"
}

pub(crate) fn parse_optional_text(value: &str) -> Option<String> {
    if is_null_token(value) {
        None
    } else {
        Some(value.to_string())
    }
}

pub(crate) fn parse_optional_i64(
    value: &str,
    line_index: u64,
    column: &str,
) -> Result<Option<i64>, ParserError> {
    if is_null_token(value) {
        return Ok(None);
    }
    let trimmed = value.trim();
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Ok(Some(parsed));
    }

    // Some exports render integer columns as floats ("3.0"). `i64::MAX as f64` is 2^63,
    // which is already out of range.
    match trimmed.parse::<f64>() {
        Ok(parsed)
            if parsed.is_finite()
                && parsed.fract() == 0.0
                && parsed >= i64::MIN as f64
                && parsed < i64::MAX as f64 =>
        {
            Ok(Some(parsed as i64))
        }
        _ => Err(ParserError::DataRow {
            line_index,
            message: format!("failed to parse column '{column}' as integer: '{trimmed}'"),
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IndicatorValue {
    Set,
    Unset,
    Unrecognized,
}

impl IndicatorValue {
    pub(crate) fn as_flag(self) -> i32 {
        match self {
            IndicatorValue::Set => 1,
            IndicatorValue::Unset | IndicatorValue::Unrecognized => 0,
        }
    }
}

pub(crate) fn parse_indicator(value: &str) -> IndicatorValue {
    if is_null_token(value) {
        return IndicatorValue::Unset;
    }
    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed == 1.0 => IndicatorValue::Set,
        Ok(parsed) if parsed == 0.0 => IndicatorValue::Unset,
        _ => IndicatorValue::Unrecognized,
    }
}

pub(crate) enum ColumnBuffer {
    Text(Vec<Option<String>>),
    Integer(Vec<Option<i64>>),
    Indicator(Vec<i32>),
}

impl ColumnBuffer {
    pub(crate) fn for_kind(kind: ColumnKind, capacity: usize) -> Self {
        match kind {
            ColumnKind::Text => ColumnBuffer::Text(Vec::with_capacity(capacity)),
            ColumnKind::Integer => ColumnBuffer::Integer(Vec::with_capacity(capacity)),
            ColumnKind::Indicator => ColumnBuffer::Indicator(Vec::with_capacity(capacity)),
        }
    }

    pub(crate) fn into_column(self, name: &str) -> Column {
        match self {
            ColumnBuffer::Text(values) => {
                let utf8: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
                Series::new(name.into(), utf8).into()
            }
            ColumnBuffer::Integer(values) => Series::new(name.into(), values).into(),
            ColumnBuffer::Indicator(values) => Series::new(name.into(), values).into(),
        }
    }
}

/// A source column bound to its position in the header row.
pub(crate) struct BoundColumn {
    pub raw: RawColumn,
    pub index: usize,
    pub buffer: ColumnBuffer,
}

impl BoundColumn {
    /// Pushes one cell; returns `true` when an indicator value had to be coerced.
    pub(crate) fn push(&mut self, value: &str, line_index: u64) -> Result<bool, ParserError> {
        match &mut self.buffer {
            ColumnBuffer::Text(values) => {
                values.push(parse_optional_text(value));
                Ok(false)
            }
            ColumnBuffer::Integer(values) => {
                values.push(parse_optional_i64(value, line_index, self.raw.source)?);
                Ok(false)
            }
            ColumnBuffer::Indicator(values) => {
                let parsed = parse_indicator(value);
                values.push(parsed.as_flag());
                Ok(parsed == IndicatorValue::Unrecognized)
            }
        }
    }
}
