use polars::prelude::*;

/// Reads a 0/1 indicator column as `Int32` regardless of the integer width it was
/// loaded with.
pub(crate) fn indicator(df: &DataFrame, name: &str) -> PolarsResult<Int32Chunked> {
    let column = df.column(name)?.cast(&DataType::Int32)?;
    Ok(column.i32()?.clone())
}

pub(crate) fn integer(df: &DataFrame, name: &str) -> PolarsResult<Int64Chunked> {
    let column = df.column(name)?.cast(&DataType::Int64)?;
    Ok(column.i64()?.clone())
}

pub(crate) fn missing_columns(df: &DataFrame, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|name| df.column(name).is_err())
        .collect()
}
