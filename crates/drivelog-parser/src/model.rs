use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSummary {
    pub rows: usize,
    /// Indicator cells that were neither 0, 1 nor null and were read as 0.
    pub unrecognized_indicators: usize,
    pub has_period_column: bool,
}

#[derive(Debug, Clone)]
pub struct ParsedPlayByPlay {
    pub df: DataFrame,
    pub summary: ParseSummary,
}
