/// How a raw column is typed once loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    /// 0/1 flag; anything unrecognized collapses to 0.
    Indicator,
}

#[derive(Debug, Clone, Copy)]
pub struct RawColumn {
    /// Header name in the source file.
    pub source: &'static str,
    /// Column name in the loaded frame.
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn column(source: &'static str, name: &'static str, kind: ColumnKind) -> RawColumn {
    RawColumn { source, name, kind }
}

pub const RAW_COLUMNS: [RawColumn; 22] = [
    column("game_id", "game_id", ColumnKind::Text),
    column("drive", "drive", ColumnKind::Text),
    column("play_type", "play_type", ColumnKind::Text),
    column("time", "time", ColumnKind::Text),
    column("pass_length", "pass_length", ColumnKind::Text),
    column("pass_location", "pass_location", ColumnKind::Text),
    column("run_location", "run_location", ColumnKind::Text),
    column("run_gap", "run_gap", ColumnKind::Text),
    column("field_goal_result", "field_goal_result", ColumnKind::Text),
    column("extra_point_result", "extra_point_result", ColumnKind::Text),
    column("two_point_conv_result", "two_point_conv_result", ColumnKind::Text),
    column("touchdown", "touchdown", ColumnKind::Indicator),
    column("interception", "interception", ColumnKind::Indicator),
    column("fumble", "fumble", ColumnKind::Indicator),
    column("desc", "desc", ColumnKind::Text),
    column("down", "down", ColumnKind::Integer),
    column("yards_gained", "yards_gained", ColumnKind::Integer),
    column(
        "quarter_seconds_remaining",
        "quarter_seconds_remaining",
        ColumnKind::Integer,
    ),
    column("posteam", "posteam", ColumnKind::Text),
    column("passer", "passer", ColumnKind::Text),
    column("receiver", "receiver", ColumnKind::Text),
    column("rusher", "runner", ColumnKind::Text),
];

/// Loaded when the file carries it; only period-folded timestamps need it.
pub const PERIOD_COLUMN: RawColumn = column("qtr", "qtr", ColumnKind::Integer);

pub fn raw_column_names() -> Vec<&'static str> {
    RAW_COLUMNS.iter().map(|col| col.name).collect()
}
