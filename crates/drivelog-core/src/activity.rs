//! Maps each play to exactly one activity label.
//!
//! Classification is a first-match-wins cascade over [`RULES`]. A later rule never
//! overrides an earlier match, so the order of that table is part of the output
//! contract: a sack recorded as a directed pass is a directed pass, and a touchdown
//! run is labelled by its run direction. When no rule matches, the raw play type is
//! used verbatim.

use std::borrow::Cow;
use std::fmt;

use polars::prelude::*;
use tracing::debug;

use crate::columns;

pub const ACTIVITY_COLUMN: &str = "activity_name";

/// Label used when no rule matches and the play has no play type either.
pub const UNKNOWN_PLAY_TYPE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassDepth {
    Short,
    Deep,
}

impl PassDepth {
    pub const ALL: [PassDepth; 2] = [PassDepth::Short, PassDepth::Deep];

    pub fn from_raw(value: &str) -> Option<Self> {
        match value {
            "short" => Some(PassDepth::Short),
            "deep" => Some(PassDepth::Deep),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PassDepth::Short => "short",
            PassDepth::Deep => "deep",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassDirection {
    Left,
    Middle,
    Right,
}

impl PassDirection {
    pub const ALL: [PassDirection; 3] = [
        PassDirection::Left,
        PassDirection::Middle,
        PassDirection::Right,
    ];

    pub fn from_raw(value: &str) -> Option<Self> {
        match value {
            "left" => Some(PassDirection::Left),
            "middle" => Some(PassDirection::Middle),
            "right" => Some(PassDirection::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PassDirection::Left => "left",
            PassDirection::Middle => "middle",
            PassDirection::Right => "right",
        }
    }
}

/// Outside run locations. Runs up the middle carry no gap in the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunSide {
    Left,
    Right,
}

impl RunSide {
    pub const ALL: [RunSide; 2] = [RunSide::Left, RunSide::Right];

    pub fn from_raw(value: &str) -> Option<Self> {
        match value {
            "left" => Some(RunSide::Left),
            "right" => Some(RunSide::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunSide::Left => "left",
            RunSide::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunGap {
    Tackle,
    Guard,
    End,
}

impl RunGap {
    pub const ALL: [RunGap; 3] = [RunGap::Tackle, RunGap::Guard, RunGap::End];

    pub fn from_raw(value: &str) -> Option<Self> {
        match value {
            "tackle" => Some(RunGap::Tackle),
            "guard" => Some(RunGap::Guard),
            "end" => Some(RunGap::End),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunGap::Tackle => "tackle",
            RunGap::Guard => "guard",
            RunGap::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KickResult {
    Made,
    Missed,
}

impl KickResult {
    pub const ALL: [KickResult; 2] = [KickResult::Made, KickResult::Missed];

    fn from_result(value: &str, success: &str) -> Self {
        if value == success {
            KickResult::Made
        } else {
            KickResult::Missed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KickResult::Made => "made",
            KickResult::Missed => "missed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Activity {
    DirectedPass {
        depth: PassDepth,
        direction: PassDirection,
    },
    Pass,
    DirectedRun {
        side: RunSide,
        gap: RunGap,
    },
    RunMiddle,
    Run,
    FieldGoal(KickResult),
    ExtraPoint(KickResult),
    TwoPointConversion(KickResult),
    IncompletePass,
    Sacked,
    Interception,
    Fumble,
    Touchdown,
    OffensivePenalty,
    NoPlay,
    EndOfHalf,
    EndOfGame,
    /// Unmatched play, labelled with its raw play type.
    Other(String),
}

impl Activity {
    pub fn label(&self) -> Cow<'static, str> {
        match self {
            Activity::DirectedPass { depth, direction } => Cow::Owned(format!(
                "pass {} {}",
                depth.as_str(),
                direction.as_str()
            )),
            Activity::Pass => Cow::Borrowed("pass"),
            Activity::DirectedRun { side, gap } => {
                Cow::Owned(format!("run {} {}", side.as_str(), gap.as_str()))
            }
            Activity::RunMiddle => Cow::Borrowed("run middle"),
            Activity::Run => Cow::Borrowed("run"),
            Activity::FieldGoal(result) => {
                Cow::Owned(format!("field goal - {}", result.as_str()))
            }
            Activity::ExtraPoint(result) => {
                Cow::Owned(format!("extra point - {}", result.as_str()))
            }
            Activity::TwoPointConversion(result) => {
                Cow::Owned(format!("two point conversion - {}", result.as_str()))
            }
            Activity::IncompletePass => Cow::Borrowed("incomplete pass"),
            Activity::Sacked => Cow::Borrowed("sacked"),
            Activity::Interception => Cow::Borrowed("interception"),
            Activity::Fumble => Cow::Borrowed("fumble"),
            Activity::Touchdown => Cow::Borrowed("touchdown"),
            Activity::OffensivePenalty => Cow::Borrowed("offensive penalty"),
            Activity::NoPlay => Cow::Borrowed("no play"),
            Activity::EndOfHalf => Cow::Borrowed("end of half"),
            Activity::EndOfGame => Cow::Borrowed("end of game"),
            Activity::Other(play_type) => Cow::Owned(play_type.clone()),
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The attributes of one play that classification looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayView<'a> {
    pub play_type: Option<&'a str>,
    pub pass_length: Option<&'a str>,
    pub pass_location: Option<&'a str>,
    pub run_location: Option<&'a str>,
    pub run_gap: Option<&'a str>,
    pub field_goal_result: Option<&'a str>,
    pub extra_point_result: Option<&'a str>,
    pub two_point_conv_result: Option<&'a str>,
    pub touchdown: bool,
    pub interception: bool,
    pub fumble: bool,
    pub desc: Option<&'a str>,
}

impl PlayView<'_> {
    fn is_play_type(&self, expected: &str) -> bool {
        self.play_type == Some(expected)
    }

    /// ASCII case-insensitive containment, the same matching SQL `LIKE '%needle%'` does.
    /// `needle` must be lower case.
    fn desc_contains(&self, needle: &str) -> bool {
        self.desc
            .is_some_and(|desc| desc.to_ascii_lowercase().contains(needle))
    }
}

pub struct ActivityRule {
    pub name: &'static str,
    pub apply: fn(&PlayView<'_>) -> Option<Activity>,
}

impl fmt::Debug for ActivityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityRule")
            .field("name", &self.name)
            .finish()
    }
}

/// The classification cascade, in precedence order.
pub static RULES: [ActivityRule; 16] = [
    ActivityRule {
        name: "directed_pass",
        apply: directed_pass,
    },
    ActivityRule {
        name: "undirected_pass",
        apply: undirected_pass,
    },
    ActivityRule {
        name: "directed_run",
        apply: directed_run,
    },
    ActivityRule {
        name: "undirected_run",
        apply: undirected_run,
    },
    ActivityRule {
        name: "field_goal",
        apply: field_goal,
    },
    ActivityRule {
        name: "extra_point",
        apply: extra_point,
    },
    ActivityRule {
        name: "two_point_conversion",
        apply: two_point_conversion,
    },
    ActivityRule {
        name: "incomplete_pass",
        apply: incomplete_pass,
    },
    ActivityRule {
        name: "sacked",
        apply: sacked,
    },
    ActivityRule {
        name: "interception",
        apply: interception,
    },
    ActivityRule {
        name: "fumble",
        apply: fumble,
    },
    ActivityRule {
        name: "touchdown",
        apply: touchdown,
    },
    ActivityRule {
        name: "offensive_penalty",
        apply: offensive_penalty,
    },
    ActivityRule {
        name: "no_play",
        apply: no_play,
    },
    ActivityRule {
        name: "end_of_half",
        apply: end_of_half,
    },
    ActivityRule {
        name: "end_of_game",
        apply: end_of_game,
    },
];

fn directed_pass(play: &PlayView<'_>) -> Option<Activity> {
    if !play.is_play_type("pass") {
        return None;
    }
    let depth = PassDepth::from_raw(play.pass_length?)?;
    let direction = PassDirection::from_raw(play.pass_location?)?;
    Some(Activity::DirectedPass { depth, direction })
}

fn undirected_pass(play: &PlayView<'_>) -> Option<Activity> {
    (play.is_play_type("pass") && (play.pass_length.is_none() || play.pass_location.is_none()))
        .then_some(Activity::Pass)
}

fn directed_run(play: &PlayView<'_>) -> Option<Activity> {
    if !play.is_play_type("run") {
        return None;
    }
    let location = play.run_location?;
    if location == "middle" {
        return Some(Activity::RunMiddle);
    }
    let side = RunSide::from_raw(location)?;
    let gap = RunGap::from_raw(play.run_gap?)?;
    Some(Activity::DirectedRun { side, gap })
}

fn undirected_run(play: &PlayView<'_>) -> Option<Activity> {
    (play.is_play_type("run") && (play.run_location.is_none() || play.run_gap.is_none()))
        .then_some(Activity::Run)
}

fn field_goal(play: &PlayView<'_>) -> Option<Activity> {
    play.field_goal_result
        .map(|result| Activity::FieldGoal(KickResult::from_result(result, "made")))
}

fn extra_point(play: &PlayView<'_>) -> Option<Activity> {
    play.extra_point_result
        .map(|result| Activity::ExtraPoint(KickResult::from_result(result, "good")))
}

fn two_point_conversion(play: &PlayView<'_>) -> Option<Activity> {
    play.two_point_conv_result
        .map(|result| Activity::TwoPointConversion(KickResult::from_result(result, "success")))
}

// Only reachable for pass plays whose depth/direction are present but unrecognized.
fn incomplete_pass(play: &PlayView<'_>) -> Option<Activity> {
    (play.is_play_type("pass") && play.desc_contains("incomplete"))
        .then_some(Activity::IncompletePass)
}

fn sacked(play: &PlayView<'_>) -> Option<Activity> {
    play.desc_contains("sacked").then_some(Activity::Sacked)
}

fn interception(play: &PlayView<'_>) -> Option<Activity> {
    play.interception.then_some(Activity::Interception)
}

fn fumble(play: &PlayView<'_>) -> Option<Activity> {
    play.fumble.then_some(Activity::Fumble)
}

fn touchdown(play: &PlayView<'_>) -> Option<Activity> {
    play.touchdown.then_some(Activity::Touchdown)
}

fn offensive_penalty(play: &PlayView<'_>) -> Option<Activity> {
    play.desc_contains("penalty")
        .then_some(Activity::OffensivePenalty)
}

fn no_play(play: &PlayView<'_>) -> Option<Activity> {
    play.desc_contains("no play").then_some(Activity::NoPlay)
}

fn end_of_half(play: &PlayView<'_>) -> Option<Activity> {
    play.desc_contains("end of half").then_some(Activity::EndOfHalf)
}

fn end_of_game(play: &PlayView<'_>) -> Option<Activity> {
    play.desc_contains("end of game").then_some(Activity::EndOfGame)
}

pub fn classify(play: &PlayView<'_>) -> Activity {
    RULES
        .iter()
        .find_map(|rule| (rule.apply)(play))
        .unwrap_or_else(|| {
            Activity::Other(play.play_type.unwrap_or(UNKNOWN_PLAY_TYPE).to_string())
        })
}

/// Name of the rule that decides `play`, or `None` when the play-type fallback applies.
pub fn matching_rule(play: &PlayView<'_>) -> Option<&'static str> {
    RULES
        .iter()
        .find(|rule| (rule.apply)(play).is_some())
        .map(|rule| rule.name)
}

/// Every label the cascade can produce apart from the raw play-type fallback.
pub fn vocabulary() -> Vec<String> {
    let mut labels = Vec::new();

    for depth in PassDepth::ALL {
        for direction in PassDirection::ALL {
            labels.push(Activity::DirectedPass { depth, direction }.label().into_owned());
        }
    }
    labels.push(Activity::Pass.label().into_owned());

    for side in RunSide::ALL {
        for gap in RunGap::ALL {
            labels.push(Activity::DirectedRun { side, gap }.label().into_owned());
        }
    }
    labels.push(Activity::RunMiddle.label().into_owned());
    labels.push(Activity::Run.label().into_owned());

    for result in KickResult::ALL {
        labels.push(Activity::FieldGoal(result).label().into_owned());
    }
    for result in KickResult::ALL {
        labels.push(Activity::ExtraPoint(result).label().into_owned());
    }
    for result in KickResult::ALL {
        labels.push(Activity::TwoPointConversion(result).label().into_owned());
    }

    for activity in [
        Activity::IncompletePass,
        Activity::Sacked,
        Activity::Interception,
        Activity::Fumble,
        Activity::Touchdown,
        Activity::OffensivePenalty,
        Activity::NoPlay,
        Activity::EndOfHalf,
        Activity::EndOfGame,
    ] {
        labels.push(activity.label().into_owned());
    }

    labels
}

/// Appends `activity_name` to every row.
pub fn classify_activities(df: &DataFrame) -> Result<DataFrame, PolarsError> {
    let play_type = df.column("play_type")?.str()?;
    let pass_length = df.column("pass_length")?.str()?;
    let pass_location = df.column("pass_location")?.str()?;
    let run_location = df.column("run_location")?.str()?;
    let run_gap = df.column("run_gap")?.str()?;
    let field_goal_result = df.column("field_goal_result")?.str()?;
    let extra_point_result = df.column("extra_point_result")?.str()?;
    let two_point_conv_result = df.column("two_point_conv_result")?.str()?;
    let desc = df.column("desc")?.str()?;
    let touchdown = columns::indicator(df, "touchdown")?;
    let interception = columns::indicator(df, "interception")?;
    let fumble = columns::indicator(df, "fumble")?;

    let mut labels: Vec<String> = Vec::with_capacity(df.height());
    let mut fallbacks = 0usize;

    for idx in 0..df.height() {
        let play = PlayView {
            play_type: play_type.get(idx),
            pass_length: pass_length.get(idx),
            pass_location: pass_location.get(idx),
            run_location: run_location.get(idx),
            run_gap: run_gap.get(idx),
            field_goal_result: field_goal_result.get(idx),
            extra_point_result: extra_point_result.get(idx),
            two_point_conv_result: two_point_conv_result.get(idx),
            touchdown: touchdown.get(idx) == Some(1),
            interception: interception.get(idx) == Some(1),
            fumble: fumble.get(idx) == Some(1),
            desc: desc.get(idx),
        };

        let activity = classify(&play);
        if matches!(activity, Activity::Other(_)) {
            fallbacks += 1;
        }
        labels.push(activity.label().into_owned());
    }

    debug!(
        rows = labels.len(),
        play_type_fallbacks = fallbacks,
        "classified activities"
    );

    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
    let mut output = df.clone();
    output.hstack_mut(&[Series::new(ACTIVITY_COLUMN.into(), labels).into()])?;

    Ok(output)
}
