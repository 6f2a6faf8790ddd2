use drivelog_core::activity::{
    classify, classify_activities, matching_rule, vocabulary, Activity, KickResult, PlayView,
    RULES,
};
use polars::prelude::*;

fn pass(pass_length: Option<&'static str>, pass_location: Option<&'static str>) -> PlayView<'static> {
    PlayView {
        play_type: Some("pass"),
        pass_length,
        pass_location,
        ..PlayView::default()
    }
}

fn run(run_location: Option<&'static str>, run_gap: Option<&'static str>) -> PlayView<'static> {
    PlayView {
        play_type: Some("run"),
        run_location,
        run_gap,
        ..PlayView::default()
    }
}

fn label(play: &PlayView<'_>) -> String {
    classify(play).label().into_owned()
}

#[test]
fn directed_pass_uses_depth_and_direction() {
    assert_eq!(label(&pass(Some("short"), Some("left"))), "pass short left");
    assert_eq!(label(&pass(Some("deep"), Some("middle"))), "pass deep middle");
}

#[test]
fn pass_without_depth_or_direction_is_plain_pass() {
    assert_eq!(label(&pass(None, Some("left"))), "pass");
    assert_eq!(label(&pass(Some("short"), None)), "pass");
}

#[test]
fn sack_recorded_as_pass_without_direction_stays_pass() {
    let play = PlayView {
        desc: Some("T.Brady sacked at NE 44 for -8 yards"),
        ..pass(None, None)
    };
    assert_eq!(label(&play), "pass");
    assert_eq!(matching_rule(&play), Some("undirected_pass"));
}

#[test]
fn directed_pass_wins_over_sack_text() {
    let play = PlayView {
        desc: Some("T.Brady sacked at NE 44"),
        ..pass(Some("short"), Some("left"))
    };
    assert_eq!(label(&play), "pass short left");
    assert_eq!(matching_rule(&play), Some("directed_pass"));
}

#[test]
fn sack_on_non_pass_play_is_sacked() {
    let play = PlayView {
        play_type: Some("no_play"),
        desc: Some("T.Brady SACKED at NE 44"),
        ..PlayView::default()
    };
    assert_eq!(classify(&play), Activity::Sacked);
}

#[test]
fn run_labels() {
    assert_eq!(label(&run(Some("middle"), None)), "run middle");
    assert_eq!(label(&run(Some("middle"), Some("tackle"))), "run middle");
    assert_eq!(label(&run(Some("left"), Some("end"))), "run left end");
    assert_eq!(label(&run(Some("right"), Some("tackle"))), "run right tackle");
    assert_eq!(label(&run(Some("left"), None)), "run");
    assert_eq!(label(&run(None, None)), "run");
}

#[test]
fn fumbled_run_keeps_its_run_label() {
    let play = PlayView {
        fumble: true,
        ..run(Some("middle"), None)
    };
    assert_eq!(label(&play), "run middle");
}

#[test]
fn kicking_results() {
    let missed_fg = PlayView {
        play_type: Some("field_goal"),
        field_goal_result: Some("missed"),
        ..PlayView::default()
    };
    assert_eq!(classify(&missed_fg), Activity::FieldGoal(KickResult::Missed));
    assert_eq!(label(&missed_fg), "field goal - missed");

    let blocked_fg = PlayView {
        field_goal_result: Some("blocked"),
        ..missed_fg
    };
    assert_eq!(label(&blocked_fg), "field goal - missed");

    let good_xp = PlayView {
        play_type: Some("extra_point"),
        extra_point_result: Some("good"),
        ..PlayView::default()
    };
    assert_eq!(label(&good_xp), "extra point - made");

    let failed_two_point = PlayView {
        play_type: Some("run"),
        run_location: Some("sideline"),
        run_gap: Some("end"),
        two_point_conv_result: Some("failure"),
        ..PlayView::default()
    };
    assert_eq!(label(&failed_two_point), "two point conversion - missed");
}

#[test]
fn unrecognized_direction_reaches_incomplete_pass() {
    let play = PlayView {
        desc: Some("T.Brady pass INCOMPLETE to R.Moss"),
        ..pass(Some("short"), Some("sideline"))
    };
    assert_eq!(label(&play), "incomplete pass");
}

#[test]
fn indicator_rules_in_precedence_order() {
    let both = PlayView {
        play_type: Some("punt"),
        interception: true,
        fumble: true,
        touchdown: true,
        ..PlayView::default()
    };
    assert_eq!(classify(&both), Activity::Interception);

    let fumble_td = PlayView {
        interception: false,
        ..both
    };
    assert_eq!(classify(&fumble_td), Activity::Fumble);

    let td = PlayView {
        fumble: false,
        ..fumble_td
    };
    assert_eq!(classify(&td), Activity::Touchdown);
}

#[test]
fn penalty_wins_over_no_play() {
    let play = PlayView {
        play_type: Some("no_play"),
        desc: Some("PENALTY on NE-M.Light, False Start, 5 yards - No Play."),
        ..PlayView::default()
    };
    assert_eq!(label(&play), "offensive penalty");

    let timeout = PlayView {
        desc: Some("Timeout #1 - no play"),
        ..play
    };
    assert_eq!(label(&timeout), "no play");
}

#[test]
fn end_of_period_markers() {
    let half = PlayView {
        desc: Some("End of Half"),
        ..PlayView::default()
    };
    assert_eq!(label(&half), "end of half");

    let game = PlayView {
        desc: Some("END GAME"),
        ..PlayView::default()
    };
    assert_eq!(label(&game), "unknown");

    let game = PlayView {
        desc: Some("End of Game"),
        ..PlayView::default()
    };
    assert_eq!(label(&game), "end of game");
}

#[test]
fn fallback_uses_raw_play_type() {
    let kickoff = PlayView {
        play_type: Some("kickoff"),
        desc: Some("M.Nugent kicks 65 yards"),
        ..PlayView::default()
    };
    assert_eq!(label(&kickoff), "kickoff");
    assert_eq!(matching_rule(&kickoff), None);

    let spike = PlayView {
        play_type: Some("qb_spike"),
        ..PlayView::default()
    };
    assert_eq!(label(&spike), "qb_spike");
}

#[test]
fn rule_table_is_ordered() {
    let names: Vec<&str> = RULES.iter().map(|rule| rule.name).collect();
    assert_eq!(names.first(), Some(&"directed_pass"));
    assert_eq!(names.last(), Some(&"end_of_game"));
    assert_eq!(names.len(), 16);
}

#[test]
fn vocabulary_lists_fixed_labels() {
    let labels = vocabulary();
    assert_eq!(labels.len(), 30);
    assert!(labels.contains(&"pass deep right".to_string()));
    assert!(labels.contains(&"run middle".to_string()));
    assert!(labels.contains(&"two point conversion - made".to_string()));
    assert!(!labels.contains(&"run middle tackle".to_string()));
}

#[test]
fn classify_activities_appends_a_label_per_row() {
    let df = df!(
        "play_type" => &[Some("pass"), Some("run"), None],
        "pass_length" => &[Some("deep"), None, None],
        "pass_location" => &[Some("right"), None, None],
        "run_location" => &[None, Some("left"), None],
        "run_gap" => &[None, Some("guard"), None],
        "field_goal_result" => &[None::<&str>, None, None],
        "extra_point_result" => &[None::<&str>, None, None],
        "two_point_conv_result" => &[None::<&str>, None, None],
        "touchdown" => &[0i32, 0, 0],
        "interception" => &[0i32, 0, 0],
        "fumble" => &[0i32, 0, 0],
        "desc" => &[Some("deep shot"), Some("run"), Some("GAME")],
    )
    .unwrap();

    let classified = classify_activities(&df).expect("classification succeeded");
    let labels = classified.column("activity_name").unwrap().str().unwrap();
    assert_eq!(labels.get(0), Some("pass deep right"));
    assert_eq!(labels.get(1), Some("run left guard"));
    assert_eq!(labels.get(2), Some("unknown"));
    assert_eq!(labels.null_count(), 0);
}
