use super::*;

#[test]
fn identical_styles_share_one_rule() {
    let p = AnimationProgram::build(
        "k",
        [Keyframe::new(0.0, "a"), Keyframe::new(0.5, "a")],
    );
    assert_eq!(p.rules.len(), 1);
    assert_eq!(p.body(), "0%,50%{a}");
    assert_eq!(p.to_css(), "@keyframes k{0%,50%{a}}");
}

#[test]
fn empty_input_yields_empty_body() {
    let p = AnimationProgram::build("k", Vec::new());
    assert!(p.is_empty());
    assert_eq!(p.to_css(), "@keyframes k{}");
}

#[test]
fn groups_are_ordered_by_earliest_time() {
    let p = AnimationProgram::build(
        "k",
        [
            Keyframe::new(0.9, "late"),
            Keyframe::new(0.2, "early"),
            Keyframe::new(0.1, "late"),
            Keyframe::new(1.0, "early"),
        ],
    );
    assert_eq!(p.body(), "10%,90%{late}20%,100%{early}");
}

#[test]
fn ties_keep_first_appearance() {
    let rules = merge_keyframes([Keyframe::new(0.0, "b"), Keyframe::new(0.0, "a")]);
    assert_eq!(rules[0].style, "b");
    assert_eq!(rules[1].style, "a");
}

#[test]
fn times_are_clamped_and_deduplicated() {
    let rules = merge_keyframes([
        Keyframe::new(-0.5, "a"),
        Keyframe::new(0.0, "a"),
        Keyframe::new(0.50001, "a"),
        Keyframe::new(0.5, "a"),
        Keyframe::new(f64::NAN, "a"),
        Keyframe::new(2.0, "a"),
    ]);
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].to_css(), "0%,50%,100%{a}");
}
