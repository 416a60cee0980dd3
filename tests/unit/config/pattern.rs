use super::*;

#[test]
fn default_pattern_numbers_frames_from_zero() {
    assert_eq!(
        generate_frame_urls("images/character", None, 3),
        vec![
            "images/character/frame-0.png",
            "images/character/frame-1.png",
            "images/character/frame-2.png",
        ]
    );
}

#[test]
fn level_pattern_substitutes_both_placeholders() {
    let urls = generate_level_frame_urls("cat/", Some("l{level}_{n}.webp"), 2, 2);
    assert_eq!(urls, vec!["cat/l2_0.webp", "cat/l2_1.webp"]);
}

#[test]
fn zero_frames_yields_no_urls() {
    assert!(generate_frame_urls("x", None, 0).is_empty());
}

#[test]
fn unknown_placeholder_is_rejected() {
    let err = Template::parse("frame-{idx}.png", &["n"]).unwrap_err();
    assert!(err.contains("{idx}"));
}

#[test]
fn unbalanced_brace_is_rejected() {
    assert!(Template::parse("frame-{n.png", &["n"]).is_err());
    assert!(Template::parse("frame-n}.png", &["n"]).is_err());
}

#[test]
fn template_reports_and_renders_placeholders() {
    let t = Template::parse("{count} eaten ({percent}%)", &["count", "percent"]).unwrap();
    assert!(t.has("count"));
    assert!(!t.has("n"));
    let s = t.render(|name| match name {
        "count" => Some("12".into()),
        "percent" => Some("40".into()),
        _ => None,
    });
    assert_eq!(s, "12 eaten (40%)");
}
