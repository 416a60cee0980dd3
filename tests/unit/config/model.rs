use super::*;

#[test]
fn empty_object_uses_defaults() {
    let cfg: OverlayConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg.cell_size_px, 16.0);
    assert_eq!(cfg.color_by_level.len(), 4);
    assert_eq!(cfg.snake_length, 4);
    assert!(cfg.counter_config.is_none());
}

#[test]
fn palette_accepts_string_or_list() {
    let cfg: OverlayConfig = serde_json::from_str(r##"{"colorSnake":"#f00"}"##).unwrap();
    assert_eq!(cfg.color_snake.resolve(3), vec!["#f00", "#f00", "#f00"]);

    let cfg: OverlayConfig = serde_json::from_str(r##"{"colorSnake":["a","b"]}"##).unwrap();
    assert_eq!(cfg.color_snake.resolve(3), vec!["a", "b", "a"]);
    assert_eq!(cfg.color_snake.fixed_len(), Some(2));
}

#[test]
fn computed_palette_resolves_once_per_segment() {
    let p = Palette::Computed(std::sync::Arc::new(|i: usize, n: usize| format!("c{i}/{n}")));
    assert_eq!(p.resolve(2), vec!["c0/2", "c1/2"]);
    assert_eq!(p.fixed_len(), None);
    assert_eq!(format!("{p:?}"), "Computed(..)");
}

#[test]
fn kebab_case_enums_parse() {
    let raw = serde_json::json!({
        "position": "fixed-right",
        "images": [{
            "url": "img/cat",
            "mode": "multi-file",
            "framesPerLevel": [2, 4],
            "animationMode": "level-bucketed"
        }]
    });
    let d: DisplayConfig = serde_json::from_value(raw).unwrap();
    assert_eq!(d.position, Placement::FixedRight);
    assert_eq!(d.font_size_px, 12.0);
    assert_eq!(d.images[0].mode, ImageMode::MultiFile);
    assert_eq!(
        d.images[0].frames_per_level,
        Some(FramesPerLevel::PerLevel(vec![2, 4]))
    );
    assert_eq!(d.images[0].animation_mode, AnimationMode::LevelBucketed);
}

#[test]
fn malformed_display_does_not_break_document_parse() {
    let cfg: OverlayConfig = serde_json::from_str(
        r#"{"counterConfig":{"displays":[{"position":"sideways"},{"position":"free"}]}}"#,
    )
    .unwrap();
    let displays = cfg.counter_config.unwrap().displays;
    assert_eq!(displays.len(), 2);
    assert!(serde_json::from_value::<DisplayConfig>(displays[0].clone()).is_err());
    assert!(serde_json::from_value::<DisplayConfig>(displays[1].clone()).is_ok());
}
