use super::*;
use crate::config::model::{CounterConfig, ProgressBarConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn resolve(cfg: &OverlayConfig) -> ResolvedConfig {
    let mut rng = StdRng::seed_from_u64(1);
    let mut ctx = NormalizeContext {
        available_assets: &[],
        rng: &mut rng,
    };
    normalize(cfg, &mut ctx).unwrap()
}

fn row_grid() -> Grid {
    Grid::from_levels(vec![vec![1, 2, 0]]).unwrap()
}

fn row_path() -> Vec<GridPos> {
    (0..3).map(|x| GridPos::new(x, 0)).collect()
}

fn short_snake() -> OverlayConfig {
    OverlayConfig {
        snake_length: 2,
        ..OverlayConfig::default()
    }
}

#[test]
fn stylesheet_carries_root_vars_and_shared_cell_program() {
    let out = compile_overlay(
        &row_grid(),
        &row_path(),
        &resolve(&short_snake()),
        &ResolvedAssets::default(),
    )
    .unwrap();
    let css = &out.stylesheet;
    assert!(css.starts_with(
        ":root{--ce:#ebedf0;--c1:#9be9a8;--c2:#40c463;--c3:#30a14e;--c4:#216e39;--cs:purple}"
    ));
    assert!(css.contains(
        ".a{animation-duration:300ms;animation-timing-function:linear;animation-iteration-count:infinite}"
    ));
    assert_eq!(css.matches("@keyframes c{").count(), 1);
    assert!(css.contains("#c0-0{animation-delay:0ms}"));
    assert!(css.contains("#c1-0{animation-delay:-100ms}"));
    assert!(!css.contains("#c2-0{"));
    assert!(css.contains(".l2{--b:var(--c2);fill:var(--b)}"));
    assert_eq!(out.duration_ms, 300.0);
}

#[test]
fn fragments_match_stylesheet_selectors() {
    let out = compile_overlay(
        &row_grid(),
        &row_path(),
        &resolve(&short_snake()),
        &ResolvedAssets::default(),
    )
    .unwrap();
    let ids: Vec<&str> = out.fragments.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["c0-0", "c1-0", "c2-0", "s0", "s1"]);
    assert!(out.fragments[1].markup.contains(r#"class="c l2 ca a""#));
    assert!(out.fragments[2].markup.contains(r#"class="c l0""#));
    assert!(out.stylesheet.contains("@keyframes s1{"));
    assert!(out.stylesheet.contains(".s1{transform:translate("));
}

#[test]
fn compilation_is_deterministic() {
    let cfg = resolve(&short_snake());
    let a = compile_overlay(&row_grid(), &row_path(), &cfg, &ResolvedAssets::default()).unwrap();
    let b = compile_overlay(&row_grid(), &row_path(), &cfg, &ResolvedAssets::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_path_renders_a_static_grid() {
    let out = compile_overlay(
        &row_grid(),
        &[],
        &resolve(&OverlayConfig::default()),
        &ResolvedAssets::default(),
    )
    .unwrap();
    assert!(!out.stylesheet.contains("@keyframes"));
    assert!(!out.stylesheet.contains(".a{"));
    assert_eq!(out.fragments.len(), 3);
    assert_eq!(out.duration_ms, 0.0);
}

#[test]
fn progress_bar_runs_follow_eaten_colors() {
    let cfg = OverlayConfig {
        progress_bar: Some(ProgressBarConfig::default()),
        ..short_snake()
    };
    let out = compile_overlay(&row_grid(), &row_path(), &resolve(&cfg), &ResolvedAssets::default()).unwrap();
    assert!(out.stylesheet.contains(".p0{fill:var(--c1);animation-name:p0}"));
    assert!(out.stylesheet.contains(".p1{fill:var(--c2);animation-name:p1}"));
    assert!(out.fragments.iter().any(|f| f.id == "p1"));
    assert_eq!(out.height_px, 16.0 + 4.0 + 8.0);
}

#[test]
fn display_diagnostics_are_reported_not_fatal() {
    let cfg = OverlayConfig {
        counter_config: Some(CounterConfig {
            displays: vec![
                serde_json::json!({"position": "nowhere"}),
                serde_json::json!({"position": "fixed-left"}),
            ],
        }),
        ..short_snake()
    };
    let out = compile_overlay(&row_grid(), &row_path(), &resolve(&cfg), &ResolvedAssets::default()).unwrap();
    assert_eq!(out.diagnostics.len(), 1);
    assert!(out.diagnostics[0].starts_with("$.counterConfig.displays[0]"));
    assert!(out.fragments.iter().any(|f| f.id == "d1"));
    assert_eq!(out.height_px, 16.0 + 4.0 + 12.0);
}

#[test]
fn malformed_grid_is_rejected() {
    let grid = Grid {
        width: 3,
        height: 1,
        levels: vec![vec![1, 2]],
        counts: None,
    };
    let err = compile_overlay(&grid, &[], &resolve(&OverlayConfig::default()), &ResolvedAssets::default())
        .unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
}

#[test]
fn scene_document_parses_and_compiles() {
    let doc = SceneDocument::from_json(
        r#"{"grid":{"width":2,"height":1,"levels":[[1,0]]},"path":[{"x":0,"y":0},{"x":1,"y":0}]}"#,
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let mut ctx = NormalizeContext {
        available_assets: &[],
        rng: &mut rng,
    };
    let out = compile_scene(&doc, &mut ctx, &ResolvedAssets::default()).unwrap();
    assert_eq!(out.width_px, 32.0);
    assert_eq!(out.fragments.iter().filter(|f| f.id.starts_with('s')).count(), 4);
}
