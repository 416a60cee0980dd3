use super::*;
use crate::foundation::core::{Grid, build_steps};

fn straight_steps(n: i32) -> Vec<PathStep> {
    let grid = Grid::from_levels(vec![vec![1; 8]]).unwrap();
    let path: Vec<GridPos> = (0..n).map(|x| GridPos::new(x, 0)).collect();
    build_steps(&grid, &path)
}

fn snake(length: usize, cycle: Option<ResolvedCycle>) -> ResolvedSnake {
    ResolvedSnake {
        length,
        colors: vec!["purple".to_string(); length],
        cycle,
    }
}

fn palette(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}

#[test]
fn segments_taper_from_head_to_tail() {
    let head = segment_shape(0, 4, 16.0, 12.0);
    assert!((head.size_px - 14.4).abs() < 1e-9);
    assert_eq!(head.radius_px, 4.5);
    assert!((head.inset_px - 0.8).abs() < 1e-9);

    let mid = segment_shape(2, 4, 16.0, 12.0);
    assert!((mid.size_px - 10.8).abs() < 1e-9);

    let tail = segment_shape(6, 8, 16.0, 12.0);
    assert!((tail.size_px - 9.6).abs() < 1e-9);
    assert!((tail.radius_px - 3.2).abs() < 1e-9);
}

#[test]
fn single_segment_snake_is_full_size() {
    let s = segment_shape(0, 1, 16.0, 12.0);
    assert!((s.size_px - 14.4).abs() < 1e-9);
}

#[test]
fn trailing_segments_wait_at_the_first_cell() {
    let steps = straight_steps(4);
    assert_eq!(segment_cell(&steps, 2, 0), Some(GridPos::new(0, 0)));
    assert_eq!(segment_cell(&steps, 2, 1), Some(GridPos::new(0, 0)));
    assert_eq!(segment_cell(&steps, 2, 3), Some(GridPos::new(1, 0)));
    assert_eq!(segment_cell(&steps, 0, 9), None);
}

#[test]
fn straight_movement_reduces_to_endpoints() {
    let steps = straight_steps(4);
    let plan = plan_snake(&steps, &snake(1, None), 16.0, 12.0, &[]);
    let seg = &plan.segments[0];
    assert_eq!(seg.movement.name, "s0");
    assert_eq!(
        seg.movement.body(),
        "0%{transform:translate(0.8px,0.8px)}75%{transform:translate(48.8px,0.8px)}"
    );
    assert!(seg.start.distance(Point::new(0.8, 0.8)) < 1e-9);
    assert!(seg.colors.is_none());
    assert_eq!(seg.fill, "purple");
}

#[test]
fn empty_path_plans_nothing() {
    let plan = plan_snake(&[], &snake(4, None), 16.0, 12.0, &[]);
    assert!(plan.segments.is_empty());
}

#[test]
fn every_step_cycle_flows_down_the_body() {
    let cycle = ResolvedCycle {
        policy: CyclePolicy::EveryStep,
        palette: palette(&["a", "b", "c"]),
    };
    // Segment 1 at step s shows what the head showed at step s - 1.
    for s in 1..6 {
        assert_eq!(
            cycle_color(&cycle.palette, 1, s),
            cycle_color(&cycle.palette, 0, s - 1)
        );
    }
    let program = AnimationProgram::build("sc0", cycle_keyframes(&cycle, 0, 3, &[]));
    let order: Vec<&str> = program.rules.iter().map(|r| r.style.as_str()).collect();
    assert_eq!(order, vec!["fill:a", "fill:c", "fill:b"]);
}

#[test]
fn on_consume_cycle_shifts_only_when_eating() {
    let cycle = ResolvedCycle {
        policy: CyclePolicy::OnConsume,
        palette: palette(&["a", "b"]),
    };
    let consumed = [false, true, false, true];
    let program = AnimationProgram::build("sc0", cycle_keyframes(&cycle, 0, 4, &consumed));
    assert_eq!(
        program.body(),
        "0%,24.99%,75.01%,100%{fill:a}25.01%,74.99%{fill:b}"
    );
}

#[test]
fn on_consume_at_first_step_starts_shifted() {
    let cycle = ResolvedCycle {
        policy: CyclePolicy::OnConsume,
        palette: palette(&["a", "b"]),
    };
    let program = AnimationProgram::build("sc0", cycle_keyframes(&cycle, 0, 2, &[true, false]));
    assert_eq!(program.body(), "0%,100%{fill:b}");
}

#[test]
fn cycle_programs_are_named_per_segment() {
    let steps = straight_steps(3);
    let cycle = ResolvedCycle {
        policy: CyclePolicy::EveryStep,
        palette: palette(&["a", "b"]),
    };
    let plan = plan_snake(&steps, &snake(2, Some(cycle)), 16.0, 12.0, &[]);
    assert_eq!(plan.segments[1].colors.as_ref().unwrap().name, "sc1");
}

#[test]
fn empty_palette_yields_no_color() {
    assert_eq!(cycle_color(&[], 0, 3), None);
}
