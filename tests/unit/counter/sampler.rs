use super::*;
use crate::foundation::core::build_steps;

fn grid() -> Grid {
    Grid::from_levels(vec![vec![1, 0, 3, 0]]).unwrap()
}

fn walk(grid: &Grid, xs: &[i32]) -> Vec<PathStep> {
    let path: Vec<GridPos> = xs.iter().map(|&x| GridPos::new(x, 0)).collect();
    build_steps(grid, &path)
}

#[test]
fn revisits_and_empty_cells_add_nothing() {
    let g = grid();
    let samples = sample_counter(&g, &walk(&g, &[0, 1, 0, 2, 3]));
    let contributions: Vec<f64> = samples.iter().map(|s| s.step_contribution).collect();
    assert_eq!(contributions, vec![1.0, 0.0, 0.0, 3.0, 0.0]);
    let consumed: Vec<bool> = samples.iter().map(|s| s.consumed).collect();
    assert_eq!(consumed, vec![true, false, false, true, false]);
    assert_eq!(samples[4].count, 4.0);
    assert_eq!(samples[4].share, 1.0);
    assert_eq!(samples[1].share, 0.25);
    assert_eq!(samples[2].elapsed_share, 0.4);
}

#[test]
fn raw_counts_override_levels_as_weights() {
    let mut g = grid();
    g.counts = Some(vec![vec![10, 0, 30, 0]]);
    let samples = sample_counter(&g, &walk(&g, &[0, 2]));
    assert_eq!(samples[0].step_contribution, 10.0);
    assert_eq!(samples[1].count, 40.0);
}

#[test]
fn empty_grid_never_divides_by_zero() {
    let g = Grid::from_levels(vec![vec![0, 0]]).unwrap();
    let samples = sample_counter(&g, &walk(&g, &[0, 1]));
    assert!(samples.iter().all(|s| s.share == 0.0 && s.count == 0.0));
}

#[test]
fn placements_stay_inside_the_track() {
    assert_eq!(fixed_left(), 0.0);
    assert_eq!(fixed_right(200.0), 200.0);
    assert_eq!(fixed_right(-5.0), 0.0);
    assert_eq!(follow(0.5, 200.0, 10.0), 110.0);
    assert_eq!(follow(1.0, 200.0, 10.0), 200.0);
    assert_eq!(follow(0.0, 200.0, -10.0), 0.0);
    assert_eq!(free(0.25, 200.0), 50.0);
    assert_eq!(free(f64::NAN, 200.0), 0.0);
}

#[test]
fn display_states_follow_placement() {
    let g = grid();
    let samples = sample_counter(&g, &walk(&g, &[0, 1, 2, 3]));
    let states = display_states(&samples, Placement::Follow, 100.0, 0.0);
    assert_eq!(states.len(), 4);
    assert_eq!(states[0].count, 1);
    assert_eq!(states[0].percentage, 25.0);
    assert_eq!(states[0].horizontal_position, 25.0);
    assert_eq!(states[3].horizontal_position, 100.0);

    let free_states = display_states(&samples, Placement::Free, 100.0, 0.0);
    assert_eq!(free_states[2].horizontal_position, 50.0);
}

#[test]
fn contribution_level_buckets() {
    assert_eq!(contribution_level(0.0, 10.0, 5), 0);
    assert_eq!(contribution_level(10.0, 10.0, 5), 4);
    assert_eq!(contribution_level(3.0, 10.0, 5), 2);
    assert_eq!(contribution_level(0.1, 10.0, 5), 1);
    assert_eq!(contribution_level(50.0, 10.0, 5), 4);
}

#[test]
fn contribution_level_degenerate_inputs() {
    assert_eq!(contribution_level(5.0, 0.0, 5), 0);
    assert_eq!(contribution_level(5.0, 10.0, 1), 0);
    assert_eq!(contribution_level(f64::NAN, 10.0, 5), 0);
    assert_eq!(contribution_level(-1.0, 10.0, 5), 0);
}
