use super::*;

fn small_grid() -> Grid {
    Grid::from_levels(vec![vec![0, 1, 2], vec![3, 4, 0]]).unwrap()
}

#[test]
fn from_levels_infers_dimensions() {
    let g = small_grid();
    assert_eq!(g.width, 3);
    assert_eq!(g.height, 2);
    assert_eq!(g.max_level(), 4);
}

#[test]
fn ragged_rows_are_rejected() {
    let err = Grid::from_levels(vec![vec![0, 1], vec![1]]).unwrap_err();
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn mismatched_counts_are_rejected() {
    let mut g = small_grid();
    g.counts = Some(vec![vec![0, 1, 2]]);
    assert!(g.validate().is_err());
}

#[test]
fn outside_cells_read_as_empty() {
    let g = small_grid();
    assert_eq!(g.level_at(GridPos::new(-1, 0)), 0);
    assert_eq!(g.level_at(GridPos::new(3, 0)), 0);
    assert_eq!(g.level_at(GridPos::new(1, 1)), 4);
    assert_eq!(g.weight_at(GridPos::new(9, 9)), 0.0);
}

#[test]
fn weight_prefers_counts_over_levels() {
    let mut g = small_grid();
    assert_eq!(g.weight_at(GridPos::new(2, 0)), 2.0);
    g.counts = Some(vec![vec![5, 7, 11], vec![13, 17, 19]]);
    assert_eq!(g.weight_at(GridPos::new(2, 0)), 11.0);
    // An empty level never weighs anything, whatever the count says.
    assert_eq!(g.weight_at(GridPos::new(0, 0)), 0.0);
}

#[test]
fn build_steps_reads_levels_under_the_head() {
    let g = small_grid();
    let path = [GridPos::new(-1, 0), GridPos::new(0, 0), GridPos::new(1, 0)];
    let steps = build_steps(&g, &path);
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0].color_at_head, 0);
    assert_eq!(steps[2].color_at_head, 1);
    assert_eq!(steps[2].index, 2);
}

#[test]
fn grid_pos_to_px_scales_by_cell_size() {
    let p = GridPos::new(2, 3).to_px(16.0);
    assert_eq!(p, Point::new(32.0, 48.0));
}
