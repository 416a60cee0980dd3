use super::*;

fn track(coords: &[(f64, f64)]) -> Vec<Waypoint> {
    let n = coords.len() as f64;
    coords
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| Waypoint::new(x, y, i as f64 / n))
        .collect()
}

#[test]
fn straight_line_reduces_to_endpoints() {
    let pts = track(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)]);
    let out = reduce_waypoints(&pts);
    assert_eq!(out, vec![pts[0], pts[4]]);
}

#[test]
fn no_collinear_interior_points_is_identity() {
    let pts = track(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (2.0, 1.0), (2.0, 2.0)]);
    assert_eq!(reduce_waypoints(&pts), pts);
}

#[test]
fn corners_survive_and_reduction_is_idempotent() {
    // An L-shaped grid path with a long straight run on each leg.
    let pts = track(&[
        (0.0, 0.0),
        (16.0, 0.0),
        (32.0, 0.0),
        (48.0, 0.0),
        (48.0, 16.0),
        (48.0, 32.0),
        (32.0, 32.0),
    ]);
    let once = reduce_waypoints(&pts);
    assert_eq!(once, vec![pts[0], pts[3], pts[5], pts[6]]);
    assert_eq!(reduce_waypoints(&once), once);
}

#[test]
fn decisions_use_original_neighbours() {
    // Index 2 is the midpoint of 1 and 3 in the input; dropping 1 must not change that.
    let pts = track(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (3.0, 5.0)]);
    let out = reduce_waypoints(&pts);
    assert_eq!(out, vec![pts[0], pts[3], pts[4]]);
}

#[test]
fn short_inputs_pass_through() {
    assert!(reduce_waypoints(&[]).is_empty());
    let one = track(&[(1.0, 1.0)]);
    assert_eq!(reduce_waypoints(&one), one);
    let two = track(&[(1.0, 1.0), (1.0, 1.0)]);
    assert_eq!(reduce_waypoints(&two), two);
}

#[test]
fn tolerance_absorbs_float_noise() {
    let pts = track(&[(0.0, 0.0), (1.004, 0.0), (2.0, 0.0)]);
    assert_eq!(reduce_waypoints(&pts).len(), 2);
    let pts = track(&[(0.0, 0.0), (1.05, 0.0), (2.0, 0.0)]);
    assert_eq!(reduce_waypoints(&pts).len(), 3);
}
