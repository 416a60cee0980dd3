use crate::foundation::core::Point;

/// Per-axis tolerance for treating a point as the midpoint of its neighbours.
pub const MIDPOINT_TOLERANCE: f64 = 0.01;

/// A timed position on a movement track.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    /// Position in output units (px).
    pub pos: Point,
    /// Normalized time.
    pub t: f64,
}

impl Waypoint {
    /// Create a waypoint.
    pub fn new(x: f64, y: f64, t: f64) -> Self {
        Self {
            pos: Point::new(x, y),
            t,
        }
    }
}

/// Drop interior waypoints that sit on the midpoint of their neighbours.
///
/// Neighbours are always taken from the input slice, never from the partially
/// reduced output, so a decision never depends on an earlier drop. The first and
/// last waypoints are always kept.
pub fn reduce_waypoints(points: &[Waypoint]) -> Vec<Waypoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    for w in points.windows(3) {
        let (a, u, b) = (w[0], w[1], w[2]);
        if !is_midpoint(a.pos, u.pos, b.pos) {
            out.push(u);
        }
    }
    out.push(points[points.len() - 1]);
    out
}

fn is_midpoint(a: Point, u: Point, b: Point) -> bool {
    let m = a.midpoint(b);
    (m.x - u.x).abs() < MIDPOINT_TOLERANCE && (m.y - u.y).abs() < MIDPOINT_TOLERANCE
}

#[cfg(test)]
#[path = "../../tests/unit/keyframes/waypoints.rs"]
mod tests;
