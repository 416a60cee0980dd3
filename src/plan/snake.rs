use crate::config::model::CyclePolicy;
use crate::config::normalize::{ResolvedCycle, ResolvedSnake};
use crate::foundation::core::{EPS, GridPos, PathStep, Point, lerp};
use crate::foundation::format::fmt_px;
use crate::keyframes::merge::{AnimationProgram, Keyframe};
use crate::keyframes::waypoints::{Waypoint, reduce_waypoints};

/// Segments beyond this index all get the minimum size.
const TAPER_SEGMENTS: usize = 4;

/// Drawn geometry of one body segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentShape {
    /// Side of the rounded square, px.
    pub size_px: f64,
    /// Corner radius, px.
    pub radius_px: f64,
    /// Distance from the cell corner to the square, px.
    pub inset_px: f64,
}

/// Size tapers quadratically from `0.9 × cell` at the head to `0.8 × dot` at the
/// fourth segment (or the tail, for shorter snakes).
pub fn segment_shape(index: usize, length: usize, cell_size_px: f64, dot_size_px: f64) -> SegmentShape {
    let m = TAPER_SEGMENTS.min(length.max(1)) as f64;
    let u = (1.0 - (index as f64).min(m) / m).powi(2);
    let size_px = lerp(u, dot_size_px * 0.8, cell_size_px * 0.9);
    let radius_px = if dot_size_px > 0.0 {
        (4.0 * size_px / dot_size_px).min(4.5)
    } else {
        0.0
    };
    SegmentShape {
        size_px,
        radius_px,
        inset_px: (cell_size_px - size_px) / 2.0,
    }
}

/// Cell occupied by segment `index` at `step`: the head position `index` steps
/// earlier, clamped to the first step.
pub fn segment_cell(steps: &[PathStep], index: usize, step: usize) -> Option<GridPos> {
    steps.get(step.saturating_sub(index)).map(|s| s.head)
}

#[derive(Clone, Debug, PartialEq)]
pub struct SegmentPlan {
    pub index: usize,
    pub shape: SegmentShape,
    /// Static position, equal to the first waypoint of `movement`.
    pub start: Point,
    pub movement: AnimationProgram,
    /// Static fill.
    pub fill: String,
    /// Color program when body colors cycle.
    pub colors: Option<AnimationProgram>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SnakePlan {
    pub segments: Vec<SegmentPlan>,
}

/// Plan movement and color programs for every body segment.
///
/// `consumed[s]` marks the steps at which the head eats a colored cell for the
/// first time; it drives the `on-consume` color cycle.
pub fn plan_snake(
    steps: &[PathStep],
    snake: &ResolvedSnake,
    cell_size_px: f64,
    dot_size_px: f64,
    consumed: &[bool],
) -> SnakePlan {
    if steps.is_empty() {
        return SnakePlan::default();
    }
    let total = steps.len() as f64;
    let segments = (0..snake.length)
        .map(|index| {
            let shape = segment_shape(index, snake.length, cell_size_px, dot_size_px);
            let waypoints: Vec<Waypoint> = (0..steps.len())
                .filter_map(|s| {
                    let cell = segment_cell(steps, index, s)?;
                    let p = cell.to_px(cell_size_px);
                    Some(Waypoint::new(
                        p.x + shape.inset_px,
                        p.y + shape.inset_px,
                        s as f64 / total,
                    ))
                })
                .collect();
            let start = waypoints.first().map_or(Point::ZERO, |w| w.pos);
            let movement = AnimationProgram::build(
                format!("s{index}"),
                reduce_waypoints(&waypoints)
                    .into_iter()
                    .map(|w| Keyframe::new(w.t, translate(w.pos))),
            );
            let colors = snake.cycle.as_ref().map(|cycle| {
                AnimationProgram::build(
                    format!("sc{index}"),
                    cycle_keyframes(cycle, index, steps.len(), consumed),
                )
            });
            SegmentPlan {
                index,
                shape,
                start,
                movement,
                fill: snake.colors.get(index).cloned().unwrap_or_default(),
                colors,
            }
        })
        .collect();
    SnakePlan { segments }
}

/// `transform:translate(Xpx,Ypx)`
pub fn translate(p: Point) -> String {
    format!("transform:translate({},{})", fmt_px(p.x), fmt_px(p.y))
}

/// Palette entry `(index - shift) mod n`.
pub fn cycle_color(palette: &[String], index: usize, shift: usize) -> Option<&str> {
    let n = palette.len();
    if n == 0 {
        return None;
    }
    let i = (index as i64 - shift as i64).rem_euclid(n as i64) as usize;
    Some(palette[i].as_str())
}

/// Color keyframes for one segment. Each color holds until just before the next
/// shift, and the last color holds through `100%`.
pub fn cycle_keyframes(
    cycle: &ResolvedCycle,
    index: usize,
    total_steps: usize,
    consumed: &[bool],
) -> Vec<Keyframe> {
    let fill = |shift: usize| {
        cycle_color(&cycle.palette, index, shift).map(|c| format!("fill:{c}"))
    };
    let shifts_at = |s: usize| match cycle.policy {
        CyclePolicy::EveryStep => s > 0,
        CyclePolicy::OnConsume => consumed.get(s).copied().unwrap_or(false),
    };
    let total = total_steps.max(1) as f64;
    let mut out = Vec::new();
    let mut shift = usize::from(total_steps > 0 && shifts_at(0));
    let Some(first) = fill(shift) else {
        return out;
    };
    out.push(Keyframe::new(0.0, first));

    for s in 1..total_steps {
        if !shifts_at(s) {
            continue;
        }
        let t = s as f64 / total;
        if let Some(prev) = fill(shift) {
            out.push(Keyframe::new(t - EPS, prev));
        }
        shift += 1;
        if let Some(next) = fill(shift) {
            out.push(Keyframe::new(t + EPS, next));
        }
    }
    if let Some(last) = fill(shift) {
        out.push(Keyframe::new(1.0, last));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/plan/snake.rs"]
mod tests;
