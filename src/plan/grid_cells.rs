use std::collections::HashMap;

use crate::foundation::core::{EPS, Grid, GridPos, PathStep};
use crate::keyframes::merge::{AnimationProgram, Keyframe};

/// Name of the decay program shared by every animated cell.
pub const CELL_PROGRAM: &str = "c";
/// Declaration showing a cell's own color (set per level through `--b`).
pub const STYLE_BASE: &str = "fill:var(--b)";
/// Declaration showing an eaten cell.
pub const STYLE_EMPTY: &str = "fill:var(--ce)";

/// A grid cell and the first time the head lands on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCellState {
    pub pos: GridPos,
    pub base_level: u8,
    /// First visit as `step / total_steps`; `None` if never visited.
    pub eat_time: Option<f64>,
}

/// Derive per-cell eat times from the path.
pub fn cell_states(grid: &Grid, steps: &[PathStep]) -> Vec<GridCellState> {
    let total = steps.len();
    let mut first_visit: HashMap<GridPos, usize> = HashMap::new();
    for step in steps {
        first_visit.entry(step.head).or_insert(step.index);
    }
    grid.cells()
        .map(|(pos, base_level)| GridCellState {
            pos,
            base_level,
            eat_time: first_visit
                .get(&pos)
                .map(|&i| if total == 0 { 0.0 } else { i as f64 / total as f64 }),
        })
        .collect()
}

/// Base color until just before `eat_time`, empty from just after it.
///
/// Times are clamped into `[0, 1]`; the trailing `100%` key holds the empty color
/// through the loop boundary.
pub fn decay_keyframes(eat_time: f64) -> Vec<Keyframe> {
    vec![
        Keyframe::new(0.0, STYLE_BASE),
        Keyframe::new((eat_time - EPS).clamp(0.0, 1.0), STYLE_BASE),
        Keyframe::new((eat_time + EPS).clamp(0.0, 1.0), STYLE_EMPTY),
        Keyframe::new(1.0, STYLE_EMPTY),
    ]
}

/// One cell as it should be drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannedCell {
    pub pos: GridPos,
    pub level: u8,
    /// Negative delay into the shared program; `None` for static cells.
    pub delay_ms: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CellPlan {
    /// Shared program, present when at least one cell animates.
    pub program: Option<AnimationProgram>,
    pub cells: Vec<PlannedCell>,
}

impl CellPlan {
    pub fn animated_count(&self) -> usize {
        self.cells.iter().filter(|c| c.delay_ms.is_some()).count()
    }
}

/// Plan every cell against the single shared decay program.
///
/// The program switches to empty just after phase 0. Each visited colored cell is
/// offset only through `delay = -(eat_time × duration)`, which puts that switch at
/// `(1 - eat_time) × duration` into the loop.
///
/// A shared program has one base/empty duty for every cell, so an animated cell
/// shows its base color only for the first 0.01% of its own cycle and renders empty
/// for the rest of the loop, including before the head reaches it. Callers that
/// need each cell to disappear exactly when eaten build a per-cell program from
/// [`decay_keyframes`] with that cell's eat time instead.
pub fn plan_grid_cells(states: &[GridCellState], total_duration_ms: f64) -> CellPlan {
    let cells: Vec<PlannedCell> = states
        .iter()
        .map(|s| PlannedCell {
            pos: s.pos,
            level: s.base_level,
            delay_ms: match s.eat_time {
                Some(t) if s.base_level > 0 => Some(cell_delay_ms(t, total_duration_ms)),
                _ => None,
            },
        })
        .collect();

    let program = cells
        .iter()
        .any(|c| c.delay_ms.is_some())
        .then(|| AnimationProgram::build(CELL_PROGRAM, decay_keyframes(0.0)));

    CellPlan { program, cells }
}

/// `-(eat_time × duration)`, with degenerate inputs mapped to 0.
pub fn cell_delay_ms(eat_time: f64, total_duration_ms: f64) -> f64 {
    let d = -(eat_time.clamp(0.0, 1.0) * total_duration_ms);
    if d.is_finite() { d } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/plan/grid_cells.rs"]
mod tests;
