use std::collections::HashSet;

use crate::config::model::Placement;
use crate::foundation::core::{Grid, GridPos, PathStep};

/// Per-step eating progress, independent of any display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CounterSample {
    pub step: usize,
    /// Cumulative weight eaten up to and including this step.
    pub count: f64,
    /// `count / total_weight`, 0 when the grid weighs nothing.
    pub share: f64,
    /// `step / total_steps`.
    pub elapsed_share: f64,
    /// Weight eaten at this step; 0 for revisits and empty cells.
    pub step_contribution: f64,
    /// The head ate a colored cell for the first time at this step.
    pub consumed: bool,
}

/// What a display shows at one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayState {
    pub count: u64,
    /// `0..=100`
    pub percentage: f64,
    /// Horizontal position inside the track, px.
    pub horizontal_position: f64,
    pub step_contribution: f64,
}

/// Walk the path once and accumulate eaten weight.
///
/// Only the first visit to a cell counts; weights come from raw counts when the
/// grid carries them, otherwise from levels.
pub fn sample_counter(grid: &Grid, steps: &[PathStep]) -> Vec<CounterSample> {
    let total_weight: f64 = grid.cells().map(|(pos, _)| grid.weight_at(pos)).sum();
    let total_steps = steps.len().max(1) as f64;
    let mut seen: HashSet<GridPos> = HashSet::new();
    let mut count = 0.0;

    steps
        .iter()
        .map(|step| {
            let first = seen.insert(step.head);
            let consumed = first && step.color_at_head > 0;
            let step_contribution = if consumed {
                grid.weight_at(step.head)
            } else {
                0.0
            };
            count += step_contribution;
            CounterSample {
                step: step.index,
                count,
                share: if total_weight > 0.0 {
                    (count / total_weight).min(1.0)
                } else {
                    0.0
                },
                elapsed_share: step.index as f64 / total_steps,
                step_contribution,
                consumed,
            }
        })
        .collect()
}

pub fn fixed_left() -> f64 {
    0.0
}

pub fn fixed_right(track_width: f64) -> f64 {
    track_width.max(0.0)
}

/// Cumulative share across the track plus `offset`, kept inside the track.
pub fn follow(share: f64, track_width: f64, offset: f64) -> f64 {
    let width = track_width.max(0.0);
    let x = share * width + offset;
    if x.is_finite() { x.clamp(0.0, width) } else { 0.0 }
}

/// Elapsed time across the track.
pub fn free(elapsed_share: f64, track_width: f64) -> f64 {
    let x = elapsed_share.clamp(0.0, 1.0) * track_width.max(0.0);
    if x.is_finite() { x } else { 0.0 }
}

pub fn horizontal_position(
    placement: Placement,
    sample: &CounterSample,
    track_width: f64,
    offset: f64,
) -> f64 {
    match placement {
        Placement::FixedLeft => fixed_left(),
        Placement::FixedRight => fixed_right(track_width),
        Placement::Follow => follow(sample.share, track_width, offset),
        Placement::Free => free(sample.elapsed_share, track_width),
    }
}

/// One display state per sample, in step order.
pub fn display_states(
    samples: &[CounterSample],
    placement: Placement,
    track_width: f64,
    offset: f64,
) -> Vec<DisplayState> {
    samples
        .iter()
        .map(|s| DisplayState {
            count: s.count.round().max(0.0) as u64,
            percentage: s.share * 100.0,
            horizontal_position: horizontal_position(placement, s, track_width, offset),
            step_contribution: s.step_contribution,
        })
        .collect()
}

/// Map `value` into one of `levels` buckets relative to `max`.
///
/// Level 0 is reserved for "nothing eaten"; any positive value lands in
/// `1..levels`, proportionally and rounded up.
pub fn contribution_level(value: f64, max: f64, levels: usize) -> usize {
    if levels <= 1 || value.is_nan() || value <= 0.0 || !(max.is_finite() && max > 0.0) {
        return 0;
    }
    let top = levels - 1;
    let ratio = (value / max).min(1.0);
    let level = (ratio * top as f64).ceil() as usize;
    level.clamp(1, top)
}

#[cfg(test)]
#[path = "../../tests/unit/counter/sampler.rs"]
mod tests;
