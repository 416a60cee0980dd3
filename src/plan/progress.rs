use crate::foundation::core::EPS;
use crate::foundation::format::fmt_num;
use crate::keyframes::merge::{AnimationProgram, Keyframe};

/// One eaten cell as seen by the progress bar.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressEvent {
    /// Normalized time of the eat.
    pub time: f64,
    /// Fill of the eaten cell.
    pub color: String,
    pub weight: f64,
}

/// Maximal run of consecutive same-colored events.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressRun {
    pub color: String,
    pub member_times: Vec<f64>,
    pub member_weights: Vec<f64>,
    /// Share of the total weight eaten before the run begins.
    pub start_share: f64,
    /// Share of the total weight eaten once the run ends.
    pub end_share: f64,
}

fn usable(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 { weight } else { 0.0 }
}

/// Split `events` into same-color runs and compute their share boundaries.
///
/// Shares are cumulative weight over total weight; a zero total gives every run
/// an empty `[0, 0]` span.
pub fn segment_runs(events: &[ProgressEvent]) -> Vec<ProgressRun> {
    let total: f64 = events.iter().map(|e| usable(e.weight)).sum();
    let share = |w: f64| if total > 0.0 { (w / total).min(1.0) } else { 0.0 };

    let mut runs: Vec<ProgressRun> = Vec::new();
    let mut cumulative = 0.0;
    for e in events {
        let start = share(cumulative);
        cumulative += usable(e.weight);
        let end = share(cumulative);
        match runs.last_mut() {
            Some(run) if run.color == e.color => {
                run.member_times.push(e.time);
                run.member_weights.push(e.weight);
                run.end_share = end;
            }
            _ => runs.push(ProgressRun {
                color: e.color.clone(),
                member_times: vec![e.time],
                member_weights: vec![e.weight],
                start_share: start,
                end_share: end,
            }),
        }
    }
    runs
}

/// `clip-path:inset(0 R% 0 L%)` showing the band between `left` and `right` shares.
pub fn clip_style(left: f64, right: f64) -> String {
    let left = left.clamp(0.0, 1.0);
    let right = right.clamp(left, 1.0);
    format!(
        "clip-path:inset(0 {}% 0 {}%)",
        fmt_num((1.0 - right) * 100.0),
        fmt_num(left * 100.0)
    )
}

/// Clip program revealing `run` as its members are eaten.
///
/// The left edge stays pinned at the run's start share. The right edge jumps to
/// the cumulative share at each member's eat time and holds at the end share
/// through `100%`.
pub fn run_keyframes(run: &ProgressRun, total_weight: f64) -> Vec<Keyframe> {
    let left = run.start_share;
    let share = |w: f64| {
        if total_weight > 0.0 && total_weight.is_finite() {
            (w / total_weight).min(1.0)
        } else {
            0.0
        }
    };
    let mut out = vec![Keyframe::new(0.0, clip_style(left, left))];
    let mut right = left;
    let mut eaten = left * total_weight.max(0.0);
    for (&t, &w) in run.member_times.iter().zip(&run.member_weights) {
        let w = usable(w);
        if w == 0.0 {
            continue;
        }
        out.push(Keyframe::new(t - EPS, clip_style(left, right)));
        eaten += w;
        right = share(eaten).max(right);
        out.push(Keyframe::new(t + EPS, clip_style(left, right)));
    }
    out.push(Keyframe::new(1.0, clip_style(left, run.end_share.max(right))));
    out
}

/// One clip program per run, named `p0`, `p1`, ...
pub fn run_programs(runs: &[ProgressRun]) -> Vec<AnimationProgram> {
    let total: f64 = runs
        .iter()
        .flat_map(|r| r.member_weights.iter())
        .map(|&w| usable(w))
        .sum();
    runs.iter()
        .enumerate()
        .map(|(i, run)| AnimationProgram::build(format!("p{i}"), run_keyframes(run, total)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/plan/progress.rs"]
mod tests;
