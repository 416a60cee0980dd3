use crate::foundation::core::EPS;
use crate::keyframes::merge::Keyframe;

pub const STYLE_SHOWN: &str = "opacity:1";
pub const STYLE_HIDDEN: &str = "opacity:0";

/// Half-open step range `[start, end)` during which an element is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub end: usize,
}

/// Group per-step values into maximal runs, keyed by value.
///
/// Keys are returned in order of first appearance; each key lists every run in
/// which it is the current value.
pub fn collect_windows<K, I>(values: I) -> Vec<(K, Vec<Window>)>
where
    K: PartialEq,
    I: IntoIterator<Item = K>,
{
    let mut out: Vec<(K, Vec<Window>)> = Vec::new();
    let mut current: Option<(usize, Window)> = None;
    let mut step = 0;
    for value in values {
        let slot = match out.iter().position(|(k, _)| *k == value) {
            Some(i) => i,
            None => {
                out.push((value, Vec::new()));
                out.len() - 1
            }
        };
        current = match current {
            Some((i, mut w)) if i == slot => {
                w.end = step + 1;
                Some((i, w))
            }
            Some((i, w)) => {
                out[i].1.push(w);
                Some((
                    slot,
                    Window {
                        start: step,
                        end: step + 1,
                    },
                ))
            }
            None => Some((
                slot,
                Window {
                    start: step,
                    end: step + 1,
                },
            )),
        };
        step += 1;
    }
    if let Some((i, w)) = current {
        out[i].1.push(w);
    }
    out
}

/// Opacity keyframes showing an element only inside `windows`.
///
/// Switches use the ±ε technique around `step / total_steps`. A window ending at
/// the last step stays visible through `100%`.
pub fn visibility_keyframes(windows: &[Window], total_steps: usize) -> Vec<Keyframe> {
    let total = total_steps.max(1) as f64;
    let t = |s: usize| s as f64 / total;
    let mut out = Vec::with_capacity(windows.len() * 4 + 2);

    let starts_visible = windows.first().is_some_and(|w| w.start == 0);
    if !starts_visible {
        out.push(Keyframe::new(0.0, STYLE_HIDDEN));
    }
    for w in windows {
        if w.start == 0 {
            out.push(Keyframe::new(0.0, STYLE_SHOWN));
        } else {
            out.push(Keyframe::new(t(w.start) - EPS, STYLE_HIDDEN));
            out.push(Keyframe::new(t(w.start) + EPS, STYLE_SHOWN));
        }
        if w.end >= total_steps {
            out.push(Keyframe::new(1.0, STYLE_SHOWN));
        } else {
            out.push(Keyframe::new(t(w.end) - EPS, STYLE_SHOWN));
            out.push(Keyframe::new(t(w.end) + EPS, STYLE_HIDDEN));
        }
    }
    if windows.last().is_none_or(|w| w.end < total_steps) {
        out.push(Keyframe::new(1.0, STYLE_HIDDEN));
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/keyframes/visibility.rs"]
mod tests;
