use crate::foundation::format::fmt_percent;

/// One time-indexed style declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Keyframe {
    /// Normalized time in `[0, 1]`.
    pub t: f64,
    /// Opaque declaration body, e.g. `fill:var(--ce)`.
    pub style: String,
}

impl Keyframe {
    /// Create a keyframe.
    pub fn new(t: f64, style: impl Into<String>) -> Self {
        Self {
            t,
            style: style.into(),
        }
    }
}

/// A rule of a merged program: every time that shares one declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeRule {
    /// Sorted, de-duplicated selector times.
    pub times: Vec<f64>,
    /// Declaration body.
    pub style: String,
}

impl KeyframeRule {
    /// `0%,50%{a}`
    pub fn to_css(&self) -> String {
        let mut selectors: Vec<String> = Vec::with_capacity(self.times.len());
        for t in &self.times {
            let s = fmt_percent(*t);
            if selectors.last() != Some(&s) {
                selectors.push(s);
            }
        }
        format!("{}{{{}}}", selectors.join(","), self.style)
    }
}

/// Named keyframe program. Immutable once built; elements reference it by name.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationProgram {
    /// CSS animation name.
    pub name: String,
    /// Rules ordered by their earliest time.
    pub rules: Vec<KeyframeRule>,
}

impl AnimationProgram {
    /// Merge `keyframes` into a program called `name`.
    pub fn build(name: impl Into<String>, keyframes: impl IntoIterator<Item = Keyframe>) -> Self {
        Self {
            name: name.into(),
            rules: merge_keyframes(keyframes),
        }
    }

    /// Concatenated rule bodies, without the `@keyframes` wrapper.
    pub fn body(&self) -> String {
        self.rules.iter().map(KeyframeRule::to_css).collect()
    }

    /// Full `@keyframes name{...}` text.
    pub fn to_css(&self) -> String {
        format!("@keyframes {}{{{}}}", self.name, self.body())
    }

    /// `true` when the program has no rules at all.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Group keyframes by exact style equality.
///
/// Times are clamped into `[0, 1]`; non-finite times are dropped. Two times that
/// format to the same two-decimal selector collapse into one. Groups are ordered
/// by their earliest time, ties broken by first appearance.
pub fn merge_keyframes(keyframes: impl IntoIterator<Item = Keyframe>) -> Vec<KeyframeRule> {
    let mut groups: Vec<KeyframeRule> = Vec::new();
    for kf in keyframes {
        if !kf.t.is_finite() {
            continue;
        }
        let t = kf.t.clamp(0.0, 1.0);
        match groups.iter_mut().find(|g| g.style == kf.style) {
            Some(g) => g.times.push(t),
            None => groups.push(KeyframeRule {
                times: vec![t],
                style: kf.style,
            }),
        }
    }

    for g in &mut groups {
        g.times.sort_by(f64::total_cmp);
        g.times.dedup_by(|a, b| fmt_percent(*a) == fmt_percent(*b));
    }
    // Stable sort keeps first-appearance order between groups that start together.
    groups.sort_by(|a, b| a.times[0].total_cmp(&b.times[0]));
    groups
}

#[cfg(test)]
#[path = "../../tests/unit/keyframes/merge.rs"]
mod tests;
