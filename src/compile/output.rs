use crate::keyframes::merge::AnimationProgram;

/// One markup element (or group) whose `id`/classes match stylesheet selectors.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MarkupFragment {
    pub id: String,
    pub markup: String,
}

impl MarkupFragment {
    pub fn new(id: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            markup: markup.into(),
        }
    }
}

/// Compiler output: a stylesheet plus the fragments it styles.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompiledOverlay {
    pub stylesheet: String,
    pub fragments: Vec<MarkupFragment>,
    /// Recovered configuration problems, one line each.
    pub diagnostics: Vec<String>,
    /// Overlay extent, px.
    pub width_px: f64,
    pub height_px: f64,
    /// Loop duration, ms.
    pub duration_ms: f64,
}

/// Ordered stylesheet under construction. Programs are emitted once per name.
#[derive(Clone, Debug, Default)]
pub struct Stylesheet {
    rules: Vec<String>,
    program_names: Vec<String>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `selector{body}`.
    pub fn rule(&mut self, selector: &str, body: &str) {
        self.rules.push(format!("{selector}{{{body}}}"));
    }

    /// Append a keyframe program, skipping empty programs and repeated names.
    pub fn program(&mut self, program: &AnimationProgram) {
        if program.is_empty() || self.program_names.iter().any(|n| *n == program.name) {
            return;
        }
        self.program_names.push(program.name.clone());
        self.rules.push(program.to_css());
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn finish(self) -> String {
        let mut out = self.rules.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

/// Escape text for use inside markup content or a double-quoted attribute.
pub fn escape_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compile/output.rs"]
mod tests;
