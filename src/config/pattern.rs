use std::sync::OnceLock;

use regex::Regex;

/// Default multi-file naming pattern for single-level images.
pub const DEFAULT_FRAME_PATTERN: &str = "frame-{n}.png";
/// Default multi-file naming pattern when an image has several levels.
pub const DEFAULT_LEVEL_FRAME_PATTERN: &str = "level-{level}/frame-{n}.png";

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([^{}]*)\}").expect("static regex"))
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    Lit(String),
    Hole(String),
}

/// A parsed template with `{name}` placeholders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pieces: Vec<Piece>,
}

impl Template {
    /// Parse `src`, accepting only placeholders listed in `allowed`.
    pub fn parse(src: &str, allowed: &[&str]) -> Result<Self, String> {
        let mut pieces = Vec::new();
        let mut last = 0;
        for caps in placeholder_re().captures_iter(src) {
            let whole = caps.get(0).expect("group 0 always matches");
            let name = &caps[1];
            if !allowed.contains(&name) {
                return Err(format!(
                    "unknown placeholder '{{{name}}}' in '{src}' (expected one of {})",
                    allowed
                        .iter()
                        .map(|a| format!("{{{a}}}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
            push_lit(&mut pieces, &src[last..whole.start()], src)?;
            pieces.push(Piece::Hole(name.to_string()));
            last = whole.end();
        }
        push_lit(&mut pieces, &src[last..], src)?;
        Ok(Self { pieces })
    }

    /// `true` when the template references `{name}`.
    pub fn has(&self, name: &str) -> bool {
        self.pieces
            .iter()
            .any(|p| matches!(p, Piece::Hole(h) if h == name))
    }

    /// Substitute placeholders via `lookup`; unknown names render empty.
    pub fn render(&self, lookup: impl Fn(&str) -> Option<String>) -> String {
        let mut out = String::new();
        for p in &self.pieces {
            match p {
                Piece::Lit(s) => out.push_str(s),
                Piece::Hole(name) => out.push_str(&lookup(name).unwrap_or_default()),
            }
        }
        out
    }
}

fn push_lit(pieces: &mut Vec<Piece>, lit: &str, src: &str) -> Result<(), String> {
    if lit.contains('{') || lit.contains('}') {
        return Err(format!("unbalanced brace in '{src}'"));
    }
    if !lit.is_empty() {
        pieces.push(Piece::Lit(lit.to_string()));
    }
    Ok(())
}

/// Frame file URLs `base/pattern` for `count` frames.
///
/// `pattern` defaults to [`DEFAULT_FRAME_PATTERN`]. Patterns that fail to parse
/// fall back to the default; callers that need to reject them validate first.
pub fn generate_frame_urls(base: &str, pattern: Option<&str>, count: u32) -> Vec<String> {
    generate_level_frame_urls(base, pattern, 0, count)
}

/// Like [`generate_frame_urls`] with `{level}` substituted as well.
pub fn generate_level_frame_urls(
    base: &str,
    pattern: Option<&str>,
    level: u32,
    count: u32,
) -> Vec<String> {
    let template = pattern
        .and_then(|p| Template::parse(p, &["n", "level"]).ok())
        .unwrap_or_else(|| {
            Template::parse(DEFAULT_FRAME_PATTERN, &["n"]).expect("default pattern parses")
        });
    (0..count)
        .map(|n| {
            let file = template.render(|name| match name {
                "n" => Some(n.to_string()),
                "level" => Some(level.to_string()),
                _ => None,
            });
            join_url(base, &file)
        })
        .collect()
}

fn join_url(base: &str, file: &str) -> String {
    if base.is_empty() {
        return file.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), file.trim_start_matches('/'))
}

#[cfg(test)]
#[path = "../../tests/unit/config/pattern.rs"]
mod tests;
